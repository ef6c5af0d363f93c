//! bridgeck: member resolution across read-only and mutable interface
//! hierarchies.
//!
//! The work is split across the workspace crates:
//!
//! - [`common`]: interned names, limits, diagnostic codes
//! - [`solver`]: type registry, hierarchy flattening, bridges, resolver
//! - [`checker`]: sessions, batch checking, the collection prelude, reports
//!
//! The most common entry points are re-exported at the crate root.

pub use bridgeck_checker as checker;
pub use bridgeck_common as common;
pub use bridgeck_solver as solver;

pub use bridgeck_checker::{
    BridgeRecord, CallSiteRecord, CheckError, CheckInput, CheckerOptions, CheckerSession, Outcome,
    Report, ReportEntry, ReportSummary, check_input, check_json,
};
pub use bridgeck_solver::{DeclarationInput, HierarchyError, ResolutionError};

pub mod tracing_config;
