//! Common types and utilities for the bridgeck checker.
//!
//! This crate provides foundational types used across all bridgeck crates:
//! - Name interning (`Atom`, `ShardedInterner`)
//! - Centralized limits and thresholds
//! - Diagnostic codes and message templates for resolution outcomes

// Name interning for declaration, member and type-variable names
pub mod interner;
pub use interner::{Atom, ShardedInterner};

// Centralized limits and thresholds
pub mod limits;

// Diagnostic codes shared by the solver and the report
pub mod diagnostics;
pub use diagnostics::{DiagnosticCategory, DiagnosticMessage};
