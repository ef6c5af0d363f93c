//! Batch member-resolution checking.
//!
//! Wraps the solver in the two-phase session the checker runs in:
//! - **Build phase** (`CheckerSession::build`): registry, memo warm-up,
//!   bridge table. Single-threaded and deterministic.
//! - **Resolution phase** (`CheckerSession::check`): one outcome per call
//!   site, optionally on the rayon pool, collected into an ordered `Report`.

pub mod diagnostics;
pub mod error;
pub mod input;
pub mod options;
pub mod prelude;
mod session;

pub use diagnostics::{
    CallSiteId, DiagnosticCollector, Outcome, Report, ReportEntry, ReportSummary,
};
pub use error::CheckError;
pub use input::{BridgeRecord, CallSiteRecord, CheckInput};
pub use options::CheckerOptions;
pub use session::{CheckerSession, check_input, check_json};
