//! Build-time errors.
//!
//! Every variant carries rendered names, so an error can outlive the
//! registry that produced it (a rejected build has no registry at all).

use bridgeck_common::diagnostics::diagnostic_codes;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("type `{name}` is declared more than once")]
    DuplicateDeclaration { name: String },

    #[error("type `{name}` is its own supertype: {}", .cycle.join(" -> "))]
    CyclicHierarchy {
        name: String,
        /// The supertype path from `name` back to itself.
        cycle: Vec<String>,
    },

    #[error("cannot find type `{name}`")]
    UnknownType { name: String },

    #[error("type `{name}` expects {expected} type argument(s) but got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "`{mutable}` is not a superset of read-only `{read_only}`{}",
        render_missing(.missing)
    )]
    IncompatibleBridge {
        read_only: String,
        mutable: String,
        /// Read-only member signatures with no identical member on the mutable side.
        missing: Vec<String>,
    },
}

fn render_missing(missing: &[String]) -> String {
    if missing.is_empty() {
        String::new()
    } else {
        format!("; missing: {}", missing.join(", "))
    }
}

impl HierarchyError {
    /// Stable diagnostic code for this error.
    pub fn code(&self) -> u32 {
        match self {
            Self::DuplicateDeclaration { .. } => diagnostic_codes::DUPLICATE_DECLARATION,
            Self::CyclicHierarchy { .. } => diagnostic_codes::CYCLIC_HIERARCHY,
            Self::UnknownType { .. } => diagnostic_codes::UNKNOWN_TYPE,
            Self::ArityMismatch { .. } => diagnostic_codes::ARITY_MISMATCH,
            Self::IncompatibleBridge { .. } => diagnostic_codes::INCOMPATIBLE_BRIDGE,
        }
    }
}
