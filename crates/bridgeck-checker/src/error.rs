use bridgeck_solver::HierarchyError;

/// Failure to set up a checker session.
///
/// Per-call-site failures are never errors; they are report outcomes.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error("invalid checker input: {0}")]
    Json(#[from] serde_json::Error),
}

impl CheckError {
    /// Diagnostic code of a hierarchy error; `None` for decoding failures.
    pub fn code(&self) -> Option<u32> {
        match self {
            CheckError::Hierarchy(err) => Some(err.code()),
            CheckError::Json(_) => None,
        }
    }
}
