//! Checker options.

use crate::error::CheckError;
use bridgeck_common::limits::PARALLEL_RESOLUTION_THRESHOLD;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckerOptions {
    /// Universal supertype every type widens to.
    pub top_type: String,
    /// Leaf types synthesized at freeze when not declared.
    pub intrinsic_types: Vec<String>,
    /// Register the read-only/mutable collection prelude before user
    /// declarations.
    pub include_prelude: bool,
    pub parallel: bool,
    /// Below this many call sites resolution stays on the calling thread.
    pub parallel_threshold: usize,
    pub prewarm_flattening: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            top_type: "Object".to_string(),
            intrinsic_types: ["String", "bool", "int", "long", "double", "char", "void"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            include_prelude: false,
            parallel: true,
            parallel_threshold: PARALLEL_RESOLUTION_THRESHOLD,
            prewarm_flattening: true,
        }
    }
}

impl CheckerOptions {
    pub fn from_json(text: &str) -> Result<Self, CheckError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_prelude(mut self) -> Self {
        self.include_prelude = true;
        self
    }

    /// Resolve every call site on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
