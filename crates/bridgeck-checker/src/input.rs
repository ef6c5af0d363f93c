//! Input boundary records.
//!
//! Declarations arrive as `DeclarationInput` (see `bridgeck_solver`). Call
//! sites keep their type references as raw strings: a malformed or unknown
//! type at a call site rejects that call site only, never the batch.

use bridgeck_solver::DeclarationInput;
use serde::{Deserialize, Serialize};

/// One checking batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInput {
    #[serde(default)]
    pub declarations: Vec<DeclarationInput>,
    #[serde(default)]
    pub bridges: Vec<BridgeRecord>,
    #[serde(default)]
    pub call_sites: Vec<CallSiteRecord>,
}

/// A declared `(readOnly, mutable)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRecord {
    pub read_only: String,
    pub mutable: String,
}

impl BridgeRecord {
    pub fn new(read_only: impl Into<String>, mutable: impl Into<String>) -> Self {
        BridgeRecord {
            read_only: read_only.into(),
            mutable: mutable.into(),
        }
    }
}

/// A call through a typed receiver, as produced by expression checking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSiteRecord {
    /// Free-form tag carried into the report (e.g. `File.java:12`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub receiver_type: String,
    #[serde(default)]
    pub receiver_type_arguments: Vec<String>,
    /// Type variables of the enclosing generic method; bare references to
    /// them lower to rigid variables.
    #[serde(default)]
    pub type_parameters: Vec<String>,
    pub member_name: String,
    #[serde(default)]
    pub argument_types: Vec<String>,
}

impl CallSiteRecord {
    pub fn new(
        receiver_type: impl Into<String>,
        receiver_type_arguments: &[&str],
        member_name: impl Into<String>,
        argument_types: &[&str],
    ) -> Self {
        CallSiteRecord {
            label: None,
            receiver_type: receiver_type.into(),
            receiver_type_arguments: receiver_type_arguments.iter().map(|s| (*s).to_string()).collect(),
            type_parameters: Vec::new(),
            member_name: member_name.into(),
            argument_types: argument_types.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    pub fn with_type_parameters(mut self, params: &[&str]) -> Self {
        self.type_parameters = params.iter().map(|s| (*s).to_string()).collect();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
