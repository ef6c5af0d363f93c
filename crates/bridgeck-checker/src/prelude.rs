//! Well-known read-only/mutable collection hierarchy.
//!
//! Embedded with `include_str!` so sessions can opt in without shipping
//! declaration files. Only the member surface needed to resolve calls is
//! declared; every mutable interface lists its specialized-signature bridge
//! members (`contains(Object)` next to `contains(E)` and so on).
//!
//! The declarations name `Object`, `bool`, `int` and `void`, so the session's
//! top type and intrinsics must include them (the defaults do).

use crate::error::CheckError;
use crate::input::{BridgeRecord, CheckInput};
use bridgeck_solver::DeclarationInput;

const COLLECTIONS_JSON: &str = include_str!("prelude/collections.json");

/// Declarations and bridges of the prelude. Never contains call sites.
pub fn collection_prelude() -> Result<CheckInput, CheckError> {
    Ok(serde_json::from_str(COLLECTIONS_JSON)?)
}

pub fn collection_declarations() -> Result<Vec<DeclarationInput>, CheckError> {
    Ok(collection_prelude()?.declarations)
}

pub fn collection_bridges() -> Result<Vec<BridgeRecord>, CheckError> {
    Ok(collection_prelude()?.bridges)
}
