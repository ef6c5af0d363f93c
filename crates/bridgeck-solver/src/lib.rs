//! Cross-Hierarchy Member Resolution Solver
//!
//! Decides, for a call made through a typed interface reference, whether the
//! member exists and which overload applies, when a read-only interface
//! hierarchy and its richer mutable counterpart expose different members.
//!
//! Pipeline, leaves first:
//!
//! - **Type Registry** (`RegistryBuilder` -> `TypeRegistry`): declarations,
//!   acyclic supertype graph, type lowering
//! - **Hierarchy Flattener**: ordered, de-duplicated, substituted member sets,
//!   memoized per instantiation
//! - **Bridge Mapper** (`BridgeTable`): read-only/mutable pairs and deltas
//! - **Member Resolver**: name/arity filter, applicability, specificity
//!
//! Key properties:
//! - O(1) type equality via interning (`TypeId` comparison)
//! - After `freeze`, every structure is shared read-only across threads
mod bridge;
mod declaration;
mod error;
mod flatten;
mod format;
pub mod inheritance;
mod instantiate;
mod intern;
mod registry;
mod relation;
mod resolve;
mod type_expr;
pub mod types;

pub use bridge::{BridgeMapper, BridgeMapping, BridgeTable};
pub use declaration::{DeclarationInput, MemberInput, Modifier, SupertypeInput};
pub use error::HierarchyError;
pub use flatten::{FlattenStats, HierarchyFlattener};
pub use format::TypeFormatter;
pub use inheritance::SupertypeGraph;
pub use instantiate::{Instantiation, TypeSubstitution};
pub use intern::TypeInterner;
pub use registry::{LoweringScope, RegistryBuilder, SupertypeRef, TypeDeclaration, TypeRegistry};
pub use relation::AssignabilityChecker;
pub use resolve::{CallSite, MemberResolver, ResolutionError, ResolvedMember, is_more_specific};
pub use type_expr::{TypeExpr, TypeExprError};
pub use types::{
    DeclId, Member, MemberFlags, MemberIdentity, ParamList, TypeData, TypeId, TypeListId,
};

// Test modules: most are loaded by their source files via #[path = "tests/..."].
#[cfg(test)]
#[path = "../tests/fixtures.rs"]
pub(crate) mod fixtures;
#[cfg(test)]
#[path = "../tests/concurrent_tests.rs"]
mod concurrent_tests;
