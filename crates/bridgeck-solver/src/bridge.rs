//! Bridge Mapper.
//!
//! A bridge pairs a read-only declaration with its mutable counterpart. The
//! mutable flattening must contain every member of the read-only flattening
//! (by identity); the members it adds are the bridge's delta.
//!
//! `BridgeTable` validates every declared pair once, during the build phase,
//! against the generic instantiation of both sides, and answers counterpart
//! queries in both directions afterwards.

use crate::error::HierarchyError;
use crate::flatten::HierarchyFlattener;
use crate::format::TypeFormatter;
use crate::instantiate::Instantiation;
use crate::types::{DeclId, Member, MemberIdentity, ParamList};
use bridgeck_common::Atom;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Clone, Debug)]
pub struct BridgeMapping {
    pub read_only: Instantiation,
    pub mutable: Instantiation,
    /// Members of the mutable flattening with no identical read-only member,
    /// in mutable flattening order.
    pub delta: Arc<[Member]>,
}

impl BridgeMapping {
    pub fn delta_identities(&self) -> FxHashSet<MemberIdentity> {
        self.delta.iter().map(Member::identity).collect()
    }

    /// True if some delta member is called `name`.
    pub fn adds_member_named(&self, name: Atom) -> bool {
        self.delta.iter().any(|m| m.name == name)
    }
}

pub struct BridgeMapper<'a> {
    flattener: &'a HierarchyFlattener,
}

impl<'a> BridgeMapper<'a> {
    pub fn new(flattener: &'a HierarchyFlattener) -> Self {
        BridgeMapper { flattener }
    }

    pub fn bridge(
        &self,
        read_only: &Instantiation,
        mutable: &Instantiation,
    ) -> Result<BridgeMapping, HierarchyError> {
        let registry = &**self.flattener.registry();
        let types = registry.types();
        let fmt = TypeFormatter::new(registry);

        let ro_args = read_only.type_args(types);
        let mut_args = mutable.type_args(types);
        if ro_args.len() != mut_args.len() {
            return Err(HierarchyError::ArityMismatch {
                name: registry.name_of(mutable.decl).to_string(),
                expected: ro_args.len(),
                found: mut_args.len(),
            });
        }
        if ro_args != mut_args {
            return Err(HierarchyError::IncompatibleBridge {
                read_only: fmt.format_instantiation(read_only),
                mutable: fmt.format_instantiation(mutable),
                missing: Vec::new(),
            });
        }

        let ro_members = self.flattener.flatten(read_only);
        let mut_members = self.flattener.flatten(mutable);

        let ro_ids: FxHashSet<MemberIdentity> = ro_members.iter().map(Member::identity).collect();
        let mut_ids: FxHashSet<MemberIdentity> = mut_members.iter().map(Member::identity).collect();

        let missing: Vec<String> = ro_members
            .iter()
            .filter(|m| !mut_ids.contains(&m.identity()))
            .map(|m| fmt.format_member(m))
            .collect();
        if !missing.is_empty() {
            return Err(HierarchyError::IncompatibleBridge {
                read_only: fmt.format_instantiation(read_only),
                mutable: fmt.format_instantiation(mutable),
                missing,
            });
        }

        let delta: Arc<[Member]> = mut_members
            .iter()
            .filter(|m| !ro_ids.contains(&m.identity()))
            .cloned()
            .collect();

        trace!(
            read_only = %fmt.format_instantiation(read_only),
            mutable = %fmt.format_instantiation(mutable),
            delta = delta.len(),
            "bridge"
        );
        Ok(BridgeMapping {
            read_only: *read_only,
            mutable: *mutable,
            delta,
        })
    }
}

/// All validated bridges of a session.
#[derive(Default)]
pub struct BridgeTable {
    mappings: Vec<BridgeMapping>,
    by_read_only: FxHashMap<DeclId, usize>,
    by_mutable: FxHashMap<DeclId, usize>,
}

impl BridgeTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate `(read_only, mutable)` pairs in order. Stops at the first
    /// invalid pair.
    ///
    /// A pair identical to an earlier one is skipped. A declaration mapped to
    /// a different counterpart than before is `DuplicateDeclaration`.
    pub fn build(
        flattener: &HierarchyFlattener,
        pairs: &[(DeclId, DeclId)],
    ) -> Result<BridgeTable, HierarchyError> {
        let registry = &**flattener.registry();
        let mapper = BridgeMapper::new(flattener);
        let mut table = BridgeTable::default();

        for &(read_only, mutable) in pairs {
            if table.mutable_counterpart(read_only) == Some(mutable) {
                trace!(
                    read_only = %registry.name_of(read_only),
                    mutable = %registry.name_of(mutable),
                    "bridge already built"
                );
                continue;
            }
            if table.by_read_only.contains_key(&read_only) {
                return Err(HierarchyError::DuplicateDeclaration {
                    name: registry.name_of(read_only).to_string(),
                });
            }
            if table.by_mutable.contains_key(&mutable) {
                return Err(HierarchyError::DuplicateDeclaration {
                    name: registry.name_of(mutable).to_string(),
                });
            }
            let ro_decl = registry.decl(read_only);
            let mut_decl = registry.decl(mutable);
            if ro_decl.arity() != mut_decl.arity() {
                return Err(HierarchyError::ArityMismatch {
                    name: registry.name_of(mutable).to_string(),
                    expected: ro_decl.arity(),
                    found: mut_decl.arity(),
                });
            }

            // Both sides share rigid variables named after the read-only
            // parameters, so the check holds for every argument list.
            let ro_inst = registry.generic_instantiation(read_only);
            let args: ParamList = ro_inst.type_args(registry.types()).iter().copied().collect();
            let mut_inst = Instantiation::from_parts(registry, mutable, &args);

            let mapping = mapper.bridge(&ro_inst, &mut_inst)?;
            let index = table.mappings.len();
            table.by_read_only.insert(read_only, index);
            table.by_mutable.insert(mutable, index);
            table.mappings.push(mapping);
        }

        debug!(bridges = table.mappings.len(), "bridge table built");
        Ok(table)
    }

    pub fn mapping(&self, read_only: DeclId) -> Option<&BridgeMapping> {
        self.by_read_only.get(&read_only).map(|&i| &self.mappings[i])
    }

    pub fn mutable_counterpart(&self, read_only: DeclId) -> Option<DeclId> {
        self.mapping(read_only).map(|m| m.mutable.decl)
    }

    pub fn read_only_counterpart(&self, mutable: DeclId) -> Option<DeclId> {
        self.by_mutable
            .get(&mutable)
            .map(|&i| self.mappings[i].read_only.decl)
    }

    pub fn mappings(&self) -> &[BridgeMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/bridge_tests.rs"]
mod tests;
