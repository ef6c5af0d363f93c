//! Hierarchy Flattener.
//!
//! `flatten(inst)` is the ordered, de-duplicated member set of an
//! instantiation:
//!
//! 1. the declaration's own members, substituted for `inst`;
//! 2. then, for each declared supertype in order, the supertype's own
//!    flattening, where the supertype's arguments were first substituted
//!    with `inst`'s bindings.
//!
//! A member is kept only if no earlier member has the same identity
//! (name + substituted parameter list), so a member reached through both
//! arms of a diamond appears once, at its first position.
//!
//! Results are memoized per instantiation in a `DashMap`. Concurrent callers
//! may compute the same flattening twice; the first insert wins and every
//! later caller sees that value.

use crate::instantiate::{Instantiation, TypeSubstitution};
use crate::intern::TypeInterner;
use crate::registry::TypeRegistry;
use crate::types::{Member, MemberIdentity, TypeId};
use bridgeck_common::limits::FLATTEN_INITIAL_CAPACITY;
use dashmap::DashMap;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Memo counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenStats {
    pub hits: u64,
    pub misses: u64,
    /// Distinct instantiations currently memoized.
    pub cached: usize,
}

/// An instantiation whose supertypes are still being flattened.
struct Frame {
    inst: Instantiation,
    subst: TypeSubstitution,
    next: usize,
}

impl Frame {
    fn new(inst: Instantiation, types: &TypeInterner) -> Self {
        Frame {
            subst: inst.substitution(types),
            inst,
            next: 0,
        }
    }
}

pub struct HierarchyFlattener {
    registry: Arc<TypeRegistry>,
    memo: DashMap<TypeId, Arc<[Member]>, FxBuildHasher>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl HierarchyFlattener {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        HierarchyFlattener {
            registry,
            memo: DashMap::default(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// The full member set of `inst`.
    ///
    /// Supertypes are flattened first with an explicit stack, so a chain of
    /// any length is walked without recursion. Supertype edges always lead to
    /// a declaration strictly higher in the acyclic graph, so the walk ends.
    pub fn flatten(&self, inst: &Instantiation) -> Arc<[Member]> {
        if let Some(cached) = self.memoized(inst) {
            return cached;
        }

        let registry = &*self.registry;
        let types = registry.types();
        let mut stack: Vec<Frame> = vec![Frame::new(*inst, types)];
        while let Some(frame) = stack.last_mut() {
            let supertypes = &registry.decl(frame.inst.decl).supertypes;
            if let Some(&supertype) = supertypes.get(frame.next) {
                frame.next += 1;
                let parent = frame.subst.apply_supertype(registry, supertype);
                if self.memoized(&parent).is_none() {
                    stack.push(Frame::new(parent, types));
                }
                continue;
            }

            let done = frame.inst;
            stack.pop();
            if !self.memo.contains_key(&done.type_id) {
                self.misses.fetch_add(1, Ordering::Relaxed);
                let members = self.compute(&done);
                // The entry guard is not held while computing; another thread
                // may have inserted in the meantime and its value is kept.
                self.memo.entry(done.type_id).or_insert(members);
            }
        }

        match self.memo.get(&inst.type_id) {
            Some(members) => Arc::clone(members.value()),
            None => self.compute(inst),
        }
    }

    fn memoized(&self, inst: &Instantiation) -> Option<Arc<[Member]>> {
        let cached = self.memo.get(&inst.type_id)?;
        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(Arc::clone(cached.value()))
    }

    /// Own members, then every supertype's memoized flattening in order.
    fn compute(&self, inst: &Instantiation) -> Arc<[Member]> {
        let registry = &*self.registry;
        let types = registry.types();
        let decl = registry.decl(inst.decl);
        let subst = inst.substitution(types);

        let mut collected: IndexMap<MemberIdentity, Member, FxBuildHasher> =
            IndexMap::with_capacity_and_hasher(FLATTEN_INITIAL_CAPACITY, FxBuildHasher);

        for member in &decl.members {
            let member = subst.apply_member(types, member);
            collected.entry(member.identity()).or_insert(member);
        }

        for &supertype in &decl.supertypes {
            let parent = subst.apply_supertype(registry, supertype);
            let inherited = match self.memo.get(&parent.type_id) {
                Some(members) => Arc::clone(members.value()),
                None => self.flatten(&parent),
            };
            for member in inherited.iter() {
                collected
                    .entry(member.identity())
                    .or_insert_with(|| member.clone());
            }
        }

        trace!(
            decl = %registry.name_of(inst.decl),
            own = decl.members.len(),
            total = collected.len(),
            "flattened"
        );
        collected.into_values().collect()
    }

    /// Flatten every declaration's generic instantiation so the resolution
    /// phase starts with a warm memo. Returns the number of declarations
    /// visited.
    pub fn prewarm(&self) -> usize {
        let registry = Arc::clone(&self.registry);
        let decls = registry.declarations();
        for decl in decls {
            let inst = registry.generic_instantiation(decl.id);
            self.flatten(&inst);
        }
        debug!(declarations = decls.len(), cached = self.memo.len(), "flatten memo warmed");
        decls.len()
    }

    pub fn stats(&self) -> FlattenStats {
        FlattenStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            cached: self.memo.len(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/flatten_tests.rs"]
mod tests;
