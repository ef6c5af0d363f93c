//! Assignability between argument and parameter types.
//!
//! `source` is assignable to `target` when:
//! - they are the same type;
//! - `target` is the top type;
//! - `source` is a `Named` type and `target` is reachable by walking declared
//!   supertypes (arguments substituted edge by edge, compared invariantly);
//! - or `source` is a mutable declaration whose bridged read-only counterpart
//!   with the same arguments is reachable as above.
//!
//! Rigid variables and unsubstituted parameters are only assignable to
//! themselves and to the top type.
//!
//! The walk is bounded even when a read-only declaration inherits from its
//! own mutable counterpart with growing arguments.

use crate::bridge::BridgeTable;
use crate::format::TypeFormatter;
use crate::instantiate::Instantiation;
use crate::registry::TypeRegistry;
use crate::types::TypeId;
use bridgeck_common::limits::MAX_WIDENING_STEPS;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::warn;

pub struct AssignabilityChecker<'a> {
    registry: &'a TypeRegistry,
    bridges: Option<&'a BridgeTable>,
}

impl<'a> AssignabilityChecker<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        AssignabilityChecker {
            registry,
            bridges: None,
        }
    }

    /// Also widen mutable instantiations to their read-only counterparts.
    pub fn with_bridges(mut self, bridges: &'a BridgeTable) -> Self {
        self.bridges = Some(bridges);
        self
    }

    pub fn is_assignable(&self, source: TypeId, target: TypeId) -> bool {
        if source == target || target == self.registry.top_type() {
            return true;
        }
        let types = self.registry.types();
        let Some(start) = Instantiation::from_type(types, source) else {
            return false;
        };
        let Some(goal) = Instantiation::from_type(types, target) else {
            return false;
        };
        // Nominal rejection before walking: the target's declaration must be
        // an ancestor (or a bridge counterpart of one).
        if !self.may_reach(start, goal) {
            return false;
        }

        // Without a cycle through bridge edges every path visits distinct
        // declarations, so no path is longer than the declaration count.
        // With one, arguments may grow forever; both bounds stop the walk.
        let max_level = self.registry.declarations().len();
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::new();
        queue.push_back((start, 0));
        while let Some((inst, level)) = queue.pop_front() {
            if inst.type_id == target {
                return true;
            }
            if level >= max_level || !seen.insert(inst.type_id) {
                continue;
            }
            if seen.len() > MAX_WIDENING_STEPS {
                warn!(
                    source = %TypeFormatter::new(self.registry).format_type(source),
                    target = %TypeFormatter::new(self.registry).format_type(target),
                    "widening step limit reached"
                );
                return false;
            }
            let subst = inst.substitution(types);
            for &supertype in &self.registry.decl(inst.decl).supertypes {
                queue.push_back((subst.apply_supertype(self.registry, supertype), level + 1));
            }
            if let Some(read_only) = self
                .bridges
                .and_then(|table| table.read_only_counterpart(inst.decl))
            {
                let widened = Instantiation::from_parts(self.registry, read_only, &inst.type_args(types));
                queue.push_back((widened, level + 1));
            }
        }
        false
    }

    fn may_reach(&self, start: Instantiation, goal: Instantiation) -> bool {
        if start.decl == goal.decl {
            // Same declaration, different arguments: invariant.
            return false;
        }
        if self.bridges.is_some() {
            return true;
        }
        self.registry.graph().is_derived_from(start.decl, goal.decl)
    }

    /// `a` is assignable to `b` but not the other way round.
    pub fn is_strictly_narrower(&self, a: TypeId, b: TypeId) -> bool {
        self.is_assignable(a, b) && !self.is_assignable(b, a)
    }
}

#[cfg(test)]
#[path = "../tests/relation_tests.rs"]
mod tests;
