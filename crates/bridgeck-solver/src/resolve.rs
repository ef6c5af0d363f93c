//! Member Resolver.
//!
//! Resolution of one call site is a pure function of the frozen flattened
//! member set and the call's argument types:
//!
//! 1. candidates: flattened members with the requested name and arity;
//! 2. applicable: candidates whose parameters accept every argument;
//! 3. maximal: applicable candidates no other applicable candidate is more
//!    specific than. One maximal candidate is the answer; more is ambiguous.
//!
//! Candidate lists are always reported in flattening order.

use crate::bridge::BridgeTable;
use crate::flatten::HierarchyFlattener;
use crate::instantiate::Instantiation;
use crate::relation::AssignabilityChecker;
use crate::types::{DeclId, Member, ParamList, TypeId};
use bridgeck_common::Atom;
use bridgeck_common::diagnostics::diagnostic_codes;
use tracing::trace;

/// A call through a typed receiver: `receiver.member(arguments...)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallSite {
    pub receiver: Instantiation,
    pub member: Atom,
    pub arguments: ParamList,
}

/// The selected member, substituted for the receiver's type arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedMember {
    pub receiver: TypeId,
    pub member: Member,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionError {
    /// No member with this name and arity.
    UnknownMember {
        receiver: TypeId,
        name: Atom,
        arity: usize,
        /// Set when the receiver is read-only and its mutable counterpart
        /// adds a member with this name.
        declared_on_mutable: Option<DeclId>,
    },
    NoApplicableOverload {
        receiver: TypeId,
        name: Atom,
        arguments: ParamList,
        /// Every name/arity candidate.
        candidates: Vec<Member>,
    },
    AmbiguousOverload {
        receiver: TypeId,
        name: Atom,
        arguments: ParamList,
        /// The tied maximal candidates.
        candidates: Vec<Member>,
    },
}

impl ResolutionError {
    pub fn code(&self) -> u32 {
        match self {
            Self::UnknownMember {
                declared_on_mutable: Some(_),
                ..
            } => diagnostic_codes::UNKNOWN_MEMBER_ON_READ_ONLY,
            Self::UnknownMember { .. } => diagnostic_codes::UNKNOWN_MEMBER,
            Self::NoApplicableOverload { .. } => diagnostic_codes::NO_APPLICABLE_OVERLOAD,
            Self::AmbiguousOverload { .. } => diagnostic_codes::AMBIGUOUS_OVERLOAD,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownMember { .. } => "unknownMember",
            Self::NoApplicableOverload { .. } => "noApplicableOverload",
            Self::AmbiguousOverload { .. } => "ambiguousOverload",
        }
    }
}

pub struct MemberResolver<'a> {
    flattener: &'a HierarchyFlattener,
    bridges: &'a BridgeTable,
}

impl<'a> MemberResolver<'a> {
    pub fn new(flattener: &'a HierarchyFlattener, bridges: &'a BridgeTable) -> Self {
        MemberResolver { flattener, bridges }
    }

    fn relation(&self) -> AssignabilityChecker<'a> {
        AssignabilityChecker::new(self.flattener.registry()).with_bridges(self.bridges)
    }

    /// Flattened members of the receiver matching the call's name and arity.
    /// A call whose member name is the none atom has no candidates.
    pub fn candidates(&self, call: &CallSite) -> Vec<Member> {
        if call.member.is_none() {
            return Vec::new();
        }
        self.flattener
            .flatten(&call.receiver)
            .iter()
            .filter(|m| m.name == call.member && m.arity() == call.arguments.len())
            .cloned()
            .collect()
    }

    pub fn resolve(&self, call: &CallSite) -> Result<ResolvedMember, ResolutionError> {
        let candidates = self.candidates(call);
        if candidates.is_empty() {
            let declared_on_mutable = self
                .bridges
                .mapping(call.receiver.decl)
                .filter(|mapping| mapping.adds_member_named(call.member))
                .map(|mapping| mapping.mutable.decl);
            trace!(candidates = 0, "resolve: unknown member");
            return Err(ResolutionError::UnknownMember {
                receiver: call.receiver.type_id,
                name: call.member,
                arity: call.arguments.len(),
                declared_on_mutable,
            });
        }

        let relation = self.relation();
        let applicable: Vec<&Member> = candidates
            .iter()
            .filter(|m| is_applicable(&relation, m, &call.arguments))
            .collect();
        if applicable.is_empty() {
            trace!(candidates = candidates.len(), "resolve: no applicable overload");
            return Err(ResolutionError::NoApplicableOverload {
                receiver: call.receiver.type_id,
                name: call.member,
                arguments: call.arguments.clone(),
                candidates,
            });
        }

        let mut maximal = find_maximal(&relation, &applicable);
        if maximal.len() == 1 {
            let member = maximal.swap_remove(0).clone();
            trace!(
                candidates = candidates.len(),
                applicable = applicable.len(),
                "resolve: resolved"
            );
            return Ok(ResolvedMember {
                receiver: call.receiver.type_id,
                member,
            });
        }

        trace!(tied = maximal.len(), "resolve: ambiguous overload");
        Err(ResolutionError::AmbiguousOverload {
            receiver: call.receiver.type_id,
            name: call.member,
            arguments: call.arguments.clone(),
            candidates: maximal.into_iter().cloned().collect(),
        })
    }
}

fn is_applicable(relation: &AssignabilityChecker<'_>, member: &Member, arguments: &[TypeId]) -> bool {
    member.params.len() == arguments.len()
        && arguments
            .iter()
            .zip(&member.params)
            .all(|(&arg, &param)| relation.is_assignable(arg, param))
}

/// Applicable members that no other applicable member is more specific than.
fn find_maximal<'m>(relation: &AssignabilityChecker<'_>, applicable: &[&'m Member]) -> Vec<&'m Member> {
    applicable
        .iter()
        .enumerate()
        .filter(|&(i, m)| {
            !applicable
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && is_more_specific(relation, other, m))
        })
        .map(|(_, m)| *m)
        .collect()
}

/// `a` is more specific than `b` when every parameter of `a` is assignable
/// to the matching parameter of `b` and at least one is strictly narrower.
pub fn is_more_specific(relation: &AssignabilityChecker<'_>, a: &Member, b: &Member) -> bool {
    if a.params.len() != b.params.len() {
        return false;
    }
    let mut some_strictly = false;
    for (&pa, &pb) in a.params.iter().zip(&b.params) {
        if !relation.is_assignable(pa, pb) {
            return false;
        }
        if !relation.is_assignable(pb, pa) {
            some_strictly = true;
        }
    }
    some_strictly
}

#[cfg(test)]
#[path = "../tests/resolve_tests.rs"]
mod tests;
