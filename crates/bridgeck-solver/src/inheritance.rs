//! Declared-supertype graph.
//!
//! An explicit adjacency structure over declaration identifiers. The
//! builder keeps one keyed by name, since supertypes may be referenced
//! before they are registered; the frozen registry keeps one keyed by
//! `DeclId` for fast "is X an ancestor of Y" rejection during widening.
//!
//! Acyclicity is enforced at insertion: a node is added together with all of
//! its outgoing edges, after checking that none of its supertypes can reach
//! it through edges that already exist.

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use smallvec::SmallVec;
use std::hash::Hash;

type Parents<N> = SmallVec<[N; 4]>;

#[derive(Clone, Debug)]
pub struct SupertypeGraph<N> {
    /// child -> declared supertypes, in declaration order.
    edges: IndexMap<N, Parents<N>, FxBuildHasher>,
}

impl<N> Default for SupertypeGraph<N> {
    fn default() -> Self {
        SupertypeGraph {
            edges: IndexMap::default(),
        }
    }
}

impl<N> SupertypeGraph<N>
where
    N: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `child`'s declared supertypes. Replaces any earlier entry.
    pub fn add_edges(&mut self, child: N, parents: &[N]) {
        self.edges.insert(child, parents.iter().copied().collect());
    }

    pub fn contains(&self, node: N) -> bool {
        self.edges.contains_key(&node)
    }

    /// Direct supertypes of `node`, in declaration order.
    pub fn parents(&self, node: N) -> &[N] {
        self.edges.get(&node).map(|p| p.as_slice()).unwrap_or(&[])
    }

    /// Check whether adding `child -> parents` would close a cycle.
    ///
    /// Returns the offending path `child -> ... -> child` if so.
    pub fn would_create_cycle(&self, child: N, parents: &[N]) -> Option<Vec<N>> {
        if parents.contains(&child) {
            return Some(vec![child, child]);
        }
        for &parent in parents {
            if let Some(path) = self.path(parent, child) {
                let mut cycle = Vec::with_capacity(path.len() + 1);
                cycle.push(child);
                cycle.extend(path);
                return Some(cycle);
            }
        }
        None
    }

    /// True if `ancestor` is reachable from `child` through one or more edges.
    pub fn is_derived_from(&self, child: N, ancestor: N) -> bool {
        self.parents(child)
            .iter()
            .any(|&parent| self.path(parent, ancestor).is_some())
    }

    /// A path `from -> ... -> to` (inclusive) over existing edges, if one exists.
    ///
    /// Depth-first in declared parent order, with an explicit stack so chains
    /// of any length are walked without recursion.
    pub fn path(&self, from: N, to: N) -> Option<Vec<N>> {
        if from == to {
            return Some(vec![from]);
        }
        let mut visited = FxHashSet::default();
        visited.insert(from);
        // (node, index of the next parent to try)
        let mut stack: Vec<(N, usize)> = vec![(from, 0)];
        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            let Some(&parent) = self.parents(node).get(next) else {
                stack.pop();
                continue;
            };
            top.1 += 1;
            if parent == to {
                let mut path: Vec<N> = stack.iter().map(|&(n, _)| n).collect();
                path.push(parent);
                return Some(path);
            }
            if visited.insert(parent) {
                stack.push((parent, 0));
            }
        }
        None
    }

    /// Every node reachable from `node` (excluding itself), first-visit order.
    pub fn ancestors(&self, node: N) -> Vec<N> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        let mut stack: Vec<N> = self.parents(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if !seen.insert(next) {
                continue;
            }
            out.push(next);
            stack.extend(self.parents(next).iter().rev().copied());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/inheritance_tests.rs"]
mod tests;
