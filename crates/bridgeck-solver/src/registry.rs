//! Type Registry.
//!
//! Two phases, two types:
//!
//! - `RegistryBuilder` accepts declarations one at a time. `register`
//!   rejects duplicate names and any declaration whose supertypes can
//!   already reach it (a cycle). Supertypes may name declarations that are
//!   registered later.
//! - `freeze` resolves every type reference, checks type-argument counts,
//!   assigns `DeclId`s in registration order and returns an immutable
//!   `TypeRegistry`. Nothing downstream accepts a builder.
//!
//! The top type and the intrinsic leaf types (`String`, `int`, ...) are
//! synthesized at freeze time unless a declaration with that name was
//! registered, so callers may give them members of their own.

use crate::declaration::DeclarationInput;
use crate::error::HierarchyError;
use crate::inheritance::SupertypeGraph;
use crate::instantiate::Instantiation;
use crate::intern::TypeInterner;
use crate::type_expr::TypeExpr;
use crate::types::{DeclId, Member, ParamList, TypeData, TypeId, TypeListId};
use bridgeck_common::Atom;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, trace};

/// A declared supertype: a declaration applied to arguments written in
/// terms of the child's own type parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SupertypeRef {
    pub decl: DeclId,
    pub args: TypeListId,
}

/// A frozen interface declaration.
#[derive(Clone, Debug)]
pub struct TypeDeclaration {
    pub id: DeclId,
    pub name: Atom,
    pub type_params: SmallVec<[Atom; 2]>,
    /// Declared supertypes, in declaration order.
    pub supertypes: Vec<SupertypeRef>,
    /// Locally declared members, in declaration order.
    pub members: Vec<Member>,
    /// True for the top type and intrinsics created by `freeze`.
    pub synthetic: bool,
}

impl TypeDeclaration {
    #[inline]
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }
}

/// Names visible while lowering a type expression.
///
/// Inside a declaration the owner's type parameters shadow declarations of
/// the same name; at a call site the call's rigid type variables do.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoweringScope<'a> {
    owner: Option<DeclId>,
    params: &'a [Atom],
    vars: &'a [Atom],
}

impl<'a> LoweringScope<'a> {
    /// Scope with no type parameters or variables (concrete types only).
    pub fn global() -> Self {
        Self::default()
    }

    pub fn declaration(decl: &'a TypeDeclaration) -> Self {
        LoweringScope {
            owner: Some(decl.id),
            params: &decl.type_params,
            vars: &[],
        }
    }

    pub fn call_site(vars: &'a [Atom]) -> Self {
        LoweringScope {
            owner: None,
            params: &[],
            vars,
        }
    }
}

// =============================================================================
// RegistryBuilder
// =============================================================================

pub struct RegistryBuilder {
    types: TypeInterner,
    top: Atom,
    intrinsics: Vec<Atom>,
    pending: Vec<(Atom, DeclarationInput)>,
    by_name: FxHashMap<Atom, usize>,
    graph: SupertypeGraph<Atom>,
}

impl RegistryBuilder {
    /// Create a builder whose top type is `top` and which synthesizes each
    /// of `intrinsics` if it is never registered.
    pub fn new(top: &str, intrinsics: &[&str]) -> Self {
        let types = TypeInterner::new();
        let top = types.intern_name(top);
        let intrinsics = intrinsics
            .iter()
            .map(|name| types.intern_name(name))
            .filter(|&name| name != top)
            .collect();
        RegistryBuilder {
            types,
            top,
            intrinsics,
            pending: Vec::new(),
            by_name: FxHashMap::default(),
            graph: SupertypeGraph::new(),
        }
    }

    /// Register one declaration.
    pub fn register(&mut self, decl: DeclarationInput) -> Result<(), HierarchyError> {
        let name = self.types.intern_name(&decl.name);
        if self.by_name.contains_key(&name) {
            return Err(HierarchyError::DuplicateDeclaration { name: decl.name });
        }

        let parents: SmallVec<[Atom; 4]> = decl
            .supertypes
            .iter()
            .map(|s| self.types.intern_name(&s.name))
            .collect();
        if let Some(cycle) = self.graph.would_create_cycle(name, &parents) {
            let cycle = cycle
                .into_iter()
                .map(|atom| self.types.resolve_name(atom).to_string())
                .collect();
            return Err(HierarchyError::CyclicHierarchy {
                name: decl.name,
                cycle,
            });
        }

        trace!(
            name = %decl.name,
            supertypes = parents.len(),
            members = decl.members.len(),
            "RegistryBuilder::register"
        );
        self.graph.add_edges(name, &parents);
        self.by_name.insert(name, self.pending.len());
        self.pending.push((name, decl));
        Ok(())
    }

    /// Register declarations in order, stopping at the first rejection.
    pub fn register_all(
        &mut self,
        decls: impl IntoIterator<Item = DeclarationInput>,
    ) -> Result<(), HierarchyError> {
        for decl in decls {
            self.register(decl)?;
        }
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.types
            .names
            .get(name)
            .is_some_and(|atom| self.by_name.contains_key(&atom))
    }

    /// Resolve all references and produce the frozen registry.
    pub fn freeze(self) -> Result<TypeRegistry, HierarchyError> {
        let RegistryBuilder {
            types,
            top,
            intrinsics,
            pending,
            by_name: _,
            graph: _,
        } = self;

        let mut decls: Vec<TypeDeclaration> = Vec::with_capacity(pending.len() + 8);
        let mut by_name: FxHashMap<Atom, DeclId> = FxHashMap::default();
        let declared: FxHashSet<Atom> = pending.iter().map(|(name, _)| *name).collect();

        // Synthesized leaves first so the top type is always DeclId(0) unless
        // the caller declared it.
        for name in std::iter::once(top).chain(intrinsics.iter().copied()) {
            if declared.contains(&name) || by_name.contains_key(&name) {
                continue;
            }
            let id = DeclId(decls.len() as u32);
            by_name.insert(name, id);
            decls.push(TypeDeclaration {
                id,
                name,
                type_params: SmallVec::new(),
                supertypes: Vec::new(),
                members: Vec::new(),
                synthetic: true,
            });
        }

        for (name, input) in &pending {
            let id = DeclId(decls.len() as u32);
            by_name.insert(*name, id);
            decls.push(TypeDeclaration {
                id,
                name: *name,
                type_params: input
                    .type_parameters
                    .iter()
                    .map(|p| types.intern_name(p))
                    .collect(),
                supertypes: Vec::new(),
                members: Vec::new(),
                synthetic: false,
            });
        }

        let top_decl = by_name[&top];
        let top_type = types.named(top_decl, &[]);
        let mut registry = TypeRegistry {
            types,
            decls,
            by_name,
            graph: SupertypeGraph::new(),
            top: top_decl,
            top_type,
        };

        // Lower against the skeleton, then fill the declarations in.
        let mut lowered = Vec::with_capacity(pending.len());
        for (name, input) in &pending {
            let id = registry.by_name[name];
            let decl = registry.decl(id);
            let scope = LoweringScope::declaration(decl);

            let mut supertypes = Vec::with_capacity(input.supertypes.len());
            for supertype in &input.supertypes {
                let expr = supertype.as_type_expr();
                let ty = registry.lower_supertype(&expr, &scope)?;
                supertypes.push(ty);
            }

            let mut members = Vec::with_capacity(input.members.len());
            for (order, member) in input.members.iter().enumerate() {
                let params = member
                    .parameters
                    .iter()
                    .map(|p| registry.lower(p, &scope))
                    .collect::<Result<ParamList, _>>()?;
                let return_type = registry.lower(&member.return_type, &scope)?;
                members.push(Member {
                    owner: id,
                    name: registry.types.intern_name(&member.name),
                    params,
                    return_type,
                    flags: member.flags(),
                    order: order as u32,
                });
            }
            lowered.push((id, supertypes, members));
        }

        for (id, supertypes, members) in lowered {
            let parents: SmallVec<[DeclId; 4]> = supertypes.iter().map(|s| s.decl).collect();
            registry.graph.add_edges(id, &parents);
            let decl = &mut registry.decls[id.index()];
            decl.supertypes = supertypes;
            decl.members = members;
        }

        debug!(
            declarations = registry.decls.len(),
            synthesized = registry.decls.iter().filter(|d| d.synthetic).count(),
            "TypeRegistry frozen"
        );
        Ok(registry)
    }
}

// =============================================================================
// TypeRegistry
// =============================================================================

/// The frozen registry.
///
/// Declarations never change after `freeze`. The interner inside keeps
/// accepting new instantiations, which is append-only and does not affect
/// any existing `TypeId`.
pub struct TypeRegistry {
    types: TypeInterner,
    decls: Vec<TypeDeclaration>,
    by_name: FxHashMap<Atom, DeclId>,
    graph: SupertypeGraph<DeclId>,
    top: DeclId,
    top_type: TypeId,
}

impl TypeRegistry {
    #[inline]
    pub fn types(&self) -> &TypeInterner {
        &self.types
    }

    /// Look up a declaration by name.
    pub fn lookup(&self, name: &str) -> Result<&TypeDeclaration, HierarchyError> {
        self.types
            .names
            .get(name)
            .and_then(|atom| self.by_name.get(&atom))
            .map(|&id| self.decl(id))
            .ok_or_else(|| HierarchyError::UnknownType {
                name: name.to_string(),
            })
    }

    /// Panics for an id this registry did not assign. Ids from outside the
    /// registry go through `get_decl`.
    #[inline]
    pub fn decl(&self, id: DeclId) -> &TypeDeclaration {
        &self.decls[id.index()]
    }

    #[inline]
    pub fn get_decl(&self, id: DeclId) -> Option<&TypeDeclaration> {
        self.decls.get(id.index())
    }

    pub fn decl_by_name(&self, name: Atom) -> Option<DeclId> {
        self.by_name.get(&name).copied()
    }

    /// All declarations in `DeclId` order.
    pub fn declarations(&self) -> &[TypeDeclaration] {
        &self.decls
    }

    pub fn graph(&self) -> &SupertypeGraph<DeclId> {
        &self.graph
    }

    #[inline]
    pub fn top(&self) -> DeclId {
        self.top
    }

    #[inline]
    pub fn top_type(&self) -> TypeId {
        self.top_type
    }

    pub fn name_of(&self, id: DeclId) -> Arc<str> {
        self.types.resolve_name(self.decl(id).name)
    }

    /// Lower a type expression to an interned type.
    ///
    /// Fails with `UnknownType` for names that are neither in scope nor
    /// registered, and `ArityMismatch` when a declaration is applied to the
    /// wrong number of arguments.
    pub fn lower(&self, expr: &TypeExpr, scope: &LoweringScope<'_>) -> Result<TypeId, HierarchyError> {
        let name = self.types.names.get(&expr.name);

        if expr.is_simple() {
            if let Some(name) = name {
                if let Some(owner) = scope.owner {
                    if let Some(index) = scope.params.iter().position(|&p| p == name) {
                        return Ok(self.types.param(owner, index as u32));
                    }
                }
                if scope.vars.contains(&name) {
                    return Ok(self.types.var(name));
                }
            }
        }

        let decl = name
            .and_then(|atom| self.decl_by_name(atom))
            .ok_or_else(|| HierarchyError::UnknownType {
                name: expr.name.clone(),
            })?;
        let expected = self.decl(decl).arity();
        if expected != expr.args.len() {
            return Err(HierarchyError::ArityMismatch {
                name: expr.name.clone(),
                expected,
                found: expr.args.len(),
            });
        }

        let args = expr
            .args
            .iter()
            .map(|arg| self.lower(arg, scope))
            .collect::<Result<ParamList, _>>()?;
        Ok(self.types.named(decl, &args))
    }

    /// Lower a supertype reference; the head must be a declaration, never
    /// one of the child's type parameters.
    fn lower_supertype(
        &self,
        expr: &TypeExpr,
        scope: &LoweringScope<'_>,
    ) -> Result<SupertypeRef, HierarchyError> {
        let head_is_param = self
            .types
            .names
            .get(&expr.name)
            .is_some_and(|atom| scope.params.contains(&atom));
        if head_is_param {
            return Err(HierarchyError::UnknownType {
                name: expr.name.clone(),
            });
        }
        let ty = self.lower(expr, scope)?;
        match self.types.lookup(ty) {
            Some(TypeData::Named { decl, args }) => Ok(SupertypeRef { decl, args }),
            _ => Err(HierarchyError::UnknownType {
                name: expr.name.clone(),
            }),
        }
    }

    /// Instantiate a declaration by name with already-lowered arguments.
    pub fn instantiate(&self, name: &str, args: &[TypeId]) -> Result<Instantiation, HierarchyError> {
        let decl = self.lookup(name)?;
        Instantiation::new(self, decl.id, args)
    }

    /// The declaration applied to rigid variables named after its own type
    /// parameters: `Collection<E>` with `E` a `Var`.
    ///
    /// Used wherever a declaration must be examined "for all arguments":
    /// bridge validation and memo warm-up.
    pub fn generic_instantiation(&self, id: DeclId) -> Instantiation {
        let decl = self.decl(id);
        let args: ParamList = decl.type_params.iter().map(|&p| self.types.var(p)).collect();
        Instantiation::from_parts(self, id, &args)
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
