//! Generic instantiation and type substitution.
//!
//! A `TypeSubstitution` maps the type parameters of one declaration to
//! concrete arguments. Applying it to a declared signature replaces every
//! `Param { owner, .. }` of that declaration, recursing through applied
//! types, and leaves everything else alone.

use crate::error::HierarchyError;
use crate::intern::TypeInterner;
use crate::registry::{SupertypeRef, TypeRegistry};
use crate::types::{DeclId, Member, ParamList, TypeData, TypeId, TypeListId};
use std::sync::Arc;

/// A declaration applied to type arguments: the receiver of a lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instantiation {
    pub decl: DeclId,
    pub args: TypeListId,
    /// The interned `Named { decl, args }`.
    pub type_id: TypeId,
}

impl Instantiation {
    /// Apply `decl` to `args`, checking the argument count.
    pub fn new(registry: &TypeRegistry, decl: DeclId, args: &[TypeId]) -> Result<Self, HierarchyError> {
        let declaration = registry.get_decl(decl).ok_or_else(|| HierarchyError::UnknownType {
            name: format!("#{}", decl.0),
        })?;
        if declaration.arity() != args.len() {
            return Err(HierarchyError::ArityMismatch {
                name: registry.name_of(decl).to_string(),
                expected: declaration.arity(),
                found: args.len(),
            });
        }
        Ok(Self::from_parts(registry, decl, args))
    }

    pub(crate) fn from_parts(registry: &TypeRegistry, decl: DeclId, args: &[TypeId]) -> Self {
        let types = registry.types();
        let args = types.intern_type_list(args);
        Instantiation {
            decl,
            args,
            type_id: types.intern(TypeData::Named { decl, args }),
        }
    }

    /// View an interned type as an instantiation. `None` for parameters and
    /// call-site variables.
    pub fn from_type(types: &TypeInterner, ty: TypeId) -> Option<Self> {
        match types.lookup(ty)? {
            TypeData::Named { decl, args } => Some(Instantiation {
                decl,
                args,
                type_id: ty,
            }),
            _ => None,
        }
    }

    pub fn type_args(&self, types: &TypeInterner) -> Arc<[TypeId]> {
        types.type_list(self.args)
    }

    /// The substitution that maps the declaration's parameters to this
    /// instantiation's arguments.
    pub fn substitution(&self, types: &TypeInterner) -> TypeSubstitution {
        TypeSubstitution {
            owner: self.decl,
            args: self.type_args(types),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TypeSubstitution {
    owner: DeclId,
    args: Arc<[TypeId]>,
}

impl TypeSubstitution {
    pub fn new(owner: DeclId, args: Arc<[TypeId]>) -> Self {
        TypeSubstitution { owner, args }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.args.is_empty()
    }

    pub fn apply(&self, types: &TypeInterner, ty: TypeId) -> TypeId {
        if self.is_identity() {
            return ty;
        }
        match types.lookup(ty) {
            Some(TypeData::Param { owner, index }) if owner == self.owner => {
                self.args.get(index as usize).copied().unwrap_or(ty)
            }
            Some(TypeData::Named { decl, args }) if args != TypeListId::EMPTY => {
                let inner = types.type_list(args);
                let substituted: ParamList = inner.iter().map(|&arg| self.apply(types, arg)).collect();
                if substituted.as_slice() == &*inner {
                    ty
                } else {
                    types.named(decl, &substituted)
                }
            }
            _ => ty,
        }
    }

    /// Substitute a declared member's signature. The owner and modifiers
    /// are kept.
    pub fn apply_member(&self, types: &TypeInterner, member: &Member) -> Member {
        if self.is_identity() {
            return member.clone();
        }
        Member {
            params: member.params.iter().map(|&p| self.apply(types, p)).collect(),
            return_type: self.apply(types, member.return_type),
            ..member.clone()
        }
    }

    /// Instantiate a declared supertype for this substitution's receiver:
    /// `Collection<E>` under `{E := String}` becomes `Collection<String>`.
    pub fn apply_supertype(&self, registry: &TypeRegistry, supertype: SupertypeRef) -> Instantiation {
        let types = registry.types();
        let declared = types.type_list(supertype.args);
        let args: ParamList = declared.iter().map(|&arg| self.apply(types, arg)).collect();
        Instantiation::from_parts(registry, supertype.decl, &args)
    }
}
