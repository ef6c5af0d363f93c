//! Core type representation for the solver.
//!
//! Types are interned: a `TypeId` is a u32 handle and two types are
//! identical exactly when their ids are equal. This is what makes member
//! identity (`name` plus substituted parameter list) a cheap comparison.

use bitflags::bitflags;
use bridgeck_common::Atom;
use bridgeck_common::limits::INLINE_PARAMS;
use serde::Serialize;
use smallvec::SmallVec;

/// Handle to a registered interface declaration.
///
/// Ids are assigned sequentially at freeze time in registration order, so
/// iteration over declarations is deterministic across runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeclId(pub u32);

impl DeclId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interned type handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

/// Interned list of type arguments.
///
/// `TypeListId(0)` is always the empty list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeListId(pub u32);

impl TypeListId {
    pub const EMPTY: TypeListId = TypeListId(0);
}

/// Structural key of an interned type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// A registered declaration applied to type arguments (`Collection<String>`).
    Named { decl: DeclId, args: TypeListId },
    /// The `index`-th type parameter of `owner`, as written inside `owner`.
    ///
    /// Only appears in declared (unsubstituted) member signatures and
    /// supertype references; flattening replaces every `Param` it meets.
    Param { owner: DeclId, index: u32 },
    /// A rigid type variable introduced at a call site, e.g. the `E` of a
    /// generic method `<E> void use(Collection<E> c, E elem)`.
    ///
    /// Only identical to itself and assignable only to the top type.
    Var(Atom),
}

pub type ParamList = SmallVec<[TypeId; INLINE_PARAMS]>;

bitflags! {
    /// Modifiers carried by a member.
    ///
    /// A `FINAL | DEFAULT` member is a bridge: a concrete forwarding
    /// implementation standing next to the abstract, more specific overload
    /// (`contains(Object)` next to `contains(E)`).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u8 {
        const ABSTRACT = 1 << 0;
        const FINAL = 1 << 1;
        const DEFAULT = 1 << 2;
    }
}

impl MemberFlags {
    pub const BRIDGE: MemberFlags = MemberFlags::FINAL.union(MemberFlags::DEFAULT);

    #[inline]
    pub fn is_bridge(self) -> bool {
        self.contains(Self::BRIDGE)
    }

    /// Modifier keywords in canonical order.
    pub fn keywords(self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.contains(Self::ABSTRACT) {
            out.push("abstract");
        }
        if self.contains(Self::FINAL) {
            out.push("final");
        }
        if self.contains(Self::DEFAULT) {
            out.push("default");
        }
        out
    }
}

/// A member signature.
///
/// Inside a `TypeDeclaration` the parameter and return types may mention
/// the owner's `Param`s. Members returned by flattening are fully
/// substituted for the flattened instantiation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Member {
    /// Declaration that introduced the member (not the receiver).
    pub owner: DeclId,
    pub name: Atom,
    pub params: ParamList,
    pub return_type: TypeId,
    pub flags: MemberFlags,
    /// Position within the owner's declared member list. Only used for
    /// deterministic iteration, never for resolution precedence.
    pub order: u32,
}

impl Member {
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The de-duplication key of this member.
    #[inline]
    pub fn identity(&self) -> MemberIdentity {
        MemberIdentity {
            name: self.name,
            params: self.params.clone(),
        }
    }
}

/// Member identity: name plus substituted parameter list (arity is its length).
///
/// Two inherited members with the same identity are the same member; the
/// same name and arity with a different parameter shape is an overload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberIdentity {
    pub name: Atom,
    pub params: ParamList,
}
