//! Declaration records as produced by the declaration loader.
//!
//! These are the unresolved inputs to `RegistryBuilder::register`. Type
//! references are `TypeExpr`s; nothing here has been checked against the
//! registry yet.

use crate::type_expr::TypeExpr;
use crate::types::MemberFlags;
use serde::{Deserialize, Serialize};

/// An interface declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationInput {
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub supertypes: Vec<SupertypeInput>,
    #[serde(default)]
    pub members: Vec<MemberInput>,
}

impl DeclarationInput {
    pub fn interface(name: impl Into<String>, type_parameters: &[&str]) -> Self {
        DeclarationInput {
            name: name.into(),
            type_parameters: type_parameters.iter().map(|p| (*p).to_string()).collect(),
            supertypes: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_supertype(mut self, supertype: SupertypeInput) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_member(mut self, member: MemberInput) -> Self {
        self.members.push(member);
        self
    }
}

/// A supertype instantiation: `{ name, typeArguments }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupertypeInput {
    pub name: String,
    #[serde(default)]
    pub type_arguments: Vec<TypeExpr>,
}

impl SupertypeInput {
    pub fn new(name: impl Into<String>, type_arguments: Vec<TypeExpr>) -> Self {
        SupertypeInput {
            name: name.into(),
            type_arguments,
        }
    }

    pub fn as_type_expr(&self) -> TypeExpr {
        TypeExpr::applied(self.name.clone(), self.type_arguments.clone())
    }
}

impl From<TypeExpr> for SupertypeInput {
    fn from(expr: TypeExpr) -> Self {
        SupertypeInput {
            name: expr.name,
            type_arguments: expr.args,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Abstract,
    Final,
    Default,
}

impl Modifier {
    pub fn flag(self) -> MemberFlags {
        match self {
            Modifier::Abstract => MemberFlags::ABSTRACT,
            Modifier::Final => MemberFlags::FINAL,
            Modifier::Default => MemberFlags::DEFAULT,
        }
    }
}

/// A locally declared member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<TypeExpr>,
    pub return_type: TypeExpr,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl MemberInput {
    pub fn new(name: impl Into<String>, parameters: Vec<TypeExpr>, return_type: TypeExpr) -> Self {
        MemberInput {
            name: name.into(),
            parameters,
            return_type,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn flags(&self) -> MemberFlags {
        self.modifiers
            .iter()
            .fold(MemberFlags::empty(), |flags, m| flags | m.flag())
    }
}
