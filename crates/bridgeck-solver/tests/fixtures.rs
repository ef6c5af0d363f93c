//! Shared declarations for solver unit tests.

use crate::bridge::BridgeTable;
use crate::declaration::{DeclarationInput, MemberInput, Modifier, SupertypeInput};
use crate::flatten::HierarchyFlattener;
use crate::instantiate::Instantiation;
use crate::registry::{RegistryBuilder, TypeRegistry};
use crate::type_expr::TypeExpr;
use crate::types::{ParamList, TypeId};
use std::sync::Arc;

pub(crate) fn ty(text: &str) -> TypeExpr {
    text.parse().expect("valid type expression")
}

pub(crate) fn method(name: &str, params: &[&str], ret: &str) -> MemberInput {
    MemberInput::new(name, params.iter().map(|p| ty(p)).collect(), ty(ret))
}

pub(crate) fn iface(
    name: &str,
    params: &[&str],
    supertypes: &[&str],
    members: Vec<MemberInput>,
) -> DeclarationInput {
    let mut decl = DeclarationInput::interface(name, params);
    for s in supertypes {
        decl = decl.with_supertype(SupertypeInput::from(ty(s)));
    }
    for m in members {
        decl = decl.with_member(m);
    }
    decl
}

pub(crate) fn builder() -> RegistryBuilder {
    RegistryBuilder::new("Object", &["String", "bool", "int", "void"])
}

/// The read-only `ICollection` / mutable `CCollection` pair.
pub(crate) fn collection_declarations() -> Vec<DeclarationInput> {
    vec![
        iface(
            "Iterator",
            &["E"],
            &[],
            vec![method("hasNext", &[], "bool"), method("next", &[], "E")],
        ),
        iface("Collection", &["E"], &[], vec![]),
        iface(
            "ICollection",
            &["E"],
            &[],
            vec![
                method("iterator", &[], "Iterator<E>"),
                method("addAll", &["Collection<E>"], "bool"),
                method("add", &["E"], "bool"),
                method("isEmpty", &[], "bool"),
                method("clear", &[], "void"),
            ],
        ),
        iface(
            "CCollection",
            &["E"],
            &["ICollection<E>"],
            vec![
                method("getSize", &[], "int"),
                method("contains", &["E"], "bool").with_modifiers(&[Modifier::Abstract]),
                method("contains", &["Object"], "bool")
                    .with_modifiers(&[Modifier::Final, Modifier::Default]),
            ],
        ),
    ]
}

pub(crate) fn collection_registry() -> Arc<TypeRegistry> {
    let mut builder = builder();
    builder
        .register_all(collection_declarations())
        .expect("collection declarations register");
    Arc::new(builder.freeze().expect("collection registry freezes"))
}

pub(crate) struct Session {
    pub registry: Arc<TypeRegistry>,
    pub flattener: HierarchyFlattener,
    pub bridges: BridgeTable,
}

impl Session {
    pub(crate) fn new(registry: Arc<TypeRegistry>, bridges: &[(&str, &str)]) -> Self {
        let flattener = HierarchyFlattener::new(Arc::clone(&registry));
        let pairs: Vec<_> = bridges
            .iter()
            .map(|(ro, m)| {
                (
                    registry.lookup(ro).expect("read-only side").id,
                    registry.lookup(m).expect("mutable side").id,
                )
            })
            .collect();
        let bridges = BridgeTable::build(&flattener, &pairs).expect("bridges validate");
        Session {
            registry,
            flattener,
            bridges,
        }
    }

    pub(crate) fn collections() -> Self {
        Self::new(collection_registry(), &[("ICollection", "CCollection")])
    }

    pub(crate) fn concrete(&self, text: &str) -> TypeId {
        self.registry
            .lower(&ty(text), &crate::registry::LoweringScope::global())
            .expect("concrete type lowers")
    }

    pub(crate) fn var(&self, name: &str) -> TypeId {
        let types = self.registry.types();
        types.var(types.intern_name(name))
    }

    pub(crate) fn receiver(&self, name: &str, args: &[TypeId]) -> Instantiation {
        self.registry.instantiate(name, args).expect("receiver instantiates")
    }

    pub(crate) fn call(&self, receiver: Instantiation, member: &str, args: &[TypeId]) -> crate::resolve::CallSite {
        crate::resolve::CallSite {
            receiver,
            member: self.registry.types().intern_name(member),
            arguments: args.iter().copied().collect::<ParamList>(),
        }
    }
}
