use super::*;
use crate::fixtures::{builder, collection_registry, iface, method, ty};
use crate::types::{MemberFlags, TypeData};

#[test]
fn test_duplicate_declaration_rejected() {
    let mut builder = builder();
    builder.register(iface("List", &["E"], &[], vec![])).unwrap();
    let err = builder.register(iface("List", &[], &[], vec![])).unwrap_err();
    assert_eq!(
        err,
        HierarchyError::DuplicateDeclaration {
            name: "List".to_string()
        }
    );
    assert_eq!(err.code(), bridgeck_common::diagnostics::diagnostic_codes::DUPLICATE_DECLARATION);
    assert!(builder.is_registered("List"));
}

#[test]
fn test_self_supertype_rejected() {
    let mut builder = builder();
    let err = builder
        .register(iface("Loop", &["E"], &["Loop<E>"], vec![]))
        .unwrap_err();
    assert_eq!(
        err,
        HierarchyError::CyclicHierarchy {
            name: "Loop".to_string(),
            cycle: vec!["Loop".to_string(), "Loop".to_string()],
        }
    );
    assert!(!builder.is_registered("Loop"));
}

#[test]
fn test_cycle_through_forward_reference_rejected() {
    let mut builder = builder();
    // A names B before B exists; B then closes the loop.
    builder.register(iface("A", &[], &["B"], vec![])).unwrap();
    let err = builder.register(iface("B", &[], &["A"], vec![])).unwrap_err();
    match err {
        HierarchyError::CyclicHierarchy { name, cycle } => {
            assert_eq!(name, "B");
            assert_eq!(cycle, vec!["B", "A", "B"]);
        }
        other => panic!("expected CyclicHierarchy, got {other:?}"),
    }
}

#[test]
fn test_freeze_reports_unknown_supertype() {
    let mut builder = builder();
    builder.register(iface("A", &[], &["Missing"], vec![])).unwrap();
    let err = builder.freeze().err().expect("freeze fails");
    assert_eq!(
        err,
        HierarchyError::UnknownType {
            name: "Missing".to_string()
        }
    );
}

#[test]
fn test_freeze_reports_supertype_arity_mismatch() {
    let mut builder = builder();
    builder.register(iface("Map", &["K", "V"], &[], vec![])).unwrap();
    builder.register(iface("Bad", &["K"], &["Map<K>"], vec![])).unwrap();
    let err = builder.freeze().err().expect("freeze fails");
    assert_eq!(
        err,
        HierarchyError::ArityMismatch {
            name: "Map".to_string(),
            expected: 2,
            found: 1,
        }
    );
}

#[test]
fn test_type_parameter_cannot_be_a_supertype() {
    let mut builder = builder();
    builder.register(iface("Wrapper", &["T"], &["T"], vec![])).unwrap();
    let err = builder.freeze().err().expect("freeze fails");
    assert_eq!(err, HierarchyError::UnknownType { name: "T".to_string() });
}

#[test]
fn test_top_type_and_intrinsics_synthesized() {
    let registry = collection_registry();
    let top = registry.lookup("Object").unwrap();
    assert!(top.synthetic);
    assert_eq!(top.id, DeclId(0));
    assert_eq!(registry.top(), top.id);
    assert!(registry.lookup("String").unwrap().synthetic);
    assert!(!registry.lookup("ICollection").unwrap().synthetic);
}

#[test]
fn test_declared_intrinsic_is_not_synthesized() {
    let mut builder = builder();
    builder
        .register(iface("String", &[], &[], vec![method("length", &[], "int")]))
        .unwrap();
    let registry = builder.freeze().unwrap();
    let string = registry.lookup("String").unwrap();
    assert!(!string.synthetic);
    assert_eq!(string.members.len(), 1);
    assert_eq!(
        registry
            .declarations()
            .iter()
            .filter(|d| &*registry.name_of(d.id) == "String")
            .count(),
        1
    );
}

#[test]
fn test_ids_follow_registration_order() {
    let registry = collection_registry();
    let ids: Vec<_> = ["Iterator", "Collection", "ICollection", "CCollection"]
        .iter()
        .map(|name| registry.lookup(name).unwrap().id)
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_foreign_decl_id_is_not_found() {
    let registry = collection_registry();
    let foreign = DeclId(registry.declarations().len() as u32 + 7);
    assert!(registry.get_decl(foreign).is_none());
    let iterator = registry.lookup("Iterator").unwrap().id;
    assert_eq!(registry.get_decl(iterator).map(|d| d.id), Some(iterator));
    assert!(matches!(
        Instantiation::new(&registry, foreign, &[]),
        Err(HierarchyError::UnknownType { .. })
    ));
}

#[test]
fn test_lookup_unknown_type() {
    let registry = collection_registry();
    assert_eq!(
        registry.lookup("MutableMap").err(),
        Some(HierarchyError::UnknownType {
            name: "MutableMap".to_string()
        })
    );
}

#[test]
fn test_members_lowered_against_owner_parameters() {
    let registry = collection_registry();
    let decl = registry.lookup("ICollection").unwrap();
    let add = decl
        .members
        .iter()
        .find(|m| &*registry.types().resolve_name(m.name) == "add")
        .unwrap();
    assert_eq!(
        registry.types().lookup(add.params[0]),
        Some(TypeData::Param {
            owner: decl.id,
            index: 0
        })
    );
    assert_eq!(add.owner, decl.id);
    assert_eq!(add.order, 2);
}

#[test]
fn test_member_modifiers_become_flags() {
    let registry = collection_registry();
    let decl = registry.lookup("CCollection").unwrap();
    let flags: Vec<_> = decl.members.iter().map(|m| m.flags).collect();
    assert_eq!(
        flags,
        vec![MemberFlags::empty(), MemberFlags::ABSTRACT, MemberFlags::BRIDGE]
    );
    assert!(flags[2].is_bridge());
}

#[test]
fn test_supertype_arguments_reference_child_parameters() {
    let registry = collection_registry();
    let child = registry.lookup("CCollection").unwrap();
    let parent = registry.lookup("ICollection").unwrap();
    assert_eq!(child.supertypes.len(), 1);
    assert_eq!(child.supertypes[0].decl, parent.id);

    let args = registry.types().type_list(child.supertypes[0].args);
    assert_eq!(
        registry.types().lookup(args[0]),
        Some(TypeData::Param {
            owner: child.id,
            index: 0
        })
    );
    assert!(registry.graph().is_derived_from(child.id, parent.id));
}

#[test]
fn test_lower_in_call_site_scope() {
    let registry = collection_registry();
    let e = registry.types().intern_name("E");
    let vars = [e];
    let scope = LoweringScope::call_site(&vars);

    let lowered = registry.lower(&ty("CCollection<E>"), &scope).unwrap();
    let inst = registry
        .instantiate("CCollection", &[registry.types().var(e)])
        .unwrap();
    assert_eq!(lowered, inst.type_id);

    assert_eq!(
        registry.lower(&ty("E"), &LoweringScope::global()).err(),
        Some(HierarchyError::UnknownType { name: "E".to_string() })
    );
}

#[test]
fn test_instantiate_checks_arity() {
    let registry = collection_registry();
    let string = registry.lower(&ty("String"), &LoweringScope::global()).unwrap();
    let err = registry
        .instantiate("CCollection", &[string, string])
        .unwrap_err();
    assert_eq!(
        err,
        HierarchyError::ArityMismatch {
            name: "CCollection".to_string(),
            expected: 1,
            found: 2,
        }
    );
}
