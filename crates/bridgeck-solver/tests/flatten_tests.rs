use super::*;
use crate::fixtures::{Session, builder, collection_registry, iface, method};
use crate::format::TypeFormatter;
use crate::registry::TypeRegistry;
use rustc_hash::FxHashSet;

fn signatures(registry: &TypeRegistry, members: &[Member]) -> Vec<String> {
    let fmt = TypeFormatter::new(registry);
    members.iter().map(|m| fmt.format_member(m)).collect()
}

#[test]
fn test_own_members_come_first_then_supertypes() {
    let session = Session::collections();
    let string = session.concrete("String");
    let receiver = session.receiver("CCollection", &[string]);

    let flat = session.flattener.flatten(&receiver);
    assert_eq!(
        signatures(&session.registry, &flat),
        vec![
            "getSize(): int",
            "contains(String): bool",
            "contains(Object): bool",
            "iterator(): Iterator<String>",
            "addAll(Collection<String>): bool",
            "add(String): bool",
            "isEmpty(): bool",
            "clear(): void",
        ]
    );
}

#[test]
fn test_inherited_members_keep_their_owner() {
    let session = Session::collections();
    let string = session.concrete("String");
    let receiver = session.receiver("CCollection", &[string]);
    let icollection = session.registry.lookup("ICollection").unwrap().id;

    let flat = session.flattener.flatten(&receiver);
    let add = flat
        .iter()
        .find(|m| &*session.registry.types().resolve_name(m.name) == "add")
        .unwrap();
    assert_eq!(add.owner, icollection);
}

#[test]
fn test_substitution_through_two_levels() {
    let mut builder = builder();
    builder
        .register_all([
            iface("Base", &["T"], &[], vec![method("get", &["int"], "T")]),
            iface("Middle", &["U"], &["Base<Iterator<U>>"], vec![]),
            iface("Iterator", &["E"], &[], vec![]),
            iface("Leaf", &[], &["Middle<String>"], vec![]),
        ])
        .unwrap();
    let registry = std::sync::Arc::new(builder.freeze().unwrap());
    let session = Session::new(registry, &[]);

    let leaf = session.receiver("Leaf", &[]);
    let flat = session.flattener.flatten(&leaf);
    assert_eq!(
        signatures(&session.registry, &flat),
        vec!["get(int): Iterator<String>"]
    );
}

#[test]
fn test_diamond_members_appear_once() {
    // Bridges.kt shape: C : I<String>, II where I<T>.foo(T) and II.foo(String)
    // collapse into one `foo(String)`.
    let mut builder = builder();
    builder
        .register_all([
            iface("I", &["T"], &[], vec![method("foo", &["T"], "void")]),
            iface("II", &[], &[], vec![method("foo", &["String"], "void")]),
            iface("C", &[], &["I<String>", "II"], vec![]),
        ])
        .unwrap();
    let registry = std::sync::Arc::new(builder.freeze().unwrap());
    let session = Session::new(registry, &[]);

    let flat = session.flattener.flatten(&session.receiver("C", &[]));
    assert_eq!(signatures(&session.registry, &flat), vec!["foo(String): void"]);
    // First path wins.
    assert_eq!(flat[0].owner, session.registry.lookup("I").unwrap().id);
}

#[test]
fn test_diamond_over_shared_ancestor() {
    let mut builder = builder();
    builder
        .register_all([
            iface("Top", &["E"], &[], vec![method("size", &[], "int")]),
            iface("Left", &["E"], &["Top<E>"], vec![method("left", &[], "E")]),
            iface("Right", &["E"], &["Top<E>"], vec![method("right", &[], "E")]),
            iface("Bottom", &["E"], &["Left<E>", "Right<E>"], vec![]),
        ])
        .unwrap();
    let registry = std::sync::Arc::new(builder.freeze().unwrap());
    let session = Session::new(registry, &[]);
    let int = session.concrete("int");

    let flat = session.flattener.flatten(&session.receiver("Bottom", &[int]));
    assert_eq!(
        signatures(&session.registry, &flat),
        vec!["left(): int", "size(): int", "right(): int"]
    );
}

#[test]
fn test_different_shapes_are_distinct_overloads() {
    let mut builder = builder();
    builder
        .register_all([
            iface("I", &["T"], &[], vec![method("foo", &["T"], "void")]),
            iface("II", &[], &[], vec![method("foo", &["String"], "void")]),
            iface("D", &[], &["I<int>", "II"], vec![]),
        ])
        .unwrap();
    let registry = std::sync::Arc::new(builder.freeze().unwrap());
    let session = Session::new(registry, &[]);

    let flat = session.flattener.flatten(&session.receiver("D", &[]));
    assert_eq!(
        signatures(&session.registry, &flat),
        vec!["foo(int): void", "foo(String): void"]
    );
}

#[test]
fn test_no_duplicate_identities() {
    let session = Session::collections();
    for decl in session.registry.declarations() {
        let inst = session.registry.generic_instantiation(decl.id);
        let flat = session.flattener.flatten(&inst);
        let identities: FxHashSet<_> = flat.iter().map(Member::identity).collect();
        assert_eq!(identities.len(), flat.len(), "duplicates in {:?}", decl.id);
    }
}

#[test]
fn test_memoized_per_instantiation() {
    let registry = collection_registry();
    let flattener = HierarchyFlattener::new(std::sync::Arc::clone(&registry));
    let string = registry
        .lower(&crate::fixtures::ty("String"), &crate::registry::LoweringScope::global())
        .unwrap();
    let receiver = registry.instantiate("CCollection", &[string]).unwrap();

    let first = flattener.flatten(&receiver);
    let after_first = flattener.stats();
    // CCollection<String> and ICollection<String> were both computed.
    assert_eq!(after_first.misses, 2);
    assert_eq!(after_first.cached, 2);

    let second = flattener.flatten(&receiver);
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    let after_second = flattener.stats();
    assert_eq!(after_second.misses, 2);
    assert_eq!(after_second.hits, after_first.hits + 1);
}

#[test]
fn test_prewarm_visits_every_declaration() {
    let registry = collection_registry();
    let flattener = HierarchyFlattener::new(std::sync::Arc::clone(&registry));
    let visited = flattener.prewarm();
    assert_eq!(visited, registry.declarations().len());
    assert_eq!(flattener.stats().cached, registry.declarations().len());

    let inst = registry.generic_instantiation(registry.lookup("CCollection").unwrap().id);
    let misses = flattener.stats().misses;
    flattener.flatten(&inst);
    assert_eq!(flattener.stats().misses, misses);
}

#[test]
fn test_long_single_inheritance_chain_keeps_every_member() {
    const LEVELS: usize = 300;
    let decls: Vec<_> = (0..LEVELS)
        .map(|i| {
            let name = format!("D{i}");
            let supertype = format!("D{}", i + 1);
            let supertypes: Vec<&str> = if i + 1 < LEVELS { vec![supertype.as_str()] } else { vec![] };
            iface(&name, &[], &supertypes, vec![method(&format!("m{i}"), &[], "int")])
        })
        .collect();
    let mut builder = builder();
    builder.register_all(decls).unwrap();
    let registry = std::sync::Arc::new(builder.freeze().unwrap());
    let flattener = HierarchyFlattener::new(std::sync::Arc::clone(&registry));

    let bottom = registry.instantiate("D0", &[]).unwrap();
    let flat = flattener.flatten(&bottom);
    assert_eq!(flat.len(), LEVELS);
    let names = signatures(&registry, &flat);
    assert_eq!(names.first().map(String::as_str), Some("m0(): int"));
    assert_eq!(names.last().map(String::as_str), Some("m299(): int"));
    assert_eq!(flattener.stats().misses, LEVELS as u64);

    let middle = registry.instantiate("D260", &[]).unwrap();
    assert_eq!(flattener.flatten(&middle).len(), LEVELS - 260);
    assert_eq!(flattener.stats().misses, LEVELS as u64);
}
