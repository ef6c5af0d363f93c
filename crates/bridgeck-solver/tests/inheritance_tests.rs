use super::*;

#[test]
fn test_simple_inheritance() {
    let mut graph = SupertypeGraph::new();
    graph.add_edges(2u32, &[1]);

    assert!(graph.is_derived_from(2, 1));
    assert!(!graph.is_derived_from(1, 2));
    assert!(!graph.is_derived_from(2, 2));
}

#[test]
fn test_transitive_inheritance() {
    let mut graph = SupertypeGraph::new();
    // 3 -> 2 -> 1
    graph.add_edges(2u32, &[1]);
    graph.add_edges(3, &[2]);

    assert!(graph.is_derived_from(3, 1));
    assert_eq!(graph.path(3, 1), Some(vec![3, 2, 1]));
    assert_eq!(graph.ancestors(3), vec![2, 1]);
}

#[test]
fn test_diamond_ancestors_visited_once() {
    let mut graph = SupertypeGraph::new();
    // 4 -> {2, 3}, 2 -> 1, 3 -> 1
    graph.add_edges(2u32, &[1]);
    graph.add_edges(3, &[1]);
    graph.add_edges(4, &[2, 3]);

    assert_eq!(graph.ancestors(4), vec![2, 1, 3]);
    assert_eq!(graph.parents(4), &[2, 3]);
}

#[test]
fn test_self_reference_is_a_cycle() {
    let graph = SupertypeGraph::<u32>::new();
    assert_eq!(graph.would_create_cycle(1, &[1]), Some(vec![1, 1]));
}

#[test]
fn test_cycle_through_existing_edges() {
    let mut graph = SupertypeGraph::new();
    // 2 -> 1, 3 -> 2; adding 1 -> 3 closes 1 -> 3 -> 2 -> 1
    graph.add_edges(2u32, &[1]);
    graph.add_edges(3, &[2]);

    assert_eq!(graph.would_create_cycle(1, &[3]), Some(vec![1, 3, 2, 1]));
    assert_eq!(graph.would_create_cycle(4, &[3]), None);
}

#[test]
fn test_forward_references_are_not_cycles() {
    let graph = SupertypeGraph::<u32>::new();
    // Parent not yet present.
    assert_eq!(graph.would_create_cycle(1, &[7]), None);
    assert!(graph.parents(7).is_empty());
    assert!(graph.is_empty());
}

#[test]
fn test_long_chain_path_and_cycle() {
    let mut graph = SupertypeGraph::new();
    for node in 0u32..10_000 {
        graph.add_edges(node, &[node + 1]);
    }

    let path = graph.path(0, 10_000).unwrap();
    assert_eq!(path.len(), 10_001);
    assert_eq!(path.first(), Some(&0));
    assert_eq!(path.last(), Some(&10_000));
    assert_eq!(graph.would_create_cycle(10_000, &[0]).map(|c| c.len()), Some(10_002));
}
