use cfgm_core::Edge;
use cfgm_graph::{
    degrees_of, edge_list_to_weighted, multiset_hash, parse_weighted_edgelist,
    weighted_to_multigraph, WeightedGraph, MAX_TOTAL_WEIGHT,
};
use proptest::prelude::*;

#[test]
fn parallel_edges_collapse_into_weights() {
    let edges = vec![Edge::new("a", "b"), Edge::new("a", "b"), Edge::new("a", "c")];
    let graph = edge_list_to_weighted(&edges);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.weight(&"a", &"b"), Some(2));
    assert_eq!(graph.weight(&"c", &"a"), Some(1));
    assert_eq!(graph.weight(&"b", &"c"), None);
    assert_eq!(graph.total_weight(), 3);
}

#[test]
fn reversed_orientation_shares_a_pair() {
    let edges = vec![Edge::new(2, 1), Edge::new(1, 2), Edge::new(3, 1)];
    let graph = edge_list_to_weighted(&edges);
    let first = graph.edges().next().unwrap();
    assert_eq!((first.source, first.target, first.weight), (2, 1, 2));
}

#[test]
fn weighted_graph_expands_to_multigraph() {
    let mut graph = WeightedGraph::new();
    graph.add_edge("a", "b", 2).unwrap();
    graph.add_edge("a", "c", 1).unwrap();
    graph.add_edge("c", "d", 0).unwrap();
    let multigraph = weighted_to_multigraph(&graph).unwrap();
    assert_eq!(
        multigraph,
        vec![Edge::new("a", "b"), Edge::new("a", "b"), Edge::new("a", "c")]
    );
    let degrees = degrees_of(&multigraph);
    let observed: Vec<_> = degrees.iter().map(|(node, degree)| (*node, degree)).collect();
    assert_eq!(observed, vec![("a", 3), ("b", 2), ("c", 1)]);
    assert_eq!(graph.degrees(), degrees);
}

#[test]
fn self_loops_count_both_endpoints() {
    let edges = vec![Edge::new('a', 'a'), Edge::new('a', 'b')];
    assert_eq!(degrees_of(&edges).get(&'a'), Some(3));
    assert_eq!(edge_list_to_weighted(&edges).degrees().get(&'a'), Some(3));
}

#[test]
fn oversized_weights_are_rejected_when_parsed() {
    let err = parse_weighted_edgelist("a b 18446744073709551615\n").unwrap_err();
    assert_eq!(err.info().code, "invalid-weight");
    assert_eq!(err.info().context.get("line"), Some(&"1".to_string()));

    let err = parse_weighted_edgelist("a b {'weight': 1e30}\n").unwrap_err();
    assert_eq!(err.info().code, "invalid-weight");
}

#[test]
fn accumulated_weight_cannot_overflow() {
    let text = format!("a b {MAX_TOTAL_WEIGHT}\nb a 1\n");
    let err = parse_weighted_edgelist(&text).unwrap_err();
    assert_eq!(err.info().code, "invalid-weight");
    assert_eq!(err.info().context.get("line"), Some(&"2".to_string()));

    let mut graph = WeightedGraph::new();
    graph.add_edge('x', 'y', MAX_TOTAL_WEIGHT).unwrap();
    assert!(graph.add_edge('z', 'w', 1).is_err());
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.total_weight(), MAX_TOTAL_WEIGHT);
}

#[test]
fn unallocatable_expansion_is_an_error() {
    let graph = parse_weighted_edgelist(&format!("a b {MAX_TOTAL_WEIGHT}\n")).unwrap();
    let err = weighted_to_multigraph(&graph).unwrap_err();
    assert_eq!(err.info().code, "multigraph-too-large");
}

proptest! {
    #[test]
    fn round_trip_preserves_edge_multiset(
        raw_edges in proptest::collection::vec((0u8..6, 0u8..6), 0..40),
    ) {
        let edges: Vec<Edge<u8>> = raw_edges.into_iter().map(Edge::from).collect();
        let graph = edge_list_to_weighted(&edges);
        let restored = weighted_to_multigraph(&graph).unwrap();
        prop_assert_eq!(restored.len(), edges.len());
        prop_assert_eq!(multiset_hash(&restored).unwrap(), multiset_hash(&edges).unwrap());
        prop_assert_eq!(graph.degrees(), degrees_of(&edges));
    }
}
