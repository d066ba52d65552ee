use cfgm_core::errors::{CfgmError, ErrorInfo};
use cfgm_core::{DegreeSequence, Edge, EdgeList, NodeKey};
use indexmap::IndexMap;

/// Largest total weight a [`WeightedGraph`] accepts.
///
/// Every node degree is bounded by twice the total weight, so degree sums
/// never overflow.
pub const MAX_TOTAL_WEIGHT: usize = usize::MAX / 2;

/// Edge of a weighted simple graph; the weight is the pair's multiplicity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedEdge<K> {
    /// First endpoint, in the orientation the pair was first seen.
    pub source: K,
    /// Second endpoint, in the orientation the pair was first seen.
    pub target: K,
    /// Number of parallel edges collapsed into this one.
    pub weight: usize,
}

/// Simple undirected graph with integer edge weights.
///
/// Pairs are keyed without regard to endpoint order and kept in
/// first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedGraph<K: NodeKey> {
    edges: IndexMap<(K, K), WeightedEdge<K>>,
    total: usize,
}

impl<K: NodeKey> Default for WeightedGraph<K> {
    fn default() -> Self {
        Self {
            edges: IndexMap::new(),
            total: 0,
        }
    }
}

impl<K: NodeKey> WeightedGraph<K> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to the pair `{source, target}`. Zero weights are ignored.
    ///
    /// Fails with `invalid-weight` when the graph's total weight would
    /// exceed [`MAX_TOTAL_WEIGHT`]; the graph is left unchanged.
    pub fn add_edge(&mut self, source: K, target: K, weight: usize) -> Result<(), CfgmError> {
        if weight == 0 {
            return Ok(());
        }
        let total = match self.total.checked_add(weight) {
            Some(total) if total <= MAX_TOTAL_WEIGHT => total,
            _ => {
                return Err(CfgmError::Codec(
                    ErrorInfo::new("invalid-weight", "total edge weight is too large")
                        .with_context("source", format!("{source:?}"))
                        .with_context("target", format!("{target:?}"))
                        .with_context("weight", weight.to_string())
                        .with_context("max_total", MAX_TOTAL_WEIGHT.to_string()),
                ))
            }
        };
        self.accumulate(source, target, weight);
        self.total = total;
        Ok(())
    }

    // Pair weights never exceed `self.total`, which callers keep in range.
    fn accumulate(&mut self, source: K, target: K, weight: usize) {
        let key = pair_key(&source, &target);
        self.edges
            .entry(key)
            .and_modify(|edge| edge.weight += weight)
            .or_insert(WeightedEdge {
                source,
                target,
                weight,
            });
    }

    /// Weight of the pair `{a, b}`, if present.
    pub fn weight(&self, a: &K, b: &K) -> Option<usize> {
        self.edges.get(&pair_key(a, b)).map(|edge| edge.weight)
    }

    /// Iterates over the weighted edges in first-occurrence order.
    pub fn edges(&self) -> impl Iterator<Item = &WeightedEdge<K>> + '_ {
        self.edges.values()
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of all weights, i.e. the number of edges of the multigraph.
    pub fn total_weight(&self) -> usize {
        self.total
    }

    /// Multigraph degree of every node: the sum of incident weights, with a
    /// self-loop counted at both ends.
    pub fn degrees(&self) -> DegreeSequence<K> {
        let mut degrees = DegreeSequence::new();
        for edge in self.edges.values() {
            degrees.add_stubs(edge.source.clone(), edge.weight);
            degrees.add_stubs(edge.target.clone(), edge.weight);
        }
        degrees
    }
}

fn pair_key<K: NodeKey>(a: &K, b: &K) -> (K, K) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Collapses parallel edges into weights.
pub fn edge_list_to_weighted<K: NodeKey>(edges: &[Edge<K>]) -> WeightedGraph<K> {
    // A slice never holds more than `isize::MAX` edges, well under the cap.
    let mut graph = WeightedGraph::new();
    for edge in edges {
        graph.accumulate(edge.source.clone(), edge.target.clone(), 1);
    }
    graph.total = edges.len();
    graph
}

/// Expands every weighted edge into that many parallel edges.
///
/// Fails with `multigraph-too-large` when the expanded edge list cannot be
/// allocated.
pub fn weighted_to_multigraph<K: NodeKey>(
    graph: &WeightedGraph<K>,
) -> Result<EdgeList<K>, CfgmError> {
    let mut edges = Vec::new();
    edges.try_reserve_exact(graph.total_weight()).map_err(|err| {
        CfgmError::Codec(
            ErrorInfo::new("multigraph-too-large", "cannot allocate the expanded edge list")
                .with_context("edges", graph.total_weight().to_string())
                .with_context("cause", err.to_string()),
        )
    })?;
    for edge in graph.edges() {
        for _ in 0..edge.weight {
            edges.push(Edge::new(edge.source.clone(), edge.target.clone()));
        }
    }
    Ok(edges)
}

/// Counts the endpoints touching each node, in first-appearance order.
pub fn degrees_of<K: NodeKey>(edges: &[Edge<K>]) -> DegreeSequence<K> {
    let mut degrees = DegreeSequence::new();
    for edge in edges {
        degrees.add_stubs(edge.source.clone(), 1);
        degrees.add_stubs(edge.target.clone(), 1);
    }
    degrees
}
