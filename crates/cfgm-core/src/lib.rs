#![deny(missing_docs)]
#![doc = "Core types for the configuration multi-edge model engine: node keys, degree sequences, edges, errors and random streams."]

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{CfgmError, ErrorInfo};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, DrawStream, RngHandle, ScriptedStream};

/// Bound satisfied by every node identifier the engine can rewire.
///
/// Identifiers are opaque: the engine only compares, hashes and clones them.
pub trait NodeKey: Clone + Eq + Hash + Ord + Debug {}

impl<T> NodeKey for T where T: Clone + Eq + Hash + Ord + Debug {}

/// Connection between two nodes.
///
/// The engine treats edges as undirected but keeps the orientation in which
/// they were produced so output order is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge<K> {
    /// Endpoint that owned the stub round producing this edge.
    pub source: K,
    /// Endpoint chosen for the stub.
    pub target: K,
}

impl<K> Edge<K> {
    /// Creates an edge from its endpoints.
    pub fn new(source: K, target: K) -> Self {
        Self { source, target }
    }

    /// Returns `true` when both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool
    where
        K: PartialEq,
    {
        self.source == self.target
    }
}

impl<K> From<(K, K)> for Edge<K> {
    fn from((source, target): (K, K)) -> Self {
        Self { source, target }
    }
}

/// Ordered sequence of edges; parallel edges are permitted.
pub type EdgeList<K> = Vec<Edge<K>>;

/// Mapping from node identifier to its remaining stub count.
///
/// Insertion order is preserved because it decides how ties between equal
/// degrees are resolved during stub matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent, bound(
    serialize = "K: Serialize + Hash + Eq",
    deserialize = "K: Deserialize<'de> + Hash + Eq"
))]
pub struct DegreeSequence<K: Hash + Eq> {
    degrees: IndexMap<K, usize>,
}

impl<K: Hash + Eq> Default for DegreeSequence<K> {
    fn default() -> Self {
        Self {
            degrees: IndexMap::new(),
        }
    }
}

impl<K: NodeKey> DegreeSequence<K> {
    /// Creates an empty degree sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the remaining stub count of `node`, returning the previous value.
    pub fn insert(&mut self, node: K, degree: usize) -> Option<usize> {
        self.degrees.insert(node, degree)
    }

    /// Adds `amount` stubs to `node`, inserting it at the end when unknown.
    pub fn add_stubs(&mut self, node: K, amount: usize) {
        *self.degrees.entry(node).or_insert(0) += amount;
    }

    /// Remaining stub count for `node`, or `None` when the node is unknown.
    pub fn get(&self, node: &K) -> Option<usize> {
        self.degrees.get(node).copied()
    }

    /// Consumes one stub of `node`. Returns `false` when none remained.
    pub fn consume_stub(&mut self, node: &K) -> bool {
        match self.degrees.get_mut(node) {
            Some(degree) if *degree > 0 => {
                *degree -= 1;
                true
            }
            _ => false,
        }
    }

    /// Marks every stub of `node` as consumed.
    pub fn exhaust(&mut self, node: &K) {
        if let Some(degree) = self.degrees.get_mut(node) {
            *degree = 0;
        }
    }

    /// Total number of stubs remaining across all nodes.
    pub fn total_stubs(&self) -> usize {
        self.degrees.values().sum()
    }

    /// Returns `true` once every node has been exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.degrees.values().all(|degree| *degree == 0)
    }

    /// Nodes that still have stubs, in insertion order.
    pub fn active_nodes(&self) -> Vec<K> {
        self.degrees
            .iter()
            .filter(|(_, degree)| **degree > 0)
            .map(|(node, _)| node.clone())
            .collect()
    }

    /// Number of nodes tracked, including exhausted ones.
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Returns `true` when no node is tracked.
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Iterates over `(node, remaining)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.degrees.iter().map(|(node, degree)| (node, *degree))
    }

    /// Returns the degrees with zero-degree nodes removed, keeping order.
    pub fn without_isolated(&self) -> Self {
        self.iter()
            .filter(|(_, degree)| *degree > 0)
            .map(|(node, degree)| (node.clone(), degree))
            .collect()
    }

    /// Borrows the underlying ordered map.
    pub fn as_map(&self) -> &IndexMap<K, usize> {
        &self.degrees
    }
}

impl<K: NodeKey> FromIterator<(K, usize)> for DegreeSequence<K> {
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
        Self {
            degrees: iter.into_iter().collect(),
        }
    }
}

impl<K: NodeKey, const N: usize> From<[(K, usize); N]> for DegreeSequence<K> {
    fn from(entries: [(K, usize); N]) -> Self {
        entries.into_iter().collect()
    }
}
