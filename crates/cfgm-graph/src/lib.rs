#![deny(missing_docs)]

//! Degree-preserving network rewiring (configuration multi-edge model).
//!
//! Given a degree sequence, the engine produces randomized edge lists in
//! which every node keeps its degree exactly. Instances are built by
//! [`StubMatcher`] on top of the rejection sampler [`CapacitySampler`], and
//! [`EnsembleGenerator`] retries failed instances until a full ensemble is
//! collected or its retry budget runs out.

mod codec;
mod config;
mod diagram;
mod ensemble;
mod hash;
mod matcher;
mod null_model;
mod sampler;
mod serialization;

pub use codec::{
    degrees_of, edge_list_to_weighted, weighted_to_multigraph, WeightedEdge, WeightedGraph,
    MAX_TOTAL_WEIGHT,
};
pub use config::{EnsembleConfig, DEFAULT_ENSEMBLE_SIZE, DEFAULT_RETRY_BUDGET};
pub use diagram::{render_diagram, DiagramOptions};
pub use ensemble::{
    generate_networks, generate_networks_from_edges, Ensemble, EnsembleGenerator, EnsembleReport,
};
pub use hash::{degree_sequence_hash, ensemble_hash, instance_hash, multiset_hash};
pub use matcher::{rewire_network, RewireOutcome, StubMatcher};
pub use null_model::{mean, CrossingCounts, CrossingRatios};
pub use sampler::{
    limited_random_choice, CapacitySampler, PoolPolicy, SampleOutcome, Selection,
    DEFAULT_DRAW_THRESHOLD,
};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{
    ensemble_from_bytes, ensemble_from_json, ensemble_to_bytes, ensemble_to_json,
    format_weighted_edgelist, parse_weighted_edgelist, EnsembleArtifact, ENSEMBLE_SCHEMA,
};
