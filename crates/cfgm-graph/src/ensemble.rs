use cfgm_core::errors::{CfgmError, ErrorInfo, ENSEMBLE_EXHAUSTED};
use cfgm_core::rng::{DrawStream, RngHandle};
use cfgm_core::{DegreeSequence, Edge, EdgeList, NodeKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::codec::degrees_of;
use crate::config::EnsembleConfig;
use crate::matcher::{RewireOutcome, StubMatcher};

/// Attempt statistics gathered while building an ensemble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsembleReport {
    /// Instances requested.
    pub requested: usize,
    /// Rewiring attempts performed, successful ones included.
    pub attempts: usize,
    /// Attempts discarded because a hub lacked capacity.
    pub capacity_failures: usize,
    /// Attempts discarded because the sampler hit its draw threshold.
    pub sampling_failures: usize,
}

impl EnsembleReport {
    /// Total number of discarded attempts.
    pub fn failures(&self) -> usize {
        self.capacity_failures + self.sampling_failures
    }
}

/// Exactly `requested` degree-preserving instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ensemble<K> {
    /// Instances in generation order.
    pub instances: Vec<EdgeList<K>>,
    /// How the instances were obtained.
    pub report: EnsembleReport,
}

impl<K> Ensemble<K> {
    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` for an ensemble of size zero.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Retries stub matching until an ensemble is complete or the retry budget runs out.
#[derive(Debug, Clone)]
pub struct EnsembleGenerator {
    config: EnsembleConfig,
    matcher: StubMatcher,
}

impl EnsembleGenerator {
    /// Creates a generator after validating `config`.
    pub fn new(config: EnsembleConfig) -> Result<Self, CfgmError> {
        config.validate()?;
        let matcher = StubMatcher::new(config.sampler());
        Ok(Self { config, matcher })
    }

    /// Configuration in use.
    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    /// Generates the ensemble on a stream seeded once from the configured seed
    /// (or from entropy when unseeded).
    pub fn generate<K: NodeKey>(
        &self,
        degrees: &DegreeSequence<K>,
    ) -> Result<Ensemble<K>, CfgmError> {
        let mut rng = RngHandle::from_optional_seed(self.config.seed);
        self.generate_with(degrees, &mut rng)
    }

    /// Generates the ensemble drawing from `stream`.
    ///
    /// Every attempt works on a fresh copy of `degrees`; only the stream
    /// carries over between attempts, so an individual attempt depends on
    /// all attempts before it. The call either returns all requested
    /// instances or fails with `ensemble-exhausted`.
    #[instrument(
        name = "ensemble.generate",
        skip_all,
        fields(
            size = self.config.size,
            nodes = degrees.len(),
            stubs = degrees.total_stubs(),
            retry_budget = self.config.retry_budget,
        ),
    )]
    pub fn generate_with<K, S>(
        &self,
        degrees: &DegreeSequence<K>,
        stream: &mut S,
    ) -> Result<Ensemble<K>, CfgmError>
    where
        K: NodeKey,
        S: DrawStream + ?Sized,
    {
        let size = self.config.size;
        let budget = self.config.retry_budget;
        let mut instances = Vec::with_capacity(size);
        let mut report = EnsembleReport {
            requested: size,
            ..EnsembleReport::default()
        };

        while instances.len() < size {
            if report.attempts == budget {
                warn!(
                    attempts = report.attempts,
                    collected = instances.len(),
                    "retry budget exhausted before the ensemble was complete"
                );
                return Err(exhausted_error(&report, instances.len()));
            }
            report.attempts += 1;
            let mut working = degrees.clone();
            match self.matcher.rewire(&mut working, stream)? {
                RewireOutcome::Success(edges) => instances.push(edges),
                RewireOutcome::RewireFailed {
                    hub,
                    stubs,
                    capacity,
                } => {
                    report.capacity_failures += 1;
                    debug!(hub = ?hub, stubs, capacity, "rewired graph is invalid");
                }
                RewireOutcome::SamplingExhausted { hub, stubs, draws } => {
                    report.sampling_failures += 1;
                    debug!(hub = ?hub, stubs, draws, "rewired graph is invalid");
                }
            }
        }

        info!(
            attempts = report.attempts,
            failures = report.failures(),
            "ensemble complete"
        );
        Ok(Ensemble { instances, report })
    }
}

fn exhausted_error(report: &EnsembleReport, collected: usize) -> CfgmError {
    CfgmError::Ensemble(
        ErrorInfo::new(
            ENSEMBLE_EXHAUSTED,
            "retry budget exhausted before collecting the ensemble",
        )
        .with_context("requested", report.requested.to_string())
        .with_context("collected", collected.to_string())
        .with_context("attempts", report.attempts.to_string())
        .with_hint("the degree sequence may be infeasible; raise the retry budget otherwise"),
    )
}

/// Generates `n` instances preserving `degrees`.
pub fn generate_networks<K: NodeKey>(
    degrees: &DegreeSequence<K>,
    n: usize,
    seed: Option<u64>,
    retry_budget: usize,
) -> Result<Ensemble<K>, CfgmError> {
    let config = EnsembleConfig {
        size: n,
        seed,
        retry_budget,
        ..EnsembleConfig::default()
    };
    EnsembleGenerator::new(config)?.generate(degrees)
}

/// Generates `n` instances preserving the degrees of the multigraph `edges`.
pub fn generate_networks_from_edges<K: NodeKey>(
    edges: &[Edge<K>],
    n: usize,
    seed: Option<u64>,
    retry_budget: usize,
) -> Result<Ensemble<K>, CfgmError> {
    generate_networks(&degrees_of(edges), n, seed, retry_budget)
}
