use std::collections::HashMap;

use cfgm_core::errors::CfgmError;
use cfgm_core::rng::DrawStream;
use cfgm_core::{DegreeSequence, Edge, EdgeList, NodeKey};
use tracing::trace;

use crate::sampler::{CapacitySampler, SampleOutcome};

/// Result of one stub matching run.
///
/// Failures never carry a partial edge list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewireOutcome<K> {
    /// Every stub was matched; edges are in production order.
    Success(EdgeList<K>),
    /// The hub needed more stubs than the remaining nodes could supply.
    RewireFailed {
        /// Hub whose round could not be completed.
        hub: K,
        /// Stubs the hub had to place.
        stubs: usize,
        /// Stubs available on all other active nodes.
        capacity: usize,
    },
    /// The sampler hit its draw threshold while placing the hub's stubs.
    SamplingExhausted {
        /// Hub whose round could not be completed.
        hub: K,
        /// Stubs the hub had to place.
        stubs: usize,
        /// Draws performed before the sampler gave up.
        draws: usize,
    },
}

impl<K> RewireOutcome<K> {
    /// Returns `true` when a full instance was produced.
    pub fn is_success(&self) -> bool {
        matches!(self, RewireOutcome::Success(_))
    }

    /// Returns the edges of a successful run.
    pub fn into_edges(self) -> Option<EdgeList<K>> {
        match self {
            RewireOutcome::Success(edges) => Some(edges),
            _ => None,
        }
    }
}

/// Builds one degree-preserving instance by repeatedly matching the stubs of
/// the highest-degree node against the remaining nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubMatcher {
    sampler: CapacitySampler,
}

impl StubMatcher {
    /// Creates a matcher that places each hub's stubs with `sampler`.
    pub fn new(sampler: CapacitySampler) -> Self {
        Self { sampler }
    }

    /// Sampler used for each hub round.
    pub fn sampler(&self) -> &CapacitySampler {
        &self.sampler
    }

    /// Matches every stub in `degrees`, consuming them in place.
    ///
    /// Each round takes the node with the most remaining stubs (the last one
    /// after a stable ascending sort, so ties go to whichever tied node sits
    /// latest in the current order) and spreads its stubs over the other
    /// active nodes, at most as many times per node as that node has stubs
    /// left. Self-loops cannot occur because the hub is removed from the pool
    /// before sampling.
    pub fn rewire<K, S>(
        &self,
        degrees: &mut DegreeSequence<K>,
        stream: &mut S,
    ) -> Result<RewireOutcome<K>, CfgmError>
    where
        K: NodeKey,
        S: DrawStream + ?Sized,
    {
        let mut order = degrees.active_nodes();
        let mut edges = Vec::with_capacity(degrees.total_stubs() / 2);

        loop {
            order.retain(|node| remaining(degrees, node) > 0);
            order.sort_by_key(|node| remaining(degrees, node));
            let Some(hub) = order.pop() else {
                break;
            };
            let stubs = remaining(degrees, &hub);
            let limits: HashMap<K, usize> = order
                .iter()
                .map(|node| (node.clone(), remaining(degrees, node)))
                .collect();
            trace!(hub = ?hub, stubs, pool = order.len(), "matching hub stubs");

            let selection = match self.sampler.sample(&order, stubs, &limits, stream) {
                Ok(SampleOutcome::Complete(selection)) => selection,
                Ok(SampleOutcome::Exhausted { draws, .. }) => {
                    return Ok(RewireOutcome::SamplingExhausted { hub, stubs, draws });
                }
                Err(err) if err.is_invalid_request() => {
                    let capacity = limits.values().sum();
                    return Ok(RewireOutcome::RewireFailed {
                        hub,
                        stubs,
                        capacity,
                    });
                }
                Err(err) => return Err(err),
            };

            for target in selection.selections {
                degrees.consume_stub(&hub);
                degrees.consume_stub(&target);
                edges.push(Edge::new(hub.clone(), target));
            }
        }

        Ok(RewireOutcome::Success(edges))
    }
}

fn remaining<K: NodeKey>(degrees: &DegreeSequence<K>, node: &K) -> usize {
    degrees.get(node).unwrap_or(0)
}

/// Rewires a copy of `degrees` with the default sampler, leaving the input untouched.
pub fn rewire_network<K, S>(
    degrees: &DegreeSequence<K>,
    stream: &mut S,
) -> Result<RewireOutcome<K>, CfgmError>
where
    K: NodeKey,
    S: DrawStream + ?Sized,
{
    let mut working = degrees.clone();
    StubMatcher::default().rewire(&mut working, stream)
}
