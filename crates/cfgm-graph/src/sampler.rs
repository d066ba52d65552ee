use std::collections::HashMap;

use cfgm_core::errors::{CfgmError, ErrorInfo, INVALID_REQUEST};
use cfgm_core::rng::DrawStream;
use cfgm_core::NodeKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of draws after which a sampling call gives up.
pub const DEFAULT_DRAW_THRESHOLD: usize = 1_000_000;

/// Candidate pool handling used while rejection sampling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoolPolicy {
    /// Every draw is taken from the full original pool, saturated keys included.
    /// Saturated draws count as misses.
    #[default]
    FullPool,
    /// Saturated keys are swap-removed from a working copy of the pool.
    /// Never misses, but yields different selections for the same stream.
    Compacting,
}

/// Accepted selections produced by a completed sampling call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K: NodeKey> {
    /// Accepted keys in draw order.
    pub selections: Vec<K>,
    /// Number of times each key was accepted, in first-acceptance order.
    pub counts: IndexMap<K, usize>,
    /// Draws rejected because the key had reached its limit.
    pub misses: usize,
}

/// Result of a sampling call that passed the capacity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome<K: NodeKey> {
    /// All requested selections were accepted.
    Complete(Selection<K>),
    /// The draw threshold was hit first. Recoverable: callers may retry.
    Exhausted {
        /// Draws performed before giving up.
        draws: usize,
        /// Selections accepted before giving up.
        accepted: usize,
    },
}

impl<K: NodeKey> SampleOutcome<K> {
    /// Returns the selection when sampling completed.
    pub fn complete(self) -> Option<Selection<K>> {
        match self {
            SampleOutcome::Complete(selection) => Some(selection),
            SampleOutcome::Exhausted { .. } => None,
        }
    }
}

/// Draws keys from a candidate pool while respecting per-key limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacitySampler {
    draw_threshold: usize,
    policy: PoolPolicy,
}

impl Default for CapacitySampler {
    fn default() -> Self {
        Self::new(DEFAULT_DRAW_THRESHOLD)
    }
}

impl CapacitySampler {
    /// Creates a sampler that gives up after `draw_threshold` draws.
    pub fn new(draw_threshold: usize) -> Self {
        Self {
            draw_threshold,
            policy: PoolPolicy::FullPool,
        }
    }

    /// Selects the pool handling policy.
    pub fn with_policy(mut self, policy: PoolPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Maximum number of draws per call.
    pub fn draw_threshold(&self) -> usize {
        self.draw_threshold
    }

    /// Pool handling policy in use.
    pub fn policy(&self) -> PoolPolicy {
        self.policy
    }

    /// Chooses `n` keys from `pool` with replacement, never choosing a key
    /// more often than `limits` allows.
    ///
    /// Keys missing from `limits` have a limit of zero. The request is
    /// rejected with an `invalid-request` error, before any draw, when `n`
    /// exceeds the sum of all limits.
    pub fn sample<K, S>(
        &self,
        pool: &[K],
        n: usize,
        limits: &HashMap<K, usize>,
        stream: &mut S,
    ) -> Result<SampleOutcome<K>, CfgmError>
    where
        K: NodeKey,
        S: DrawStream + ?Sized,
    {
        let capacity: usize = limits.values().sum();
        if n > capacity {
            return Err(CfgmError::Sampling(
                ErrorInfo::new(INVALID_REQUEST, "n cannot be larger than the sum of limits")
                    .with_context("requested", n.to_string())
                    .with_context("capacity", capacity.to_string()),
            ));
        }
        match self.policy {
            PoolPolicy::FullPool => Ok(self.sample_full_pool(pool, n, limits, stream)),
            PoolPolicy::Compacting => Ok(self.sample_compacting(pool, n, limits, stream)),
        }
    }

    fn sample_full_pool<K, S>(
        &self,
        pool: &[K],
        n: usize,
        limits: &HashMap<K, usize>,
        stream: &mut S,
    ) -> SampleOutcome<K>
    where
        K: NodeKey,
        S: DrawStream + ?Sized,
    {
        let mut tally = Tally::with_capacity(n);
        let mut draws = 0usize;
        while tally.accepted() < n {
            if draws == self.draw_threshold || pool.is_empty() {
                return tally.exhausted(draws);
            }
            draws += 1;
            let key = &pool[stream.draw_index(pool.len())];
            let limit = limits.get(key).copied().unwrap_or(0);
            if !tally.try_accept(key, limit) {
                tally.misses += 1;
            }
        }
        SampleOutcome::Complete(tally.finish())
    }

    fn sample_compacting<K, S>(
        &self,
        pool: &[K],
        n: usize,
        limits: &HashMap<K, usize>,
        stream: &mut S,
    ) -> SampleOutcome<K>
    where
        K: NodeKey,
        S: DrawStream + ?Sized,
    {
        let mut working: Vec<&K> = pool
            .iter()
            .filter(|key| limits.get(*key).copied().unwrap_or(0) > 0)
            .collect();
        let mut tally = Tally::with_capacity(n);
        let mut draws = 0usize;
        while tally.accepted() < n {
            if draws == self.draw_threshold || working.is_empty() {
                return tally.exhausted(draws);
            }
            draws += 1;
            let slot = stream.draw_index(working.len());
            let key = working[slot];
            let limit = limits.get(key).copied().unwrap_or(0);
            tally.try_accept(key, limit);
            if tally.count(key) >= limit {
                working.swap_remove(slot);
            }
        }
        SampleOutcome::Complete(tally.finish())
    }
}

struct Tally<K: NodeKey> {
    selections: Vec<K>,
    counts: IndexMap<K, usize>,
    misses: usize,
}

impl<K: NodeKey> Tally<K> {
    fn with_capacity(n: usize) -> Self {
        Self {
            selections: Vec::with_capacity(n),
            counts: IndexMap::new(),
            misses: 0,
        }
    }

    fn accepted(&self) -> usize {
        self.selections.len()
    }

    fn count(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    fn try_accept(&mut self, key: &K, limit: usize) -> bool {
        if self.count(key) >= limit {
            return false;
        }
        *self.counts.entry(key.clone()).or_insert(0) += 1;
        self.selections.push(key.clone());
        true
    }

    fn exhausted(self, draws: usize) -> SampleOutcome<K> {
        debug!(
            draws,
            accepted = self.selections.len(),
            misses = self.misses,
            "sampling gave up before completing"
        );
        SampleOutcome::Exhausted {
            draws,
            accepted: self.selections.len(),
        }
    }

    fn finish(self) -> Selection<K> {
        Selection {
            selections: self.selections,
            counts: self.counts,
            misses: self.misses,
        }
    }
}

/// Samples with the default draw threshold over the full original pool.
pub fn limited_random_choice<K, S>(
    pool: &[K],
    n: usize,
    limits: &HashMap<K, usize>,
    stream: &mut S,
) -> Result<SampleOutcome<K>, CfgmError>
where
    K: NodeKey,
    S: DrawStream + ?Sized,
{
    CapacitySampler::default().sample(pool, n, limits, stream)
}
