use cfgm_core::errors::{CfgmError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::sampler::{CapacitySampler, PoolPolicy, DEFAULT_DRAW_THRESHOLD};

/// Default number of rewiring attempts allowed per ensemble.
pub const DEFAULT_RETRY_BUDGET: usize = 10_000;

/// Default number of instances per ensemble.
pub const DEFAULT_ENSEMBLE_SIZE: usize = 10;

/// YAML-configurable parameters governing an ensemble run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsembleConfig {
    /// Number of instances the ensemble must contain.
    #[serde(default = "default_size")]
    pub size: usize,
    /// Master seed for the shared random stream; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Attempts allowed (successful or not) before giving up.
    #[serde(default = "default_retry_budget")]
    pub retry_budget: usize,
    /// Draws allowed per sampling call.
    #[serde(default = "default_draw_threshold")]
    pub draw_threshold: usize,
    /// Candidate pool handling during sampling.
    #[serde(default)]
    pub pool_policy: PoolPolicy,
}

fn default_size() -> usize {
    DEFAULT_ENSEMBLE_SIZE
}

fn default_retry_budget() -> usize {
    DEFAULT_RETRY_BUDGET
}

fn default_draw_threshold() -> usize {
    DEFAULT_DRAW_THRESHOLD
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_ENSEMBLE_SIZE,
            seed: None,
            retry_budget: DEFAULT_RETRY_BUDGET,
            draw_threshold: DEFAULT_DRAW_THRESHOLD,
            pool_policy: PoolPolicy::FullPool,
        }
    }
}

impl EnsembleConfig {
    /// Creates a configuration for `size` instances with all other values defaulted.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Sets the master seed.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the configuration can terminate.
    pub fn validate(&self) -> Result<(), CfgmError> {
        if self.draw_threshold == 0 {
            return Err(CfgmError::Config(
                ErrorInfo::new("invalid-config", "draw threshold must be positive")
                    .with_context("draw_threshold", "0")
                    .with_hint(format!("use the default of {DEFAULT_DRAW_THRESHOLD}")),
            ));
        }
        Ok(())
    }

    /// Builds the sampler described by this configuration.
    pub fn sampler(&self) -> CapacitySampler {
        CapacitySampler::new(self.draw_threshold).with_policy(self.pool_policy)
    }
}
