use serde::{Deserialize, Serialize};

/// Mean crossing counts for one barrier, observed and under the configuration model.
///
/// `bc_*` are barrier crossings, `cc_*` community crossings; `obs` refers to
/// the observed network and `cfg` to the rewired ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingCounts {
    /// Observed barrier crossings.
    pub bc_obs: f64,
    /// Barrier crossings in the rewired networks.
    pub bc_cfg: f64,
    /// Observed community crossings.
    pub cc_obs: f64,
    /// Community crossings in the rewired networks.
    pub cc_cfg: f64,
}

/// Crossing ratios derived from [`CrossingCounts`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingRatios {
    /// `bc_obs / bc_cfg`.
    pub bc_ratio: Option<f64>,
    /// `cc_obs / cc_cfg`.
    pub cc_ratio: Option<f64>,
    /// `bc_ratio / cc_ratio`.
    pub pi: Option<f64>,
    /// `(bc_obs / cc_obs) / (bc_cfg / cc_cfg)`.
    pub pi_alt: Option<f64>,
}

impl CrossingCounts {
    /// How much more often the observed network crosses the barrier than the
    /// null model, relative to the same comparison for community borders.
    pub fn pi(&self) -> Option<f64> {
        ratio(
            ratio(self.bc_obs, self.bc_cfg)?,
            ratio(self.cc_obs, self.cc_cfg)?,
        )
    }

    /// Same comparison with the observed and null ratios taken first.
    pub fn pi_alt(&self) -> Option<f64> {
        ratio(
            ratio(self.bc_obs, self.cc_obs)?,
            ratio(self.bc_cfg, self.cc_cfg)?,
        )
    }

    /// Observed barrier crossings per observed community crossing.
    pub fn observed_ratio(&self) -> Option<f64> {
        ratio(self.bc_obs, self.cc_obs)
    }

    /// All ratios at once.
    pub fn ratios(&self) -> CrossingRatios {
        CrossingRatios {
            bc_ratio: ratio(self.bc_obs, self.bc_cfg),
            cc_ratio: ratio(self.cc_obs, self.cc_cfg),
            pi: self.pi(),
            pi_alt: self.pi_alt(),
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
