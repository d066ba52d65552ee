//! Schema and provenance records stored next to serialized ensembles.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// `major.minor.patch` version of a serialized payload layout.
///
/// Readers accept any payload sharing their major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Bumped when existing fields change meaning or disappear.
    pub major: u32,
    /// Bumped when fields are added.
    pub minor: u32,
    /// Bumped for fixes that leave the layout alone.
    pub patch: u32,
}

impl SchemaVersion {
    /// Builds a version from its three components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns `true` when a reader at `self` can load a payload written at `other`.
    pub fn is_compatible_with(&self, other: &SchemaVersion) -> bool {
        self.major == other.major
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Where an ensemble came from and which knobs produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunProvenance {
    /// Canonical hash of the source degree sequence.
    pub input_hash: String,
    /// Master seed; `None` for entropy-seeded runs, which cannot be replayed.
    pub seed: Option<u64>,
    /// Rewiring attempts the generator was allowed.
    pub retry_budget: usize,
    /// Draw threshold handed to the sampler.
    pub draw_threshold: usize,
    /// Package name to version for every tool involved.
    #[serde(default)]
    pub tool_versions: BTreeMap<String, String>,
}
