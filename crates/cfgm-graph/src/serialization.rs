use std::fmt::Display;

use cfgm_core::errors::{CfgmError, ErrorInfo};
use cfgm_core::provenance::{RunProvenance, SchemaVersion};
use cfgm_core::{EdgeList, NodeKey};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::codec::{WeightedGraph, MAX_TOTAL_WEIGHT};
use crate::ensemble::{Ensemble, EnsembleReport};

/// Schema version written alongside serialized ensembles.
pub const ENSEMBLE_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Self-describing ensemble payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsembleArtifact<K> {
    /// Schema of this payload.
    pub schema_version: SchemaVersion,
    /// Inputs and settings the ensemble came from.
    pub provenance: RunProvenance,
    /// Attempt statistics.
    pub report: EnsembleReport,
    /// Instances in generation order.
    pub instances: Vec<EdgeList<K>>,
}

impl<K> EnsembleArtifact<K> {
    /// Wraps an ensemble with its provenance.
    pub fn new(ensemble: Ensemble<K>, provenance: RunProvenance) -> Self {
        Self {
            schema_version: ENSEMBLE_SCHEMA,
            provenance,
            report: ensemble.report,
            instances: ensemble.instances,
        }
    }

    /// Unwraps the ensemble, dropping provenance.
    pub fn into_ensemble(self) -> Ensemble<K> {
        Ensemble {
            instances: self.instances,
            report: self.report,
        }
    }
}

/// Serializes the artifact to a compact binary representation using `bincode`.
pub fn ensemble_to_bytes<K: Serialize>(artifact: &EnsembleArtifact<K>) -> Result<Vec<u8>, CfgmError> {
    bincode::serialize(artifact)
        .map_err(|err| CfgmError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores an artifact from its binary representation.
pub fn ensemble_from_bytes<K: DeserializeOwned>(
    bytes: &[u8],
) -> Result<EnsembleArtifact<K>, CfgmError> {
    let artifact: EnsembleArtifact<K> = bincode::deserialize(bytes)
        .map_err(|err| CfgmError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    check_schema(&artifact)?;
    Ok(artifact)
}

/// Serializes the artifact to a JSON string.
pub fn ensemble_to_json<K: Serialize>(artifact: &EnsembleArtifact<K>) -> Result<String, CfgmError> {
    serde_json::to_string_pretty(artifact)
        .map_err(|err| CfgmError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores an artifact from a JSON string.
pub fn ensemble_from_json<K: DeserializeOwned>(json: &str) -> Result<EnsembleArtifact<K>, CfgmError> {
    let artifact: EnsembleArtifact<K> = serde_json::from_str(json)
        .map_err(|err| CfgmError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    check_schema(&artifact)?;
    Ok(artifact)
}

fn check_schema<K>(artifact: &EnsembleArtifact<K>) -> Result<(), CfgmError> {
    if !ENSEMBLE_SCHEMA.is_compatible_with(&artifact.schema_version) {
        return Err(CfgmError::Serde(
            ErrorInfo::new("schema-mismatch", "unsupported ensemble schema")
                .with_context("found", artifact.schema_version.to_string())
                .with_context("expected", ENSEMBLE_SCHEMA.to_string()),
        ));
    }
    Ok(())
}

/// Parses a weighted edge list.
///
/// One edge per line: `source target`, `source target weight` or
/// `source target {'weight': weight}`. Blank lines and `#` comments are
/// skipped; repeated pairs accumulate their weights.
pub fn parse_weighted_edgelist(text: &str) -> Result<WeightedGraph<String>, CfgmError> {
    let mut graph = WeightedGraph::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = match raw.split_once('#') {
            Some((content, _)) => content.trim(),
            None => raw.trim(),
        };
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let mut parts = line.split_whitespace();
        let (Some(source), Some(target)) = (parts.next(), parts.next()) else {
            return Err(CfgmError::Codec(
                ErrorInfo::new("parse-edge", "edge line needs a source and a target")
                    .with_context("line", line_no.to_string()),
            ));
        };
        let attrs = parts.collect::<Vec<_>>().join(" ");
        let weight = parse_weight(&attrs, line_no)?;
        graph
            .add_edge(source.to_string(), target.to_string(), weight)
            .map_err(|err| match err {
                CfgmError::Codec(info) => {
                    CfgmError::Codec(info.with_context("line", line_no.to_string()))
                }
                other => other,
            })?;
    }
    Ok(graph)
}

fn parse_weight(attrs: &str, line_no: usize) -> Result<usize, CfgmError> {
    if attrs.is_empty() {
        return Ok(1);
    }
    let value = if attrs.starts_with('{') {
        match attrs.split_once("'weight'") {
            Some((_, rest)) => rest
                .trim_start()
                .trim_start_matches(':')
                .trim()
                .trim_end_matches('}')
                .split(',')
                .next()
                .unwrap_or("")
                .trim(),
            None => return Ok(1),
        }
    } else {
        attrs
    };
    let invalid = || {
        CfgmError::Codec(
            ErrorInfo::new("invalid-weight", "edge weight must be a positive integer")
                .with_context("line", line_no.to_string())
                .with_context("weight", value.to_string()),
        )
    };
    let weight = match value.parse::<usize>() {
        Ok(weight) => weight,
        Err(_) => {
            let float: f64 = value.parse().map_err(|_| invalid())?;
            if !float.is_finite()
                || float.fract() != 0.0
                || float < 1.0
                || float > MAX_TOTAL_WEIGHT as f64
            {
                return Err(invalid());
            }
            float as usize
        }
    };
    if weight == 0 {
        return Err(invalid());
    }
    Ok(weight)
}

/// Formats a weighted graph as a weighted edge list, one `source target
/// {'weight': w}` line per pair.
pub fn format_weighted_edgelist<K>(graph: &WeightedGraph<K>) -> String
where
    K: NodeKey + Display,
{
    let mut out = String::new();
    for edge in graph.edges() {
        out.push_str(&format!(
            "{} {} {{'weight': {}}}\n",
            edge.source, edge.target, edge.weight
        ));
    }
    out
}
