//! Structured error types shared across CFGM crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code raised when a sampling request exceeds the available capacity.
pub const INVALID_REQUEST: &str = "invalid-request";

/// Error code raised when an ensemble runs out of retry budget.
pub const ENSEMBLE_EXHAUSTED: &str = "ensemble-exhausted";

/// Structured payload attached to every [`CfgmError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (node keys, counts, budgets, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the configuration model engine.
///
/// Only failures that escape to the caller live here. Recoverable signals
/// (a sampler running out of draws, a single rewiring attempt failing) are
/// reported through tagged outcomes instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum CfgmError {
    /// Capacity constrained sampling errors.
    #[error("sampling error: {0}")]
    Sampling(ErrorInfo),
    /// Stub matching errors.
    #[error("rewire error: {0}")]
    Rewire(ErrorInfo),
    /// Ensemble generation errors.
    #[error("ensemble error: {0}")]
    Ensemble(ErrorInfo),
    /// Edge list and graph conversion errors.
    #[error("codec error: {0}")]
    Codec(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Invalid configuration values.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl CfgmError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            CfgmError::Sampling(info)
            | CfgmError::Rewire(info)
            | CfgmError::Ensemble(info)
            | CfgmError::Codec(info)
            | CfgmError::Serde(info)
            | CfgmError::Config(info) => info,
        }
    }

    /// Returns `true` when the error signals a request larger than the total capacity.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, CfgmError::Sampling(info) if info.code == INVALID_REQUEST)
    }

    /// Returns `true` when the error signals an exhausted ensemble retry budget.
    pub fn is_ensemble_exhausted(&self) -> bool {
        matches!(self, CfgmError::Ensemble(info) if info.code == ENSEMBLE_EXHAUSTED)
    }
}
