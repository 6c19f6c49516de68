// src/error.rs

use thiserror::Error;

/// Everything that can stop a run before (or after) the simulated days execute.
///
/// The simulation core only ever produces `InvalidParameter`; the remaining
/// variants come from the configuration and reporting layers.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("unknown reorder policy `{0}` (expected `simple` or `combined_variance`)")]
    UnknownPolicy(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration parse error: {0}")]
    Config(#[from] toml::de::Error),
}

impl SimError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
