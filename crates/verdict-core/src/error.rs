//! Error types for Verdict Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Unknown hit policy: {0}")]
    UnknownHitPolicy(String),

    #[error("Unknown collect aggregation: {0}")]
    UnknownAggregation(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
