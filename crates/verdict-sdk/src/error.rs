//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model document or expression failed to parse
    #[error("Parser error: {0}")]
    Parse(#[from] verdict_parser::ParseError),

    /// Evaluation error
    #[error("Runtime error: {0}")]
    Runtime(#[from] verdict_runtime::RuntimeError),

    /// Core type error
    #[error("Core error: {0}")]
    Core(#[from] verdict_core::CoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Model content the engine cannot accept
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// No decision registered under this name
    #[error("Decision not found: {0}")]
    DecisionNotFound(String),
}

impl From<config::ConfigError> for SdkError {
    fn from(err: config::ConfigError) -> Self {
        SdkError::Config(err.to_string())
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
