//! Runtime error types

use thiserror::Error;
use verdict_parser::ParseError;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// No context key matches the variable under any naming variant
    #[error("Undefined variable: '{0}'")]
    UndefinedVariable(String),

    /// Property missing on an object under every naming variant
    #[error("Property '{0}' not found on object")]
    PropertyNotFound(String),

    /// Property access on a value that is not an object
    #[error("Cannot access property '{property}' on non-object value (type: {type_name})")]
    NotAnObject {
        property: String,
        type_name: &'static str,
    },

    /// Function name is neither a built-in nor a registered BKM
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Type error
    #[error("Type error: {0}")]
    TypeError(String),

    /// Arguments do not fit the function signature
    #[error("Cannot bind arguments for '{function}': {message}")]
    BindingFailed { function: String, message: String },

    /// Decision table input outside its declared allowed values
    #[error("Input '{label}' value {value} is not in allowed values [{allowed}]")]
    InputNotAllowed {
        label: String,
        value: String,
        allowed: String,
    },

    /// No BKM registered under this name
    #[error("BKM not found: {0}")]
    BkmNotFound(String),

    /// BKM invocations nested deeper than the configured limit
    #[error("BKM recursion depth limit of {limit} exceeded while invoking '{name}'")]
    RecursionLimitExceeded { name: String, limit: usize },

    /// Caller broke a precondition (empty name, missing body)
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Expression text failed to parse at evaluation time
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl RuntimeError {
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, RuntimeError::ContractViolation(_))
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
