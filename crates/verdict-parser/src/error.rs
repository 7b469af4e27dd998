//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// Token that does not fit the grammar at this point
    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    /// Character the lexer cannot classify
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    /// String literal without a closing quote
    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    /// Input ended while a construct was still open
    #[error("Unexpected end of expression: expected {expected}")]
    UnexpectedEnd { expected: String },

    /// No tokens to parse
    #[error("Empty expression")]
    EmptyExpression,

    /// A call mixing `name: value` and positional arguments
    #[error("Cannot mix named and positional parameters in call to '{function}'")]
    MixedParameterStyles { function: String },

    /// `.` followed by something other than an identifier
    #[error("Expected property name after '.', found '{token}' at position {position}")]
    InvalidPropertyAccess { token: String, position: usize },

    /// Numeric literal that does not parse as a number
    #[error("Invalid number literal '{0}'")]
    InvalidNumber(String),

    /// Missing required field in a model document
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value in a model document
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParseError {
    pub(crate) fn unexpected(token: &crate::lexer::Token) -> Self {
        if token.is_end() {
            ParseError::UnexpectedEnd {
                expected: "more input".to_string(),
            }
        } else {
            ParseError::UnexpectedToken {
                token: token.text.clone(),
                position: token.position,
            }
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
