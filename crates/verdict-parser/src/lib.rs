//! Verdict Parser - FEEL expression and model document parser
//!
//! This crate turns text into the structures defined in `verdict-core`:
//! - [`Lexer`] splits FEEL expression text into tokens
//! - [`ExpressionParser`] builds an [`Expression`](verdict_core::Expression) AST
//! - [`ModelParser`] reads YAML/JSON model documents into decision tables,
//!   literal decisions and business knowledge models, caching ASTs at load time

pub mod error;
pub mod expression_parser;
pub mod lexer;
pub mod model_parser;
pub mod yaml_parser;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use expression_parser::ExpressionParser;
pub use lexer::{Lexer, Token, TokenKind};
pub use model_parser::{
    parse_hit_policy, try_parse_expression, try_parse_input_entry, ModelDocument, ModelParser,
};
pub use yaml_parser::YamlParser;
