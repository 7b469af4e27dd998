//! Verdict Core - Core types and definitions for the Verdict DMN engine
//!
//! This crate provides the fundamental types used across the Verdict crates:
//! - Value types for runtime data and evaluation contexts
//! - AST (Abstract Syntax Tree) definitions for FEEL expressions
//! - Decision model structures (decision tables, BKMs, literal decisions)
//! - Error types

pub mod ast;
pub mod error;
pub mod model;
pub mod types;

// Re-export commonly used types
pub use ast::{Expression, FunctionParameter, NodeKind, Operator, UnaryOperator};
pub use error::CoreError;
pub use model::{
    BusinessKnowledgeModel, CollectAggregation, DecisionTable, Entry, HitPolicy, InputClause,
    LiteralDecision, OutputClause, Rule,
};
pub use types::Value;
