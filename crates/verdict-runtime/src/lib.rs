//! Verdict Runtime - Evaluation engine for FEEL expressions and DMN decisions
//!
//! This crate evaluates the structures built by `verdict-parser`:
//! - [`Evaluator`] walks expression ASTs against a context value
//! - [`DecisionTableEngine`] matches rules and resolves hit policies
//! - [`BkmManager`] registers business knowledge models and invokes them
//! - [`functions`] holds the built-in FEEL function registry

pub mod bkm;
pub mod context;
pub mod decision;
pub mod engine;
pub mod error;
pub mod functions;
pub mod temporal;

// Re-export main types
pub use bkm::{BkmManager, BkmSnapshot};
pub use decision::{evaluate_decision_table, evaluate_literal_decision, DecisionTableEngine};
pub use engine::{
    bind_arguments, evaluate, evaluate_str, CallArguments, Evaluator, Parameter, Signature,
    DEFAULT_MAX_RECURSION_DEPTH,
};
pub use error::{Result, RuntimeError};
