//! Evaluation engine
//!
//! The AST evaluator, its operator semantics and the parameter binder used
//! for function calls.

pub mod binder;
mod evaluator;
mod operators;

#[cfg(test)]
mod tests;

pub use binder::{bind_arguments, CallArguments, Parameter, Signature};
pub use evaluator::{evaluate, evaluate_str, Evaluator, DEFAULT_MAX_RECURSION_DEPTH};
