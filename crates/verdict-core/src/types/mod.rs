//! Type system for Verdict
//!
//! Runtime values shared by the parser, the evaluator and the decision engine.

pub mod value;

pub use value::{format_number, Value};
