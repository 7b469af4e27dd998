//! Operator execution modules
//!
//! FEEL operator semantics used by the AST evaluator. Both operands are
//! always evaluated before an operator runs.

mod binary;
mod coercion;
mod comparison;
mod logical;
mod unary;

pub(crate) use binary::execute_binary_op;
pub(crate) use unary::execute_unary_op;
