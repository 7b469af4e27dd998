//! Abstract Syntax Tree (AST) definitions for FEEL expressions
//!
//! Expressions are produced by the parser and walked by the runtime evaluator.
//! Decision table entries, literal decisions and BKM bodies cache these trees.

pub mod expression;
pub mod operator;

pub use expression::{Expression, FunctionParameter, NodeKind};
pub use operator::{Operator, UnaryOperator};
