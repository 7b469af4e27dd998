//! Decision evaluation
//!
//! Decision tables with hit-policy resolution, literal expression decisions,
//! and the text-based unary-test matcher used when a rule cell has no usable
//! AST.

mod literal;
mod table;

pub use literal::evaluate_literal_decision;
pub use table::{evaluate_decision_table, DecisionTableEngine};
pub use unary_test::{entry_matches, unary_test_matches};
