//! Decision model structures
//!
//! These are the in-memory forms produced by the model loader and consumed by
//! the runtime: decision tables, business knowledge models and literal
//! expression decisions.

pub mod bkm;
pub mod decision_table;
pub mod literal;

pub use bkm::BusinessKnowledgeModel;
pub use decision_table::{
    strip_quotes, CollectAggregation, DecisionTable, Entry, HitPolicy, InputClause, OutputClause,
    Rule,
};
pub use literal::LiteralDecision;
