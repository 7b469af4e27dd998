//! Verdict Decision Engine SDK
//!
//! High-level API for loading DMN decision models and evaluating them.
//!
//! ```rust,ignore
//! use verdict_sdk::{DecisionEngineBuilder, Value};
//!
//! let engine = DecisionEngineBuilder::new()
//!     .add_model_file("models/loan.yaml")
//!     .build()?;
//! let results = engine.evaluate(&Value::object([("Age", Value::Number(30.0))]))?;
//! ```

pub mod builder;
pub mod config;
pub mod decision_engine;
pub mod error;
pub mod logging;

// Re-export main types
pub use builder::DecisionEngineBuilder;
pub use config::EngineConfig;
pub use decision_engine::DecisionEngine;
pub use error::{Result, SdkError};
pub use logging::init_logging;

// Re-export commonly used types from dependencies
pub use verdict_core::{
    BusinessKnowledgeModel, CollectAggregation, DecisionTable, Entry, HitPolicy, InputClause,
    LiteralDecision, OutputClause, Rule, Value,
};
pub use verdict_parser::ModelDocument;
pub use verdict_runtime::RuntimeError;
