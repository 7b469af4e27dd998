//! Builder pattern for DecisionEngine

use crate::config::EngineConfig;
use crate::decision_engine::DecisionEngine;
use crate::error::Result;
use std::path::PathBuf;
use verdict_core::{BusinessKnowledgeModel, DecisionTable, LiteralDecision};

/// Builder for DecisionEngine
///
/// # Example
///
/// ```rust,ignore
/// use verdict_sdk::{DecisionEngineBuilder, EngineConfig};
///
/// // From model files named in config/verdict.toml
/// let engine = DecisionEngineBuilder::new()
///     .with_config(EngineConfig::load()?)
///     .build()?;
///
/// // Manual configuration (for testing)
/// let engine = DecisionEngineBuilder::new()
///     .add_model_content(yaml_content)
///     .with_max_recursion_depth(16)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct DecisionEngineBuilder {
    config: EngineConfig,
    model_contents: Vec<String>,
    decision_tables: Vec<DecisionTable>,
    literal_decisions: Vec<LiteralDecision>,
    bkms: Vec<BusinessKnowledgeModel>,
}

impl DecisionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration; model files already added are kept
    pub fn with_config(mut self, mut config: EngineConfig) -> Self {
        let mut files = std::mem::take(&mut self.config.model_files);
        files.append(&mut config.model_files);
        config.model_files = files;
        self.config = config;
        self
    }

    // ========== Model Sources ==========

    /// Add a model file (YAML, or JSON by `.json` extension)
    pub fn add_model_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.model_files.push(path.into());
        self
    }

    /// Add model document text
    pub fn add_model_content(mut self, content: impl Into<String>) -> Self {
        self.model_contents.push(content.into());
        self
    }

    pub fn add_decision_table(mut self, table: DecisionTable) -> Self {
        self.decision_tables.push(table);
        self
    }

    pub fn add_literal_decision(mut self, decision: LiteralDecision) -> Self {
        self.literal_decisions.push(decision);
        self
    }

    pub fn add_bkm(mut self, bkm: BusinessKnowledgeModel) -> Self {
        self.bkms.push(bkm);
        self
    }

    // ========== Engine Options ==========

    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.config.max_recursion_depth = depth;
        self
    }

    pub fn with_ast_cache(mut self, enabled: bool) -> Self {
        self.config.cache_asts = enabled;
        self
    }

    pub fn with_strict_input_values(mut self, enabled: bool) -> Self {
        self.config.strict_input_values = enabled;
        self
    }

    /// Build the engine.
    ///
    /// Sources are registered in order: model files, model contents, then
    /// items added directly. A later item replaces an earlier one of the
    /// same name.
    pub fn build(self) -> Result<DecisionEngine> {
        let engine = DecisionEngine::new(self.config);

        let files = engine.config().model_files.clone();
        for path in &files {
            engine.load_model_file(path)?;
        }
        for content in &self.model_contents {
            engine.load_model_str(content)?;
        }
        for bkm in self.bkms {
            engine.add_bkm(bkm)?;
        }
        for table in self.decision_tables {
            engine.add_decision_table(table)?;
        }
        for decision in self.literal_decisions {
            engine.add_literal_decision(decision)?;
        }

        tracing::info!(
            "Built decision engine: {} table(s), {} literal decision(s), {} BKM(s)",
            engine.decision_table_names().len(),
            engine.literal_decision_names().len(),
            engine.bkm_names().len()
        );
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use verdict_core::Value;

    #[test]
    fn test_builder_defaults() {
        let engine = DecisionEngineBuilder::new().build().unwrap();
        assert_eq!(engine.config(), &EngineConfig::default());
        assert!(engine.decision_table_names().is_empty());
    }

    #[test]
    fn test_builder_options() {
        let engine = DecisionEngineBuilder::new()
            .with_max_recursion_depth(3)
            .with_ast_cache(false)
            .with_strict_input_values(false)
            .build()
            .unwrap();

        assert_eq!(engine.config().max_recursion_depth, 3);
        assert!(!engine.config().cache_asts);
        assert!(!engine.config().strict_input_values);
    }

    #[test]
    fn test_with_config_keeps_added_files() {
        let builder = DecisionEngineBuilder::new()
            .add_model_file("first.yaml")
            .with_config(EngineConfig::new().with_model_file("second.yaml"));

        assert_eq!(
            builder.config.model_files,
            vec![PathBuf::from("first.yaml"), PathBuf::from("second.yaml")]
        );
    }

    #[test]
    fn test_direct_items_override_model_content() {
        let engine = DecisionEngineBuilder::new()
            .add_model_content(
                r#"
model:
  decisions:
    - name: Answer
      expression: "41"
"#,
            )
            .add_literal_decision(LiteralDecision::new("Answer", "42"))
            .build()
            .unwrap();

        let context = Value::object(Vec::<(String, Value)>::new());
        assert_eq!(
            engine.evaluate_decision("Answer", &context).unwrap(),
            Value::Number(42.0)
        );
    }

    #[test]
    fn test_missing_model_file_fails_build() {
        let result = DecisionEngineBuilder::new()
            .add_model_file("/nonexistent/model.yaml")
            .build();
        assert!(matches!(result, Err(SdkError::Io(_))));
    }
}
