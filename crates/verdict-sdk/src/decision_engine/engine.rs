//! Core DecisionEngine implementation

use super::loader::ModelLoader;
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use verdict_core::{BusinessKnowledgeModel, DecisionTable, LiteralDecision, Value};
use verdict_parser::{ModelDocument, ModelParser};
use verdict_runtime::{evaluate_literal_decision, BkmManager, DecisionTableEngine};

/// Decision engine holding decision tables, literal decisions and BKMs.
///
/// Decision names are unique across tables and literal decisions: adding a
/// decision replaces any decision of either kind with the same name. All
/// methods take `&self`, so one engine can be shared between threads.
pub struct DecisionEngine {
    config: EngineConfig,
    parser: ModelParser,
    tables: RwLock<HashMap<String, Arc<DecisionTable>>>,
    literals: RwLock<HashMap<String, Arc<LiteralDecision>>>,
    bkms: BkmManager,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl DecisionEngine {
    /// Create an empty engine
    pub fn new(config: EngineConfig) -> Self {
        Self {
            parser: ModelParser::new().with_ast_cache(config.cache_asts),
            bkms: BkmManager::new().with_max_depth(config.max_recursion_depth),
            tables: RwLock::new(HashMap::new()),
            literals: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========== Loading ==========

    /// Load a YAML or JSON model document, returning how many items it registered
    pub fn load_model_str(&self, text: &str) -> Result<usize> {
        let document = ModelLoader::parse_text(&self.parser, text)?;
        self.load_document(document)
    }

    /// Load a model document from a file
    pub fn load_model_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let document = ModelLoader::parse_file(&self.parser, path.as_ref())?;
        self.load_document(document)
    }

    /// Register every decision and BKM of a parsed document
    pub fn load_document(&self, document: ModelDocument) -> Result<usize> {
        let model_name = document.name.unwrap_or_else(|| "<unnamed>".to_string());
        let mut count = 0;

        for bkm in document.bkms {
            self.add_bkm(bkm)?;
            count += 1;
        }
        for table in document.decision_tables {
            self.add_decision_table(table)?;
            count += 1;
        }
        for decision in document.literal_decisions {
            self.add_literal_decision(decision)?;
            count += 1;
        }

        tracing::info!("Loaded model '{}': {} item(s)", model_name, count);
        Ok(count)
    }

    /// Register a decision table under its name, or its id when unnamed
    pub fn add_decision_table(&self, mut table: DecisionTable) -> Result<()> {
        let name = if table.name.is_empty() {
            table.id.clone()
        } else {
            table.name.clone()
        };
        if name.is_empty() {
            return Err(SdkError::InvalidModel(
                "decision table needs a name or an id".to_string(),
            ));
        }

        if self.config.cache_asts {
            ModelLoader::cache_table(&mut table);
        }

        self.literals.write().remove(&name);
        if self.tables.write().insert(name.clone(), Arc::new(table)).is_some() {
            tracing::debug!("Replaced decision table '{}'", name);
        } else {
            tracing::debug!("Registered decision table '{}'", name);
        }
        Ok(())
    }

    /// Register a literal expression decision
    pub fn add_literal_decision(&self, mut decision: LiteralDecision) -> Result<()> {
        if decision.name.is_empty() {
            return Err(SdkError::InvalidModel(
                "literal decision needs a name".to_string(),
            ));
        }

        if self.config.cache_asts {
            ModelLoader::cache_literal(&mut decision);
        }

        let name = decision.name.clone();
        self.tables.write().remove(&name);
        self.literals.write().insert(name.clone(), Arc::new(decision));
        tracing::debug!("Registered literal decision '{}'", name);
        Ok(())
    }

    /// Register a business knowledge model
    pub fn add_bkm(&self, mut bkm: BusinessKnowledgeModel) -> Result<()> {
        if self.config.cache_asts {
            ModelLoader::cache_bkm(&mut bkm);
        }
        self.bkms.add(bkm)?;
        Ok(())
    }

    // ========== Evaluation ==========

    /// Evaluate every decision against `context`.
    ///
    /// Returns an object keyed by decision name. A decision table error
    /// aborts the evaluation; a literal decision that fails contributes null.
    pub fn evaluate(&self, context: &Value) -> Result<Value> {
        let engine = self.table_engine();
        let tables: Vec<Arc<DecisionTable>> = self.tables.read().values().cloned().collect();
        let literals: Vec<Arc<LiteralDecision>> =
            self.literals.read().values().cloned().collect();

        let mut results = HashMap::with_capacity(tables.len() + literals.len());

        for table in &tables {
            let value = engine.evaluate(table, context)?;
            results.insert(decision_name(table).to_string(), value);
        }

        for decision in &literals {
            let value = match evaluate_literal_decision(decision, engine.evaluator(), context) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Literal decision '{}' failed: {}", decision.name, e);
                    Value::Null
                }
            };
            results.insert(decision.name.clone(), value);
        }

        Ok(Value::Object(results))
    }

    /// Evaluate a single decision by name; errors of either kind propagate
    pub fn evaluate_decision(&self, name: &str, context: &Value) -> Result<Value> {
        let table = self.tables.read().get(name).cloned();
        if let Some(table) = table {
            return Ok(self.table_engine().evaluate(&table, context)?);
        }

        let decision = self.literals.read().get(name).cloned();
        match decision {
            Some(decision) => {
                let engine = self.table_engine();
                Ok(evaluate_literal_decision(&decision, engine.evaluator(), context)?)
            }
            None => Err(SdkError::DecisionNotFound(name.to_string())),
        }
    }

    /// Invoke a registered BKM with positional arguments
    pub fn invoke_bkm(&self, name: &str, args: Vec<Value>, context: &Value) -> Result<Value> {
        Ok(self.bkms.invoke(name, args, context)?)
    }

    /// Evaluate a FEEL expression with access to the registered BKMs
    pub fn evaluate_expression(&self, expression: &str, context: &Value) -> Result<Value> {
        Ok(self.bkms.evaluator().evaluate_str(expression, context)?)
    }

    fn table_engine(&self) -> DecisionTableEngine {
        DecisionTableEngine::new()
            .with_evaluator(self.bkms.evaluator())
            .with_strict_input_values(self.config.strict_input_values)
    }

    // ========== Registry ==========

    pub fn decision_table_names(&self) -> Vec<String> {
        sorted_keys(&self.tables.read())
    }

    pub fn literal_decision_names(&self) -> Vec<String> {
        sorted_keys(&self.literals.read())
    }

    pub fn bkm_names(&self) -> Vec<String> {
        self.bkms.names()
    }

    pub fn has_decision(&self, name: &str) -> bool {
        self.tables.read().contains_key(name) || self.literals.read().contains_key(name)
    }

    pub fn decision_table(&self, name: &str) -> Option<Arc<DecisionTable>> {
        self.tables.read().get(name).cloned()
    }

    pub fn literal_decision(&self, name: &str) -> Option<Arc<LiteralDecision>> {
        self.literals.read().get(name).cloned()
    }

    /// Remove a decision table, returning whether it was registered
    pub fn remove_decision_table(&self, name: &str) -> bool {
        self.tables.write().remove(name).is_some()
    }

    /// Remove a literal decision, returning whether it was registered
    pub fn remove_literal_decision(&self, name: &str) -> bool {
        self.literals.write().remove(name).is_some()
    }

    /// Remove a BKM; an empty name is an error
    pub fn remove_bkm(&self, name: &str) -> Result<bool> {
        Ok(self.bkms.remove(name)?)
    }

    /// Remove every decision and BKM
    pub fn clear(&self) {
        self.tables.write().clear();
        self.literals.write().clear();
        self.bkms.clear();
        tracing::debug!("Cleared decision engine");
    }
}

fn decision_name(table: &DecisionTable) -> &str {
    if table.name.is_empty() {
        &table.id
    } else {
        &table.name
    }
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<String> {
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort();
    names
}
