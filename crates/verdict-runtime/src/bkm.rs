//! Business Knowledge Model manager
//!
//! Holds the registered BKMs behind a reader/writer lock. Each invocation
//! takes a snapshot of the registry, so a BKM body can call other BKMs (or
//! itself) while registrations change concurrently.

use crate::engine::{Evaluator, DEFAULT_MAX_RECURSION_DEPTH};
use crate::error::{Result, RuntimeError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use verdict_core::{BusinessKnowledgeModel, Value};

/// Immutable view of the registered BKMs, keyed by name
pub type BkmSnapshot = Arc<HashMap<String, Arc<BusinessKnowledgeModel>>>;

/// Registry of business knowledge models
#[derive(Debug)]
pub struct BkmManager {
    models: RwLock<HashMap<String, Arc<BusinessKnowledgeModel>>>,
    max_depth: usize,
}

impl Default for BkmManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BkmManager {
    pub fn new() -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
            max_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }

    /// Limit on nested BKM invocations
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Register a BKM, replacing any model with the same name
    pub fn add(&self, bkm: BusinessKnowledgeModel) -> Result<()> {
        if bkm.name.is_empty() {
            return Err(RuntimeError::ContractViolation(
                "BKM name cannot be empty".to_string(),
            ));
        }

        let name = bkm.name.clone();
        if self.models.write().insert(name.clone(), Arc::new(bkm)).is_some() {
            tracing::debug!("Replaced BKM '{}'", name);
        } else {
            tracing::debug!("Registered BKM '{}'", name);
        }
        Ok(())
    }

    /// Invoke a registered BKM with positional arguments
    pub fn invoke(&self, name: &str, args: Vec<Value>, context: &Value) -> Result<Value> {
        if name.is_empty() {
            return Err(RuntimeError::ContractViolation(
                "BKM name cannot be empty".to_string(),
            ));
        }

        let snapshot = self.snapshot();
        let bkm = snapshot
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::BkmNotFound(name.to_string()))?;

        self.evaluator_for(snapshot).invoke_bkm(&bkm, args, context)
    }

    /// An evaluator that can call every BKM registered right now
    pub fn evaluator(&self) -> Evaluator {
        self.evaluator_for(self.snapshot())
    }

    fn evaluator_for(&self, snapshot: BkmSnapshot) -> Evaluator {
        Evaluator::new()
            .with_bkms(snapshot)
            .with_max_depth(self.max_depth)
    }

    pub fn has(&self, name: &str) -> bool {
        self.models.read().contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<Option<Arc<BusinessKnowledgeModel>>> {
        if name.is_empty() {
            return Err(RuntimeError::ContractViolation(
                "BKM name cannot be empty".to_string(),
            ));
        }
        Ok(self.models.read().get(name).cloned())
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove a BKM, returning whether it was registered
    pub fn remove(&self, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Err(RuntimeError::ContractViolation(
                "BKM name cannot be empty".to_string(),
            ));
        }
        Ok(self.models.write().remove(name).is_some())
    }

    pub fn clear(&self) {
        self.models.write().clear();
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }

    /// Copy the current registry into an immutable snapshot
    pub fn snapshot(&self) -> BkmSnapshot {
        Arc::new(self.models.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double() -> BusinessKnowledgeModel {
        BusinessKnowledgeModel::new("Double", "x * 2").with_parameters(["x"])
    }

    fn context() -> Value {
        Value::object(Vec::<(String, Value)>::new())
    }

    #[test]
    fn test_add_and_invoke() {
        let manager = BkmManager::new();
        manager.add(double()).unwrap();

        let result = manager
            .invoke("Double", vec![Value::Number(21.0)], &context())
            .unwrap();
        assert_eq!(result, Value::Number(42.0));
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let manager = BkmManager::new();
        let err = manager
            .add(BusinessKnowledgeModel::new("", "1"))
            .unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_invoke_unknown_name() {
        let manager = BkmManager::new();
        assert!(matches!(
            manager.invoke("Missing", vec![], &context()),
            Err(RuntimeError::BkmNotFound(name)) if name == "Missing"
        ));
        assert!(manager
            .invoke("", vec![], &context())
            .unwrap_err()
            .is_contract_violation());
    }

    #[test]
    fn test_empty_expression_is_contract_violation() {
        let manager = BkmManager::new();
        manager
            .add(BusinessKnowledgeModel::new("Blank", "  "))
            .unwrap();
        assert!(manager
            .invoke("Blank", vec![], &context())
            .unwrap_err()
            .is_contract_violation());
    }

    #[test]
    fn test_registry_operations() {
        let manager = BkmManager::new();
        manager.add(double()).unwrap();
        manager
            .add(BusinessKnowledgeModel::new("Answer", "42"))
            .unwrap();

        assert!(manager.has("Double"));
        assert!(!manager.has("double"));
        assert_eq!(manager.names(), vec!["Answer", "Double"]);
        assert_eq!(manager.len(), 2);
        assert_eq!(
            manager.get("Double").unwrap().map(|bkm| bkm.parameters.clone()),
            Some(vec!["x".to_string()])
        );

        assert!(manager.remove("Answer").unwrap());
        assert!(!manager.remove("Answer").unwrap());
        assert!(manager.get("").is_err());

        manager.clear();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_changes() {
        let manager = BkmManager::new();
        manager.add(double()).unwrap();
        let snapshot = manager.snapshot();

        manager.clear();
        assert!(snapshot.contains_key("Double"));
        assert!(manager.snapshot().is_empty());
    }

    #[test]
    fn test_replace_keeps_single_entry() {
        let manager = BkmManager::new();
        manager.add(double()).unwrap();
        manager
            .add(BusinessKnowledgeModel::new("Double", "x + x").with_parameters(["x"]))
            .unwrap();

        assert_eq!(manager.len(), 1);
        let result = manager
            .invoke("Double", vec![Value::Number(4.0)], &context())
            .unwrap();
        assert_eq!(result, Value::Number(8.0));
    }
}
