//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use verdict_sdk::{DecisionEngine, DecisionEngineBuilder, EngineConfig, Value};

/// Test helper to create a DecisionEngine from inline YAML definitions
pub struct TestEngine {
    decisions: Vec<String>,
    bkms: Vec<String>,
    config: EngineConfig,
}

impl TestEngine {
    pub fn new() -> Self {
        Self {
            decisions: Vec::new(),
            bkms: Vec::new(),
            config: EngineConfig::default(),
        }
    }

    /// Add one `decisions:` entry, written flush left starting with `- name:`
    pub fn with_decision(mut self, decision_yaml: &str) -> Self {
        self.decisions.push(dedent(decision_yaml));
        self
    }

    /// Add one `bkms:` entry, written flush left starting with `- name:`
    pub fn with_bkm(mut self, bkm_yaml: &str) -> Self {
        self.bkms.push(dedent(bkm_yaml));
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The combined model document
    pub fn model_yaml(&self) -> String {
        let mut yaml = String::from("model:\n  name: test-model\n");
        if !self.decisions.is_empty() {
            yaml.push_str("  decisions:\n");
            for decision in &self.decisions {
                yaml.push_str(&indent(decision, 4));
            }
        }
        if !self.bkms.is_empty() {
            yaml.push_str("  bkms:\n");
            for bkm in &self.bkms {
                yaml.push_str(&indent(bkm, 4));
            }
        }
        yaml
    }

    pub fn build(&self) -> DecisionEngine {
        DecisionEngineBuilder::new()
            .with_config(self.config.clone())
            .add_model_content(self.model_yaml())
            .build()
            .expect("Failed to build engine")
    }

    /// Evaluate a single decision against a JSON context
    pub fn decide(&self, name: &str, context: serde_json::Value) -> Value {
        self.build()
            .evaluate_decision(name, &Value::from(context))
            .expect("Evaluation failed")
    }
}

/// Convert a JSON literal into a context value
pub fn ctx(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// Evaluate a FEEL expression with no decisions loaded
pub fn feel(expression: &str, context: serde_json::Value) -> Value {
    DecisionEngine::default()
        .evaluate_expression(expression, &Value::from(context))
        .expect("Expression failed")
}

fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().skip_while(|l| l.trim().is_empty()).collect();
    let margin = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| if l.len() >= margin { &l[margin..] } else { l.trim_start() })
        .collect::<Vec<_>>()
        .join("\n")
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|l| {
            if l.trim().is_empty() {
                "\n".to_string()
            } else {
                format!("{pad}{l}\n")
            }
        })
        .collect()
}
