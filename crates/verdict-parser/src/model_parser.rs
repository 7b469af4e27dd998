//! Model document parser
//!
//! Reads a YAML or JSON decision model into decision tables, literal
//! decisions and business knowledge models. Rule cells, literal expressions
//! and BKM bodies are parsed to ASTs once here; a cell that does not parse
//! keeps an empty cache and is matched from its raw text at evaluation time.

use crate::error::{ParseError, Result};
use crate::expression_parser::ExpressionParser;
use crate::yaml_parser::YamlParser;
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;
use std::str::FromStr;
use verdict_core::ast::Expression;
use verdict_core::model::{
    BusinessKnowledgeModel, CollectAggregation, DecisionTable, Entry, HitPolicy, InputClause,
    LiteralDecision, OutputClause, Rule,
};

const MODEL_FIELDS: &[&str] = &["name", "decisions", "bkms"];
const DECISION_FIELDS: &[&str] = &["name", "decision_table", "expression"];
const TABLE_FIELDS: &[&str] = &[
    "id",
    "name",
    "hit_policy",
    "aggregation",
    "inputs",
    "outputs",
    "rules",
];
const RULE_FIELDS: &[&str] = &["id", "description", "inputs", "outputs"];
const BKM_FIELDS: &[&str] = &["name", "parameters", "expression"];

/// A parsed decision model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub decision_tables: Vec<DecisionTable>,
    #[serde(default)]
    pub literal_decisions: Vec<LiteralDecision>,
    #[serde(default)]
    pub bkms: Vec<BusinessKnowledgeModel>,
}

impl ModelDocument {
    /// Names of all decisions in document order
    pub fn decision_names(&self) -> Vec<&str> {
        self.decision_tables
            .iter()
            .map(|t| t.name.as_str())
            .chain(self.literal_decisions.iter().map(|d| d.name.as_str()))
            .collect()
    }
}

/// Model document parser
#[derive(Debug, Clone, Copy)]
pub struct ModelParser {
    cache_asts: bool,
}

impl Default for ModelParser {
    fn default() -> Self {
        Self { cache_asts: true }
    }
}

impl ModelParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Control whether ASTs are pre-parsed at load time
    pub fn with_ast_cache(mut self, cache_asts: bool) -> Self {
        self.cache_asts = cache_asts;
        self
    }

    /// Parse a YAML model document
    pub fn parse(&self, yaml_str: &str) -> Result<ModelDocument> {
        let yaml = YamlParser::parse(yaml_str)?;
        self.parse_from_yaml(&yaml)
    }

    /// Parse a JSON model document
    pub fn parse_json(&self, json_str: &str) -> Result<ModelDocument> {
        let yaml = YamlParser::parse_json(json_str)?;
        self.parse_from_yaml(&yaml)
    }

    /// Parse a model from a YAML value; the `model:` wrapper is optional
    pub fn parse_from_yaml(&self, yaml: &YamlValue) -> Result<ModelDocument> {
        let model = yaml.get("model").unwrap_or(yaml);
        if !model.is_mapping() {
            return Err(ParseError::MissingField {
                field: "model".to_string(),
            });
        }
        self.warn_unknown_fields(model, MODEL_FIELDS, "model");

        let mut document = ModelDocument {
            name: YamlParser::get_optional_string(model, "name"),
            ..Default::default()
        };

        if let Some(decisions) = YamlParser::get_optional_array(model, "decisions") {
            for decision in decisions {
                self.parse_decision(decision, &mut document)?;
            }
        }

        if let Some(bkms) = YamlParser::get_optional_array(model, "bkms") {
            for bkm in bkms {
                document.bkms.push(self.parse_bkm(bkm)?);
            }
        }

        Ok(document)
    }

    fn parse_decision(&self, yaml: &YamlValue, document: &mut ModelDocument) -> Result<()> {
        self.warn_unknown_fields(yaml, DECISION_FIELDS, "decision");
        let name = YamlParser::get_string(yaml, "name")?;

        if let Some(table) = yaml.get("decision_table") {
            document
                .decision_tables
                .push(self.parse_decision_table(table, &name)?);
            return Ok(());
        }

        if YamlParser::has_field(yaml, "expression") {
            let text = YamlParser::get_string(yaml, "expression")?;
            let ast = self.cache_expression(&text);
            document.literal_decisions.push(LiteralDecision {
                name,
                expression_text: text,
                ast,
            });
            return Ok(());
        }

        Err(ParseError::InvalidValue {
            field: name,
            message: "decision needs either 'decision_table' or 'expression'".to_string(),
        })
    }

    /// Parse a decision table, naming it after its decision
    pub fn parse_decision_table(&self, yaml: &YamlValue, name: &str) -> Result<DecisionTable> {
        self.warn_unknown_fields(yaml, TABLE_FIELDS, "decision_table");

        let id = YamlParser::get_optional_string(yaml, "id").unwrap_or_else(|| name.to_string());
        let (hit_policy, implied_aggregation) = match YamlParser::get_optional_string(yaml, "hit_policy")
        {
            Some(text) => parse_hit_policy(&text)?,
            None => (HitPolicy::Unique, None),
        };

        let aggregation = match YamlParser::get_optional_string(yaml, "aggregation") {
            Some(text) => {
                CollectAggregation::from_str(&text).map_err(|e| ParseError::InvalidValue {
                    field: "aggregation".to_string(),
                    message: e.to_string(),
                })?
            }
            None => implied_aggregation.unwrap_or_default(),
        };

        let inputs = YamlParser::get_optional_array(yaml, "inputs")
            .map(|items| items.iter().map(parse_input_clause).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();

        let outputs = YamlParser::get_optional_array(yaml, "outputs")
            .map(|items| items.iter().map(parse_output_clause).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();

        let rules = YamlParser::get_optional_array(yaml, "rules")
            .map(|items| items.iter().map(|r| self.parse_rule(r)).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();

        Ok(DecisionTable {
            id,
            name: name.to_string(),
            hit_policy,
            aggregation,
            inputs,
            outputs,
            rules,
        })
    }

    fn parse_rule(&self, yaml: &YamlValue) -> Result<Rule> {
        self.warn_unknown_fields(yaml, RULE_FIELDS, "rule");

        let input_entries = YamlParser::get_string_list(yaml, "inputs")?
            .into_iter()
            .map(|text| {
                let ast = self.cache_input_entry(&text);
                Entry { text, ast }
            })
            .collect();

        let output_entries = YamlParser::get_string_list(yaml, "outputs")?
            .into_iter()
            .map(|text| {
                let ast = self.cache_expression(&text);
                Entry { text, ast }
            })
            .collect();

        Ok(Rule {
            id: YamlParser::get_optional_string(yaml, "id"),
            description: YamlParser::get_optional_string(yaml, "description"),
            input_entries,
            output_entries,
        })
    }

    fn parse_bkm(&self, yaml: &YamlValue) -> Result<BusinessKnowledgeModel> {
        self.warn_unknown_fields(yaml, BKM_FIELDS, "bkm");

        let name = YamlParser::get_string(yaml, "name")?;
        let expression_text = YamlParser::get_string(yaml, "expression")?;
        let ast = self.cache_expression(&expression_text);

        Ok(BusinessKnowledgeModel {
            name,
            parameters: YamlParser::get_string_list(yaml, "parameters")?,
            expression_text,
            ast,
        })
    }

    fn cache_expression(&self, text: &str) -> Option<Expression> {
        if !self.cache_asts {
            return None;
        }
        try_parse_expression(text)
    }

    fn cache_input_entry(&self, text: &str) -> Option<Expression> {
        if !self.cache_asts {
            return None;
        }
        try_parse_input_entry(text)
    }

    fn warn_unknown_fields(&self, yaml: &YamlValue, known: &[&str], context: &str) {
        for warning in YamlParser::validate_fields(yaml, known, context) {
            log::warn!("{}", warning);
        }
    }
}

/// Parse text to an AST, or `None` when it is empty or not a valid expression
pub fn try_parse_expression(text: &str) -> Option<Expression> {
    if text.trim().is_empty() {
        return None;
    }
    match ExpressionParser::parse(text) {
        Ok(ast) => Some(ast),
        Err(e) => {
            log::debug!("Expression '{}' not cached as AST: {}", text, e);
            None
        }
    }
}

/// Parse an input cell to an AST unless it is written as a unary test.
///
/// Wildcards, comparisons, ranges, lists and negations are left to text
/// matching, which understands unary-test syntax.
pub fn try_parse_input_entry(text: &str) -> Option<Expression> {
    let trimmed = text.trim();
    let unary_test = trimmed.is_empty()
        || trimmed == "-"
        || trimmed.starts_with(['<', '>'])
        || trimmed.contains("..")
        || trimmed.contains('[')
        || trimmed.contains('(');
    if unary_test {
        return None;
    }
    try_parse_expression(trimmed)
}

/// Parse a hit policy, returning the aggregation implied by `C+`, `C#`, `C<`, `C>`
pub fn parse_hit_policy(text: &str) -> Result<(HitPolicy, Option<CollectAggregation>)> {
    let hit_policy = HitPolicy::from_str(text).map_err(|e| ParseError::InvalidValue {
        field: "hit_policy".to_string(),
        message: e.to_string(),
    })?;
    Ok((hit_policy, CollectAggregation::from_hit_policy_suffix(text)))
}

fn parse_input_clause(yaml: &YamlValue) -> Result<InputClause> {
    Ok(InputClause {
        label: YamlParser::get_string(yaml, "label")?,
        type_ref: YamlParser::get_optional_string(yaml, "type"),
        allowed_values: YamlParser::get_string_list(yaml, "allowed_values")?,
    })
}

fn parse_output_clause(yaml: &YamlValue) -> Result<OutputClause> {
    Ok(OutputClause {
        label: YamlParser::get_optional_string(yaml, "label").unwrap_or_default(),
        type_ref: YamlParser::get_optional_string(yaml, "type"),
        output_values: YamlParser::get_string_list(yaml, "output_values")?,
    })
}
