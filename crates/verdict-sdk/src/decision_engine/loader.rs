//! Model loading and AST caching utilities

use crate::error::{Result, SdkError};
use std::path::Path;
use verdict_core::{BusinessKnowledgeModel, DecisionTable, LiteralDecision};
use verdict_parser::{try_parse_expression, try_parse_input_entry, ModelDocument, ModelParser};

pub(super) struct ModelLoader;

impl ModelLoader {
    /// Parse model text; text starting with `{` is read as JSON, anything else as YAML
    pub(super) fn parse_text(parser: &ModelParser, text: &str) -> Result<ModelDocument> {
        let trimmed = text.trim_start();
        if trimmed.is_empty() {
            return Err(SdkError::InvalidModel(
                "model text cannot be empty".to_string(),
            ));
        }

        let document = if trimmed.starts_with('{') {
            parser.parse_json(text)?
        } else {
            parser.parse(text)?
        };
        Ok(document)
    }

    /// Read and parse a model file; a `.json` extension selects JSON
    pub(super) fn parse_file(parser: &ModelParser, path: &Path) -> Result<ModelDocument> {
        tracing::debug!("Loading model file: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(SdkError::InvalidModel(format!(
                "model file is empty: {}",
                path.display()
            )));
        }

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let document = if is_json {
            parser.parse_json(&content)?
        } else {
            parser.parse(&content)?
        };
        Ok(document)
    }

    /// Fill in ASTs missing from tables built in code.
    ///
    /// Input entries are cached only when they are not unary tests.
    pub(super) fn cache_table(table: &mut DecisionTable) {
        for rule in &mut table.rules {
            for entry in rule.input_entries.iter_mut().filter(|e| e.ast.is_none()) {
                entry.ast = try_parse_input_entry(&entry.text);
            }
            for entry in rule.output_entries.iter_mut().filter(|e| e.ast.is_none()) {
                entry.ast = try_parse_expression(&entry.text);
            }
        }
    }

    pub(super) fn cache_literal(decision: &mut LiteralDecision) {
        if decision.ast.is_none() {
            decision.ast = try_parse_expression(&decision.expression_text);
        }
    }

    pub(super) fn cache_bkm(bkm: &mut BusinessKnowledgeModel) {
        if bkm.ast.is_none() {
            bkm.ast = try_parse_expression(&bkm.expression_text);
        }
    }
}
