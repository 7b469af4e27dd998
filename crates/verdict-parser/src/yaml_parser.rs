//! YAML Parser
//!
//! Helpers for reading model documents. JSON documents are read into the same
//! `serde_yaml::Value` tree so one set of accessors serves both formats.

use crate::error::{ParseError, Result};
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Parse JSON string into a YAML value tree
    pub fn parse_json(json_str: &str) -> Result<YamlValue> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Get a required string field from YAML object
    pub fn get_string(obj: &YamlValue, field: &str) -> Result<String> {
        obj.get(field)
            .and_then(Self::scalar_to_string)
            .ok_or_else(|| ParseError::MissingField {
                field: field.to_string(),
            })
    }

    /// Get an optional string field from YAML object
    pub fn get_optional_string(obj: &YamlValue, field: &str) -> Option<String> {
        obj.get(field).and_then(Self::scalar_to_string)
    }

    /// Get an optional array field from YAML object
    pub fn get_optional_array<'a>(obj: &'a YamlValue, field: &str) -> Option<&'a Vec<YamlValue>> {
        obj.get(field).and_then(|v| v.as_sequence())
    }

    /// Get a list of scalars as strings; a missing field yields an empty list
    pub fn get_string_list(obj: &YamlValue, field: &str) -> Result<Vec<String>> {
        let Some(value) = obj.get(field) else {
            return Ok(Vec::new());
        };
        if value.is_null() {
            return Ok(Vec::new());
        }

        let items = value.as_sequence().ok_or_else(|| ParseError::InvalidValue {
            field: field.to_string(),
            message: "expected a list".to_string(),
        })?;

        items
            .iter()
            .map(|item| {
                Self::scalar_to_string(item).ok_or_else(|| ParseError::InvalidValue {
                    field: field.to_string(),
                    message: "list items must be scalars".to_string(),
                })
            })
            .collect()
    }

    /// Render a scalar (string, number, boolean, null) as text.
    ///
    /// Rule cells are FEEL source text, so `- 10` and `- "10"` read the same.
    pub fn scalar_to_string(value: &YamlValue) -> Option<String> {
        match value {
            YamlValue::Null => Some("null".to_string()),
            YamlValue::Bool(b) => Some(b.to_string()),
            YamlValue::Number(n) => Some(n.to_string()),
            YamlValue::String(s) => Some(s.clone()),
            YamlValue::Tagged(t) => Self::scalar_to_string(&t.value),
            YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
        }
    }

    /// Check if a field exists in YAML object
    pub fn has_field(obj: &YamlValue, field: &str) -> bool {
        obj.get(field).is_some()
    }

    /// Report fields of a YAML object that are not in `known_fields`
    pub fn validate_fields(obj: &YamlValue, known_fields: &[&str], context: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(mapping) = obj.as_mapping() {
            for (key, _) in mapping {
                let Some(field_name) = key.as_str() else {
                    continue;
                };
                if known_fields.contains(&field_name) {
                    continue;
                }

                let suggestion = FIELD_CORRECTIONS
                    .iter()
                    .find(|(typo, _)| *typo == field_name)
                    .map(|(_, correct)| correct.to_string())
                    .or_else(|| Self::find_similar_field(field_name, known_fields))
                    .map(|similar| format!(" Did you mean '{}'?", similar))
                    .unwrap_or_default();

                warnings.push(format!(
                    "Unknown field '{}' in {}.{}",
                    field_name, context, suggestion
                ));
            }
        }

        warnings
    }

    /// Find similar field names using Levenshtein distance
    fn find_similar_field(field: &str, known_fields: &[&str]) -> Option<String> {
        known_fields
            .iter()
            .filter(|known| levenshtein_distance(field, known) <= 2)
            .min_by_key(|known| levenshtein_distance(field, known))
            .map(|s| s.to_string())
    }
}

/// Common field name typos and their corrections
const FIELD_CORRECTIONS: &[(&str, &str)] = &[
    ("hitpolicy", "hit_policy"),
    ("hit-policy", "hit_policy"),
    ("aggregator", "aggregation"),
    ("allowedValues", "allowed_values"),
    ("outputValues", "output_values"),
    ("params", "parameters"),
    ("decisionTable", "decision_table"),
    ("expr", "expression"),
];

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    if s1_chars.is_empty() {
        return s2_chars.len();
    }
    if s2_chars.is_empty() {
        return s1_chars.len();
    }

    let mut previous: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut current = vec![0; s2_chars.len() + 1];

    for (i, &c1) in s1_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, &c2) in s2_chars.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[s2_chars.len()]
}
