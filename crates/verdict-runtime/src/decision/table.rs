//! Decision table evaluation
//!
//! Evaluation runs in four steps:
//!
//! 1. reject inputs outside a clause's `allowed_values`
//! 2. match every rule, in declaration order, against the context
//! 3. compute the outputs of each matching rule
//! 4. combine the matches according to the hit policy
//!
//! Input entries with a cached AST are evaluated and compared for equality
//! with the input value. When evaluation fails, or no AST was cached, the
//! raw cell text is matched as a unary test instead.

use super::unary_test::entry_matches;
use crate::engine::Evaluator;
use crate::error::{Result, RuntimeError};
use std::cmp::Ordering;
use std::collections::HashMap;
use verdict_core::model::strip_quotes;
use verdict_core::{CollectAggregation, DecisionTable, Entry, HitPolicy, Rule, Value};

/// Evaluates decision tables against a context
#[derive(Debug, Clone)]
pub struct DecisionTableEngine {
    evaluator: Evaluator,
    strict_input_values: bool,
}

impl Default for DecisionTableEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTableEngine {
    pub fn new() -> Self {
        Self {
            evaluator: Evaluator::new(),
            strict_input_values: true,
        }
    }

    /// Evaluate cells with `evaluator`, typically one that can call BKMs
    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Enable or disable the `allowed_values` check
    pub fn with_strict_input_values(mut self, strict: bool) -> Self {
        self.strict_input_values = strict;
        self
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Evaluate a table against a context
    pub fn evaluate(&self, table: &DecisionTable, context: &Value) -> Result<Value> {
        if self.strict_input_values {
            validate_input_values(table, context)?;
        }

        let matches = self.find_matches(table, context);
        tracing::debug!(
            "Decision table '{}' ({}): {} matching rule(s)",
            table.id,
            table.hit_policy,
            matches.len()
        );

        Ok(apply_hit_policy(table, matches))
    }

    /// Outputs of every matching rule, in declaration order.
    ///
    /// Single-hit policies stop at the first match.
    fn find_matches(&self, table: &DecisionTable, context: &Value) -> Vec<Value> {
        let input_values: Vec<Value> = table
            .inputs
            .iter()
            .map(|input| input_value(context, &input.label))
            .collect();

        let mut matches = Vec::new();
        for rule in &table.rules {
            if !self.rule_matches(rule, &input_values, context) {
                continue;
            }

            matches.push(self.rule_output(table, rule, context));
            if is_single_hit(table.hit_policy) {
                break;
            }
        }
        matches
    }

    fn rule_matches(&self, rule: &Rule, input_values: &[Value], context: &Value) -> bool {
        rule.input_entries
            .iter()
            .zip(input_values)
            .all(|(entry, value)| self.input_entry_matches(entry, value, context))
    }

    fn input_entry_matches(&self, entry: &Entry, value: &Value, context: &Value) -> bool {
        if let Some(ast) = &entry.ast {
            match self.evaluator.evaluate(ast, context) {
                Ok(result) => return result == *value,
                Err(err) => tracing::debug!(
                    "Input entry '{}' failed to evaluate ({}), using text matching",
                    entry.text,
                    err
                ),
            }
        }
        entry_matches(&entry.text, value)
    }

    /// Output of a matching rule: an object keyed by label for multi-output
    /// tables, the bare value otherwise
    fn rule_output(&self, table: &DecisionTable, rule: &Rule, context: &Value) -> Value {
        if !table.is_multi_output() {
            return rule
                .output_entries
                .first()
                .map_or(Value::Null, |entry| self.output_value(entry, context));
        }

        let fields: HashMap<String, Value> = table
            .outputs
            .iter()
            .enumerate()
            .map(|(index, output)| {
                let value = rule
                    .output_entries
                    .get(index)
                    .map_or(Value::Null, |entry| self.output_value(entry, context));
                (output.label.clone(), value)
            })
            .collect();
        Value::Object(fields)
    }

    fn output_value(&self, entry: &Entry, context: &Value) -> Value {
        if let Some(ast) = &entry.ast {
            match self.evaluator.evaluate(ast, context) {
                Ok(value) => return value,
                Err(err) => tracing::debug!(
                    "Output entry '{}' failed to evaluate ({}), using literal text",
                    entry.text,
                    err
                ),
            }
        }
        Value::String(strip_quotes(&entry.text).to_string())
    }
}

/// Evaluate a table with a default engine
pub fn evaluate_decision_table(table: &DecisionTable, context: &Value) -> Result<Value> {
    DecisionTableEngine::new().evaluate(table, context)
}

fn input_value(context: &Value, label: &str) -> Value {
    context.get_path(label).cloned().unwrap_or_default()
}

fn is_single_hit(hit_policy: HitPolicy) -> bool {
    matches!(
        hit_policy,
        HitPolicy::First | HitPolicy::Unique | HitPolicy::Any
    )
}

/// Reject present, non-null inputs that are not among the clause's allowed values
fn validate_input_values(table: &DecisionTable, context: &Value) -> Result<()> {
    for input in table.inputs.iter().filter(|i| !i.allowed_values.is_empty()) {
        let value = input_value(context, &input.label);
        if value.is_null() {
            continue;
        }

        let rendered = value.to_feel_string();
        let allowed = input
            .allowed_values
            .iter()
            .any(|candidate| strip_quotes(candidate) == rendered);
        if !allowed {
            return Err(RuntimeError::InputNotAllowed {
                label: input.label.clone(),
                value: rendered,
                allowed: input.allowed_values.join(", "),
            });
        }
    }
    Ok(())
}

fn apply_hit_policy(table: &DecisionTable, mut matches: Vec<Value>) -> Value {
    match table.hit_policy {
        HitPolicy::First | HitPolicy::Unique | HitPolicy::Any => {
            matches.into_iter().next().unwrap_or_default()
        }
        HitPolicy::RuleOrder => Value::List(matches),
        HitPolicy::OutputOrder => {
            let first_label = table
                .outputs
                .first()
                .filter(|_| table.is_multi_output())
                .map(|o| o.label.as_str());
            matches.sort_by(|a, b| {
                SortKey::of(a, first_label).cmp(&SortKey::of(b, first_label))
            });
            Value::List(matches)
        }
        HitPolicy::Priority => {
            let index = priority_index(table, &matches);
            matches.into_iter().nth(index).unwrap_or_default()
        }
        HitPolicy::Collect => collect(table, matches),
    }
}

/// Sort key for OUTPUT_ORDER: numbers first, then strings, then the rest
#[derive(Debug, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
    Other(String),
}

impl SortKey {
    /// Key of a match; multi-output rows sort on their first output column
    fn of(value: &Value, first_label: Option<&str>) -> Self {
        let value = match (value, first_label) {
            (Value::Object(fields), Some(label)) => fields.get(label).unwrap_or(&Value::Null),
            _ => value,
        };
        match value {
            Value::Number(n) => SortKey::Number(*n),
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(n) => SortKey::Number(n),
                Err(_) => SortKey::Text(s.clone()),
            },
            other => SortKey::Other(other.to_feel_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Text(_) => 1,
            SortKey::Other(_) => 2,
        }
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) | (SortKey::Other(a), SortKey::Other(b)) => {
                a.cmp(b)
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Index of the match whose outputs rank highest.
///
/// Columns are compared left to right; the first column where exactly one
/// side ranks strictly better decides. Columns without `output_values` and
/// values absent from the list do not rank.
fn priority_index(table: &DecisionTable, matches: &[Value]) -> usize {
    let mut best = 0;
    for current in 1..matches.len() {
        for output in table.outputs.iter().filter(|o| !o.output_values.is_empty()) {
            let column = |row: &Value| -> Option<usize> {
                let value = if table.is_multi_output() {
                    row.get(&output.label)?
                } else {
                    row
                };
                output.priority_of(&value.to_feel_string())
            };

            let best_rank = column(&matches[best]);
            let current_rank = column(&matches[current]);
            match (current_rank, best_rank) {
                (Some(c), Some(b)) if c < b => {
                    best = current;
                    break;
                }
                (Some(_), None) => {
                    best = current;
                    break;
                }
                (Some(c), Some(b)) if b < c => break,
                (None, Some(_)) => break,
                _ => {}
            }
        }
    }
    best
}

fn collect(table: &DecisionTable, matches: Vec<Value>) -> Value {
    let result = match table.aggregation {
        CollectAggregation::None => Value::List(matches),
        CollectAggregation::Count => Value::Number(matches.len() as f64),
        CollectAggregation::Sum if matches.is_empty() => Value::Null,
        CollectAggregation::Sum => Value::Number(numeric_outputs(&matches).iter().sum()),
        CollectAggregation::Min => extremum(matches, f64::min),
        CollectAggregation::Max => extremum(matches, f64::max),
    };

    // single-output tables report the aggregate under the output label
    match table.outputs.as_slice() {
        [output] if !output.label.is_empty() => Value::object([(output.label.clone(), result)]),
        _ => result,
    }
}

/// MIN/MAX over the numeric outputs; with none, the first match is returned
fn extremum(matches: Vec<Value>, pick: fn(f64, f64) -> f64) -> Value {
    match numeric_outputs(&matches).into_iter().reduce(pick) {
        Some(n) => Value::Number(n),
        None => matches.into_iter().next().unwrap_or_default(),
    }
}

/// Numbers and numeric strings; everything else is skipped
fn numeric_outputs(matches: &[Value]) -> Vec<f64> {
    matches
        .iter()
        .filter_map(|value| match value {
            Value::Number(n) => Some(*n),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .collect()
}
