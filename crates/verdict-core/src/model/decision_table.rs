//! Decision table definitions
//!
//! A decision table maps input values to output values through an ordered
//! list of rules. The hit policy decides how multiple matching rules combine.

use crate::ast::Expression;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hit policy of a decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HitPolicy {
    /// At most one rule may match; the first match is returned
    #[default]
    Unique,
    /// Return the first matching rule in declaration order
    First,
    /// Return the match whose outputs rank highest in the output value lists
    Priority,
    /// Matching rules agree on output; the first match is returned
    Any,
    /// Collect all matches, optionally aggregated
    Collect,
    /// All matches in rule order
    RuleOrder,
    /// All matches sorted by output value
    OutputOrder,
}

impl HitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitPolicy::Unique => "UNIQUE",
            HitPolicy::First => "FIRST",
            HitPolicy::Priority => "PRIORITY",
            HitPolicy::Any => "ANY",
            HitPolicy::Collect => "COLLECT",
            HitPolicy::RuleOrder => "RULE_ORDER",
            HitPolicy::OutputOrder => "OUTPUT_ORDER",
        }
    }
}

impl fmt::Display for HitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HitPolicy {
    type Err = CoreError;

    /// Accepts full names (`RULE_ORDER`, `rule order`) and DMN single letters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "UNIQUE" | "U" => Ok(HitPolicy::Unique),
            "FIRST" | "F" => Ok(HitPolicy::First),
            "PRIORITY" | "P" => Ok(HitPolicy::Priority),
            "ANY" | "A" => Ok(HitPolicy::Any),
            "COLLECT" | "C" | "C+" | "C#" | "C<" | "C>" => Ok(HitPolicy::Collect),
            "RULE_ORDER" | "R" => Ok(HitPolicy::RuleOrder),
            "OUTPUT_ORDER" | "O" => Ok(HitPolicy::OutputOrder),
            _ => Err(CoreError::UnknownHitPolicy(s.to_string())),
        }
    }
}

/// Aggregation applied by the COLLECT hit policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CollectAggregation {
    /// Return all matches as a list
    #[default]
    None,
    Sum,
    Count,
    Min,
    Max,
}

impl CollectAggregation {
    /// Aggregation implied by a DMN hit policy shorthand such as `C+`
    pub fn from_hit_policy_suffix(s: &str) -> Option<Self> {
        match s.trim() {
            "C+" => Some(CollectAggregation::Sum),
            "C#" => Some(CollectAggregation::Count),
            "C<" => Some(CollectAggregation::Min),
            "C>" => Some(CollectAggregation::Max),
            _ => None,
        }
    }
}

impl FromStr for CollectAggregation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "NONE" => Ok(CollectAggregation::None),
            "SUM" | "+" => Ok(CollectAggregation::Sum),
            "COUNT" | "#" => Ok(CollectAggregation::Count),
            "MIN" | "<" => Ok(CollectAggregation::Min),
            "MAX" | ">" => Ok(CollectAggregation::Max),
            _ => Err(CoreError::UnknownAggregation(s.to_string())),
        }
    }
}

/// A rule cell: the raw FEEL text plus its parsed form when parsing succeeded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ast: Option<Expression>,
}

impl Entry {
    /// Create an entry without a cached AST
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ast: None,
        }
    }

    /// Create an entry with a cached AST
    pub fn with_ast(text: impl Into<String>, ast: Expression) -> Self {
        Self {
            text: text.into(),
            ast: Some(ast),
        }
    }

    pub fn has_ast(&self) -> bool {
        self.ast.is_some()
    }
}

/// Input column of a decision table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputClause {
    /// Label used to look the input up in the context
    pub label: String,

    #[serde(default)]
    pub type_ref: Option<String>,

    /// When non-empty, inputs outside this set are rejected
    #[serde(default)]
    pub allowed_values: Vec<String>,
}

impl InputClause {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, type_ref: impl Into<String>) -> Self {
        self.type_ref = Some(type_ref.into());
        self
    }

    pub fn with_allowed_values(mut self, values: Vec<String>) -> Self {
        self.allowed_values = values;
        self
    }
}

/// Output column of a decision table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputClause {
    pub label: String,

    #[serde(default)]
    pub type_ref: Option<String>,

    /// Priority order used by the PRIORITY hit policy (index 0 ranks highest)
    #[serde(default)]
    pub output_values: Vec<String>,
}

impl OutputClause {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, type_ref: impl Into<String>) -> Self {
        self.type_ref = Some(type_ref.into());
        self
    }

    pub fn with_output_values(mut self, values: Vec<String>) -> Self {
        self.output_values = values;
        self
    }

    /// Priority index of a rendered output value, if the column declares one
    pub fn priority_of(&self, rendered: &str) -> Option<usize> {
        self.output_values
            .iter()
            .position(|candidate| strip_quotes(candidate) == rendered)
    }
}

/// A single row of a decision table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub input_entries: Vec<Entry>,
    pub output_entries: Vec<Entry>,
}

impl Rule {
    pub fn new(input_entries: Vec<Entry>, output_entries: Vec<Entry>) -> Self {
        Self {
            id: None,
            description: None,
            input_entries,
            output_entries,
        }
    }

    /// Build a rule from raw cell texts, leaving every AST cache empty
    pub fn from_text<I, O, S, T>(inputs: I, outputs: O) -> Self
    where
        I: IntoIterator<Item = S>,
        O: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::new(
            inputs.into_iter().map(Entry::new).collect(),
            outputs.into_iter().map(Entry::new).collect(),
        )
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A decision table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecisionTable {
    pub id: String,
    pub name: String,
    pub hit_policy: HitPolicy,

    #[serde(default)]
    pub aggregation: CollectAggregation,

    pub inputs: Vec<InputClause>,
    pub outputs: Vec<OutputClause>,
    pub rules: Vec<Rule>,
}

impl DecisionTable {
    /// Create an empty table with the UNIQUE hit policy
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_hit_policy(mut self, hit_policy: HitPolicy) -> Self {
        self.hit_policy = hit_policy;
        self
    }

    pub fn with_aggregation(mut self, aggregation: CollectAggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn add_input(mut self, input: InputClause) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn add_output(mut self, output: OutputClause) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// True when the table has more than one output column
    pub fn is_multi_output(&self) -> bool {
        self.outputs.len() > 1
    }

    /// Iterate every entry of every rule
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.rules
            .iter_mut()
            .flat_map(|rule| rule.input_entries.iter_mut().chain(rule.output_entries.iter_mut()))
    }
}

/// Remove one layer of matching double or single quotes
pub fn strip_quotes(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}
