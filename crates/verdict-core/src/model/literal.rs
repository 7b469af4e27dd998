//! Literal expression decisions

use crate::ast::Expression;
use serde::{Deserialize, Serialize};

/// A decision whose logic is a single FEEL expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralDecision {
    pub name: String,
    pub expression_text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ast: Option<Expression>,
}

impl LiteralDecision {
    pub fn new(name: impl Into<String>, expression_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression_text: expression_text.into(),
            ast: None,
        }
    }

    pub fn with_ast(mut self, ast: Expression) -> Self {
        self.ast = Some(ast);
        self
    }

    /// True when there is nothing to evaluate
    pub fn is_empty(&self) -> bool {
        self.expression_text.trim().is_empty() && self.ast.is_none()
    }
}
