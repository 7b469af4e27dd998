//! Business Knowledge Model definitions

use crate::ast::Expression;
use serde::{Deserialize, Serialize};

/// A named, parameterized FEEL expression callable like a function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessKnowledgeModel {
    pub name: String,

    /// Formal parameter names, bound positionally on invocation
    #[serde(default)]
    pub parameters: Vec<String>,

    /// Body of the model
    pub expression_text: String,

    /// Parsed body, populated at load time when parsing succeeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ast: Option<Expression>,
}

impl BusinessKnowledgeModel {
    pub fn new(name: impl Into<String>, expression_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            expression_text: expression_text.into(),
            ast: None,
        }
    }

    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ast(mut self, ast: Expression) -> Self {
        self.ast = Some(ast);
        self
    }
}
