//! Expression AST nodes

use super::operator::{Operator, UnaryOperator};
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value (number, string, boolean or null)
    Literal(Value),

    /// List literal (e.g., `[1, 2, 3]`)
    List(Vec<Expression>),

    /// Variable reference resolved against the evaluation context
    Variable(String),

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Binary operation
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    /// Property access (e.g., applicant.age)
    PropertyAccess {
        base: Box<Expression>,
        property: String,
    },

    /// Conditional (if condition then a else b)
    Conditional {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },

    /// Function call with positional or named parameters
    FunctionCall {
        name: String,
        parameters: Vec<FunctionParameter>,
    },
}

/// A single argument of a function call.
///
/// Named arguments carry their parameter name; positional arguments do not.
/// A call never mixes the two styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameter {
    pub name: Option<String>,
    pub value: Expression,
}

impl FunctionParameter {
    pub fn positional(value: Expression) -> Self {
        Self { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

/// Discriminant of an [`Expression`] node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Literal,
    List,
    Variable,
    Unary,
    Binary,
    PropertyAccess,
    Conditional,
    FunctionCall,
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(value)
    }

    /// Create a list expression
    pub fn list(items: Vec<Expression>) -> Self {
        Expression::List(items)
    }

    /// Create a variable reference
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a unary expression
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a property access expression
    pub fn property(base: Expression, property: impl Into<String>) -> Self {
        Expression::PropertyAccess {
            base: Box::new(base),
            property: property.into(),
        }
    }

    /// Create a conditional expression
    pub fn conditional(
        condition: Expression,
        then_branch: Expression,
        else_branch: Expression,
    ) -> Self {
        Expression::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// Create a function call expression
    pub fn function_call(name: impl Into<String>, parameters: Vec<FunctionParameter>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            parameters,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Literal(_) => NodeKind::Literal,
            Expression::List(_) => NodeKind::List,
            Expression::Variable(_) => NodeKind::Variable,
            Expression::Unary { .. } => NodeKind::Unary,
            Expression::Binary { .. } => NodeKind::Binary,
            Expression::PropertyAccess { .. } => NodeKind::PropertyAccess,
            Expression::Conditional { .. } => NodeKind::Conditional,
            Expression::FunctionCall { .. } => NodeKind::FunctionCall,
        }
    }
}
