//! AST evaluator
//!
//! A tree walk over [`Expression`] nodes. The evaluator never mutates the
//! tree, so one AST can be evaluated concurrently against many contexts.

use super::binder::{bind_arguments, CallArguments, Parameter, Signature};
use super::operators::{execute_binary_op, execute_unary_op};
use crate::bkm::BkmSnapshot;
use crate::context::{lookup_property, lookup_variable};
use crate::error::{Result, RuntimeError};
use crate::functions;
use std::collections::HashMap;
use std::sync::Arc;
use verdict_core::{BusinessKnowledgeModel, Expression, FunctionParameter, Value};
use verdict_parser::ExpressionParser;

/// Default limit on nested BKM invocations
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 64;

/// Evaluates expressions against a context value.
///
/// Function calls resolve to built-ins first, then to the BKMs in the
/// snapshot the evaluator was built with.
#[derive(Debug, Clone)]
pub struct Evaluator {
    bkms: BkmSnapshot,
    depth: usize,
    max_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Create an evaluator with no BKMs
    pub fn new() -> Self {
        Self {
            bkms: BkmSnapshot::default(),
            depth: 0,
            max_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }

    /// Make the BKMs in `bkms` callable by name
    pub fn with_bkms(mut self, bkms: BkmSnapshot) -> Self {
        self.bkms = bkms;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn bkms(&self) -> &BkmSnapshot {
        &self.bkms
    }

    /// Current BKM nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate an AST against a context
    pub fn evaluate(&self, expr: &Expression, context: &Value) -> Result<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::List(items) => items
                .iter()
                .map(|item| self.evaluate(item, context))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),

            Expression::Variable(name) => lookup_variable(context, name),

            Expression::Unary { op, operand } => {
                let value = self.evaluate(operand, context)?;
                execute_unary_op(&value, op)
            }

            Expression::Binary { left, op, right } => {
                let left = self.evaluate(left, context)?;
                let right = self.evaluate(right, context)?;
                execute_binary_op(&left, op, &right)
            }

            Expression::PropertyAccess { base, property } => {
                let base = self.evaluate(base, context)?;
                lookup_property(&base, property)
            }

            Expression::Conditional {
                condition,
                then_branch,
                else_branch,
            } => match self.evaluate(condition, context)? {
                Value::Bool(true) => self.evaluate(then_branch, context),
                Value::Bool(false) | Value::Null => self.evaluate(else_branch, context),
                other => {
                    tracing::debug!(
                        "Non-boolean condition of type {}, returning Null",
                        other.type_name()
                    );
                    Ok(Value::Null)
                }
            },

            Expression::FunctionCall { name, parameters } => {
                self.evaluate_call(name, parameters, context)
            }
        }
    }

    /// Parse `text` and evaluate it
    pub fn evaluate_str(&self, text: &str, context: &Value) -> Result<Value> {
        let expr = ExpressionParser::parse(text)?;
        self.evaluate(&expr, context)
    }

    fn evaluate_call(
        &self,
        name: &str,
        parameters: &[FunctionParameter],
        context: &Value,
    ) -> Result<Value> {
        if let Some(builtin) = functions::lookup(name) {
            let arguments = self.evaluate_arguments(parameters, context)?;
            return match bind_arguments(name, Some(&builtin.signature), arguments) {
                Ok(args) => Ok(builtin.call(&args)),
                Err(err) => {
                    tracing::debug!("{}, returning Null", err);
                    Ok(Value::Null)
                }
            };
        }

        let Some(bkm) = self.bkms.get(name).cloned() else {
            return Err(RuntimeError::UnknownFunction(name.to_string()));
        };

        let args = match self.evaluate_arguments(parameters, context)? {
            CallArguments::Positional(values) => values,
            named => match bind_arguments(name, Some(&bkm_signature(&bkm)), named) {
                Ok(args) => args,
                Err(err) => {
                    tracing::debug!("{}, returning Null", err);
                    return Ok(Value::Null);
                }
            },
        };

        self.invoke_bkm(&bkm, args, context)
    }

    /// Evaluate call arguments, keeping their names when the call uses them
    fn evaluate_arguments(
        &self,
        parameters: &[FunctionParameter],
        context: &Value,
    ) -> Result<CallArguments> {
        if parameters.iter().any(FunctionParameter::is_named) {
            let pairs = parameters
                .iter()
                .map(|param| {
                    let value = self.evaluate(&param.value, context)?;
                    Ok((param.name.clone().unwrap_or_default(), value))
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok(CallArguments::Named(pairs));
        }

        parameters
            .iter()
            .map(|param| self.evaluate(&param.value, context))
            .collect::<Result<Vec<_>>>()
            .map(CallArguments::Positional)
    }

    /// Invoke a BKM with positional arguments.
    ///
    /// The body sees the caller's context with each formal parameter bound
    /// to its argument; parameters without an argument are null.
    pub fn invoke_bkm(
        &self,
        bkm: &BusinessKnowledgeModel,
        args: Vec<Value>,
        context: &Value,
    ) -> Result<Value> {
        if bkm.name.is_empty() {
            return Err(RuntimeError::ContractViolation(
                "BKM name cannot be empty during invocation".to_string(),
            ));
        }
        if bkm.ast.is_none() && bkm.expression_text.trim().is_empty() {
            return Err(RuntimeError::ContractViolation(format!(
                "BKM '{}' has an empty expression",
                bkm.name
            )));
        }
        if self.depth >= self.max_depth {
            return Err(RuntimeError::RecursionLimitExceeded {
                name: bkm.name.clone(),
                limit: self.max_depth,
            });
        }

        if !bkm.parameters.is_empty() && args.len() != bkm.parameters.len() {
            tracing::warn!(
                "BKM '{}': argument count ({}) differs from parameter count ({})",
                bkm.name,
                args.len(),
                bkm.parameters.len()
            );
        }

        let mut scope = match context {
            Value::Object(map) => map.clone(),
            _ => HashMap::new(),
        };
        let mut args = args.into_iter();
        for param in &bkm.parameters {
            scope.insert(param.clone(), args.next().unwrap_or_default());
        }
        let scope = Value::Object(scope);

        let nested = Self {
            bkms: Arc::clone(&self.bkms),
            depth: self.depth + 1,
            max_depth: self.max_depth,
        };
        tracing::debug!("Invoking BKM '{}' at depth {}", bkm.name, nested.depth);

        match &bkm.ast {
            Some(ast) => nested.evaluate(ast, &scope),
            None => nested.evaluate_str(&bkm.expression_text, &scope),
        }
    }
}

/// BKM parameters are bound leniently: all optional, extras tolerated
fn bkm_signature(bkm: &BusinessKnowledgeModel) -> Signature {
    let parameters = bkm
        .parameters
        .iter()
        .map(|name| Parameter::optional(name.as_str()))
        .collect();
    Signature::new(bkm.name.as_str(), parameters).variadic()
}

/// Evaluate an AST with a default evaluator
pub fn evaluate(expr: &Expression, context: &Value) -> Result<Value> {
    Evaluator::new().evaluate(expr, context)
}

/// Parse and evaluate expression text with a default evaluator
pub fn evaluate_str(text: &str, context: &Value) -> Result<Value> {
    Evaluator::new().evaluate_str(text, context)
}
