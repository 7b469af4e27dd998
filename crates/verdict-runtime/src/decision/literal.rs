//! Literal expression decisions

use crate::engine::Evaluator;
use crate::error::Result;
use verdict_core::{LiteralDecision, Value};

/// Evaluate a literal decision.
///
/// An empty expression is null. Without a cached AST the text is parsed on
/// every call.
pub fn evaluate_literal_decision(
    decision: &LiteralDecision,
    evaluator: &Evaluator,
    context: &Value,
) -> Result<Value> {
    if decision.is_empty() {
        return Ok(Value::Null);
    }

    let result = match &decision.ast {
        Some(ast) => evaluator.evaluate(ast, context)?,
        None => evaluator.evaluate_str(&decision.expression_text, context)?,
    };
    tracing::debug!("Literal decision '{}' = {}", decision.name, result);
    Ok(result)
}
