//! Unary operator execution

use super::coercion::{to_boolean, to_number};
use crate::error::Result;
use verdict_core::{UnaryOperator, Value};

/// Execute a unary operation
pub(crate) fn execute_unary_op(operand: &Value, op: &UnaryOperator) -> Result<Value> {
    match op {
        UnaryOperator::Not => Ok(Value::Bool(!to_boolean(operand))),
        UnaryOperator::Negate => {
            if operand.is_null() {
                tracing::debug!("Null in negation, returning Null");
                return Ok(Value::Null);
            }
            Ok(Value::Number(-to_number(operand, "unary minus")?))
        }
    }
}
