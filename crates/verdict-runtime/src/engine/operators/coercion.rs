//! Operand coercions shared by the operator modules

use crate::error::{Result, RuntimeError};
use verdict_core::Value;

/// Coerce an operand to a number.
///
/// Null reads as 0 and booleans as 1/0; strings must parse in full.
pub(crate) fn to_number(value: &Value, operation: &str) -> Result<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Null => Ok(0.0),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            RuntimeError::TypeError(format!(
                "Cannot convert string '{}' to number for {}",
                s, operation
            ))
        }),
        Value::List(_) | Value::Object(_) => Err(RuntimeError::TypeError(format!(
            "Cannot convert {} to number for {}",
            value.type_name(),
            operation
        ))),
    }
}

/// Truthiness used by `not` and by `and`/`or` once both operands are non-null
pub(crate) fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0,
        Value::String(s) => !s.is_empty() && s != "false" && s != "0",
        Value::Null => false,
        Value::List(_) | Value::Object(_) => true,
    }
}
