//! Binary operator execution

use super::coercion::to_number;
use super::comparison::execute_compare;
use super::logical::execute_logical_op;
use crate::error::{Result, RuntimeError};
use verdict_core::{Operator, Value};

/// Execute a binary operation on two evaluated operands
pub(crate) fn execute_binary_op(left: &Value, op: &Operator, right: &Value) -> Result<Value> {
    if op.is_comparison() {
        return execute_compare(left, op, right).map(Value::Bool);
    }
    if op.is_logical() {
        return Ok(execute_logical_op(left, op, right));
    }

    // `+` with a string on either side concatenates, even against null
    if *op == Operator::Add && (matches!(left, Value::String(_)) || matches!(right, Value::String(_)))
    {
        return Ok(Value::String(format!(
            "{}{}",
            left.to_feel_string(),
            right.to_feel_string()
        )));
    }

    if left.is_null() || right.is_null() {
        tracing::debug!(
            "Null in arithmetic: {:?} {} {:?}, returning Null",
            left,
            op,
            right
        );
        return Ok(Value::Null);
    }

    let result = match op {
        Operator::Add => to_number(left, "addition")? + to_number(right, "addition")?,
        Operator::Sub => to_number(left, "subtraction")? - to_number(right, "subtraction")?,
        Operator::Mul => {
            to_number(left, "multiplication")? * to_number(right, "multiplication")?
        }
        Operator::Div => {
            let divisor = to_number(right, "division")?;
            if divisor == 0.0 {
                tracing::debug!("Division by zero, returning Null");
                return Ok(Value::Null);
            }
            to_number(left, "division")? / divisor
        }
        Operator::Pow => {
            to_number(left, "exponentiation")?.powf(to_number(right, "exponentiation")?)
        }
        _ => {
            return Err(RuntimeError::TypeError(format!(
                "Operator {} is not arithmetic",
                op
            )))
        }
    };

    Ok(Value::Number(result))
}
