//! Comparison operator execution

use super::coercion::to_number;
use crate::error::{Result, RuntimeError};
use verdict_core::{Operator, Value};

/// Execute a comparison operation
///
/// Equality never coerces: operands of different types are unequal. Ordering
/// is lexical when both sides are strings and numeric otherwise.
pub(crate) fn execute_compare(left: &Value, op: &Operator, right: &Value) -> Result<bool> {
    match op {
        Operator::Eq => Ok(left.same_type(right) && left == right),
        Operator::Ne => Ok(left != right),
        Operator::Lt | Operator::Gt | Operator::Le | Operator::Ge => {
            if let (Value::String(l), Value::String(r)) = (left, right) {
                return Ok(ordering_holds(op, l.as_str().cmp(r.as_str())));
            }

            let name = comparison_name(op);
            let l = to_number(left, name)?;
            let r = to_number(right, name)?;
            Ok(match op {
                Operator::Lt => l < r,
                Operator::Gt => l > r,
                Operator::Le => l <= r,
                _ => l >= r,
            })
        }
        _ => Err(RuntimeError::TypeError(format!(
            "Operator {} is not a comparison",
            op
        ))),
    }
}

fn ordering_holds(op: &Operator, ordering: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::*;
    match op {
        Operator::Lt => ordering == Less,
        Operator::Gt => ordering == Greater,
        Operator::Le => ordering != Greater,
        _ => ordering != Less,
    }
}

fn comparison_name(op: &Operator) -> &'static str {
    match op {
        Operator::Lt => "less than",
        Operator::Gt => "greater than",
        Operator::Le => "less or equal",
        _ => "greater or equal",
    }
}
