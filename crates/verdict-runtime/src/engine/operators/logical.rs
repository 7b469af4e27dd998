//! Ternary `and` / `or`

use super::coercion::to_boolean;
use verdict_core::{Operator, Value};

/// Combine two evaluated operands with three-valued logic.
///
/// A null operand yields null unless the other operand alone decides the
/// result (`false` for `and`, `true` for `or`).
pub(crate) fn execute_logical_op(left: &Value, op: &Operator, right: &Value) -> Value {
    let deciding = *op == Operator::Or;

    if left.is_null() || right.is_null() {
        let other = if left.is_null() { right } else { left };
        if other.as_bool() == Some(deciding) {
            return Value::Bool(deciding);
        }
        tracing::debug!("Null in logical {}: {:?}, {:?}, returning Null", op, left, right);
        return Value::Null;
    }

    let (l, r) = (to_boolean(left), to_boolean(right));
    Value::Bool(if deciding { l || r } else { l && r })
}
