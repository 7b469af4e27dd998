//! Boolean functions: `not`, `all`, `any`, `is`

use super::registry::Registry;
use super::{arg, list_arg};
use verdict_core::Value;

pub(super) fn register(registry: &mut Registry) {
    registry.add("not", &["negand"], not);
    registry.add("all", &["list"], all);
    registry.add("any", &["list"], any);
    registry.add("is", &["value1", "value2"], is);
}

/// Booleans, plus the strings "true" and "false"
fn as_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

fn not(args: &[Value]) -> Value {
    match as_boolean(arg(args, 0)) {
        Some(b) => Value::Bool(!b),
        None => Value::Null,
    }
}

/// Shared body of `all` and `any`: `decisive` short-circuits the scan.
/// Null elements are skipped.
fn scan(args: &[Value], decisive: bool) -> Value {
    let Some(items) = list_arg(args, 0) else {
        return Value::Null;
    };

    let mut result = !decisive;
    for item in items.iter().filter(|item| !item.is_null()) {
        match as_boolean(item) {
            Some(b) if b == decisive => result = decisive,
            Some(_) => {}
            None => return Value::Null,
        }
    }
    Value::Bool(result)
}

fn all(args: &[Value]) -> Value {
    scan(args, false)
}

fn any(args: &[Value]) -> Value {
    scan(args, true)
}

fn is(args: &[Value]) -> Value {
    let (left, right) = (arg(args, 0), arg(args, 1));
    Value::Bool(left.same_type(right) && left == right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: Vec<Value>) -> Vec<Value> {
        vec![Value::List(items)]
    }

    #[test]
    fn test_not() {
        assert_eq!(not(&[Value::Bool(true)]), Value::Bool(false));
        assert_eq!(not(&[Value::from("false")]), Value::Bool(true));
        assert_eq!(not(&[Value::Null]), Value::Null);
        assert_eq!(not(&[Value::Number(1.0)]), Value::Null);
    }

    #[test]
    fn test_all() {
        assert_eq!(all(&list(vec![])), Value::Bool(true));
        assert_eq!(all(&list(vec![Value::Bool(true), Value::Null])), Value::Bool(true));
        assert_eq!(all(&list(vec![Value::Bool(true), Value::Bool(false)])), Value::Bool(false));
        assert_eq!(all(&list(vec![Value::Number(1.0)])), Value::Null);
        assert_eq!(all(&[Value::Null]), Value::Null);
    }

    #[test]
    fn test_any() {
        assert_eq!(any(&list(vec![])), Value::Bool(false));
        assert_eq!(any(&list(vec![Value::Bool(false), Value::from("true")])), Value::Bool(true));
        assert_eq!(any(&list(vec![Value::Bool(false)])), Value::Bool(false));
    }

    #[test]
    fn test_is() {
        assert_eq!(is(&[Value::Number(1.0), Value::Number(1.0)]), Value::Bool(true));
        assert_eq!(is(&[Value::Number(1.0), Value::from("1")]), Value::Bool(false));
    }
}
