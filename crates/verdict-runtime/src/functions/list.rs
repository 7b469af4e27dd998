//! List functions
//!
//! The aggregates (`min`, `max`, `sum`, `mean`, `product`, `median`) take
//! either a single list or their items as separate arguments.

use super::registry::Registry;
use super::{arg, integer_arg, list_arg};
use std::cmp::Ordering;
use verdict_core::Value;

pub(super) fn register(registry: &mut Registry) {
    registry.add("list contains", &["list", "element"], list_contains);
    registry.add("count", &["list"], count);
    registry.add_variadic("min", &["list"], min);
    registry.add_variadic("max", &["list"], max);
    registry.add_variadic("sum", &["list"], sum);
    registry.add_variadic("mean", &["list"], mean);
    registry.add_variadic("product", &["list"], product);
    registry.add_variadic("median", &["list"], median);
    registry.add("sublist", &["list", "start position", "length?"], sublist);
    registry.add_variadic("append", &["list"], append);
    registry.add_variadic("concatenate", &["list"], concatenate);
    registry.add("reverse", &["list"], reverse);
    registry.add("index of", &["list", "match"], index_of);
    registry.add("distinct values", &["list"], distinct_values);
    registry.add("flatten", &["list"], flatten);
}

/// Items of an aggregate call: `f([1, 2])` and `f(1, 2)` are the same
fn aggregate_items(args: &[Value]) -> Option<&[Value]> {
    match args {
        [Value::List(items)] => Some(items.as_slice()),
        [single] if single.is_null() => None,
        [] => None,
        many => Some(many),
    }
}

/// All items as numbers, or `None` if any item is not a number
fn numbers(args: &[Value]) -> Option<Vec<f64>> {
    aggregate_items(args)?.iter().map(Value::as_f64).collect()
}

fn list_contains(args: &[Value]) -> Value {
    match list_arg(args, 0) {
        Some(items) => Value::Bool(items.contains(arg(args, 1))),
        None => Value::Null,
    }
}

fn count(args: &[Value]) -> Value {
    list_arg(args, 0).map_or(Value::Null, |items| Value::Number(items.len() as f64))
}

/// Order numbers numerically and strings lexically; mixed lists have no order
fn extremum(args: &[Value], wanted: Ordering) -> Value {
    let Some(items) = aggregate_items(args) else {
        return Value::Null;
    };
    let Some(first) = items.first() else {
        return Value::Null;
    };

    let mut best = first;
    for item in &items[1..] {
        let ordering = match (item, best) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        };
        match ordering {
            Some(o) if o == wanted => best = item,
            Some(_) => {}
            None => return Value::Null,
        }
    }

    match best {
        Value::Number(_) | Value::String(_) => best.clone(),
        _ => Value::Null,
    }
}

fn min(args: &[Value]) -> Value {
    extremum(args, Ordering::Less)
}

fn max(args: &[Value]) -> Value {
    extremum(args, Ordering::Greater)
}

fn sum(args: &[Value]) -> Value {
    match numbers(args) {
        Some(values) if !values.is_empty() => Value::Number(values.iter().sum()),
        _ => Value::Null,
    }
}

fn mean(args: &[Value]) -> Value {
    match numbers(args) {
        Some(values) if !values.is_empty() => {
            Value::Number(values.iter().sum::<f64>() / values.len() as f64)
        }
        _ => Value::Null,
    }
}

fn product(args: &[Value]) -> Value {
    match numbers(args) {
        Some(values) if !values.is_empty() => Value::Number(values.iter().product()),
        _ => Value::Null,
    }
}

fn median(args: &[Value]) -> Value {
    let Some(mut values) = numbers(args).filter(|v| !v.is_empty()) else {
        return Value::Null;
    };
    values.sort_by(f64::total_cmp);

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Value::Number((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Value::Number(values[mid])
    }
}

/// 1-based; a negative start counts from the end. Out of range is null.
fn sublist(args: &[Value]) -> Value {
    let (Some(items), Some(start)) = (list_arg(args, 0), integer_arg(args, 1)) else {
        return Value::Null;
    };
    let len = items.len() as i64;
    let begin = if start > 0 { start - 1 } else { len + start };
    if start == 0 || begin < 0 || begin >= len {
        return Value::Null;
    }

    let end = match arg(args, 2) {
        Value::Null => len,
        _ => match integer_arg(args, 2) {
            Some(count) if count >= 0 => {
                match begin.checked_add(count).filter(|end| *end <= len) {
                    Some(end) => end,
                    None => return Value::Null,
                }
            }
            _ => return Value::Null,
        },
    };

    Value::List(items[begin as usize..end as usize].to_vec())
}

fn append(args: &[Value]) -> Value {
    let Some(items) = list_arg(args, 0) else {
        return Value::Null;
    };
    let mut result = items.to_vec();
    result.extend_from_slice(&args[1..]);
    Value::List(result)
}

fn concatenate(args: &[Value]) -> Value {
    let mut result = Vec::new();
    for value in args {
        match value {
            Value::List(items) => result.extend_from_slice(items),
            _ => return Value::Null,
        }
    }
    Value::List(result)
}

fn reverse(args: &[Value]) -> Value {
    list_arg(args, 0).map_or(Value::Null, |items| {
        Value::List(items.iter().rev().cloned().collect())
    })
}

fn index_of(args: &[Value]) -> Value {
    let Some(items) = list_arg(args, 0) else {
        return Value::Null;
    };
    let needle = arg(args, 1);
    Value::List(
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| *item == needle)
            .map(|(i, _)| Value::Number((i + 1) as f64))
            .collect(),
    )
}

fn distinct_values(args: &[Value]) -> Value {
    let Some(items) = list_arg(args, 0) else {
        return Value::Null;
    };
    let mut result: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !result.contains(item) {
            result.push(item.clone());
        }
    }
    Value::List(result)
}

fn flatten(args: &[Value]) -> Value {
    fn walk(items: &[Value], out: &mut Vec<Value>) {
        for item in items {
            match item {
                Value::List(nested) => walk(nested, out),
                other => out.push(other.clone()),
            }
        }
    }

    let Some(items) = list_arg(args, 0) else {
        return Value::Null;
    };
    let mut result = Vec::new();
    walk(items, &mut result);
    Value::List(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Value {
        Value::Number(v)
    }

    fn nums(values: &[f64]) -> Value {
        Value::List(values.iter().copied().map(Value::Number).collect())
    }

    #[test]
    fn test_aggregates() {
        assert_eq!(sum(&[nums(&[1.0, 2.0, 3.0])]), n(6.0));
        assert_eq!(sum(&[n(1.0), n(2.0)]), n(3.0));
        assert_eq!(sum(&[nums(&[])]), Value::Null);
        assert_eq!(mean(&[nums(&[1.0, 2.0, 3.0])]), n(2.0));
        assert_eq!(product(&[nums(&[2.0, 3.0, 4.0])]), n(24.0));
        assert_eq!(median(&[nums(&[8.0, 2.0, 5.0, 3.0, 4.0])]), n(4.0));
        assert_eq!(median(&[nums(&[6.0, 1.0, 2.0, 3.0])]), n(2.5));
        assert_eq!(sum(&[Value::List(vec![n(1.0), Value::from("x")])]), Value::Null);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min(&[nums(&[3.0, 1.0, 2.0])]), n(1.0));
        assert_eq!(max(&[n(3.0), n(1.0), n(2.0)]), n(3.0));
        assert_eq!(
            max(&[Value::List(vec![Value::from("a"), Value::from("c")])]),
            Value::from("c")
        );
        assert_eq!(min(&[nums(&[])]), Value::Null);
        assert_eq!(min(&[Value::List(vec![n(1.0), Value::from("a")])]), Value::Null);
    }

    #[test]
    fn test_count_and_contains() {
        assert_eq!(count(&[nums(&[1.0, 2.0])]), n(2.0));
        assert_eq!(list_contains(&[nums(&[1.0, 2.0]), n(2.0)]), Value::Bool(true));
        assert_eq!(list_contains(&[nums(&[1.0, 2.0]), n(5.0)]), Value::Bool(false));
        assert_eq!(count(&[Value::Null]), Value::Null);
    }

    #[test]
    fn test_sublist() {
        let list = nums(&[4.0, 5.0, 6.0]);
        assert_eq!(sublist(&[list.clone(), n(2.0), Value::Null]), nums(&[5.0, 6.0]));
        assert_eq!(sublist(&[list.clone(), n(1.0), n(2.0)]), nums(&[4.0, 5.0]));
        assert_eq!(sublist(&[list.clone(), n(-1.0), Value::Null]), nums(&[6.0]));
        assert_eq!(sublist(&[list.clone(), n(4.0), Value::Null]), Value::Null);
        assert_eq!(sublist(&[list, n(2.0), n(5.0)]), Value::Null);
    }

    #[test]
    fn test_list_construction() {
        assert_eq!(append(&[nums(&[1.0]), n(2.0), n(3.0)]), nums(&[1.0, 2.0, 3.0]));
        assert_eq!(
            concatenate(&[nums(&[1.0]), nums(&[2.0, 3.0])]),
            nums(&[1.0, 2.0, 3.0])
        );
        assert_eq!(concatenate(&[nums(&[1.0]), n(2.0)]), Value::Null);
        assert_eq!(reverse(&[nums(&[1.0, 2.0])]), nums(&[2.0, 1.0]));
    }

    #[test]
    fn test_index_distinct_flatten() {
        assert_eq!(index_of(&[nums(&[1.0, 2.0, 1.0]), n(1.0)]), nums(&[1.0, 3.0]));
        assert_eq!(distinct_values(&[nums(&[1.0, 2.0, 1.0])]), nums(&[1.0, 2.0]));
        let nested = Value::List(vec![n(1.0), Value::List(vec![n(2.0), nums(&[3.0])])]);
        assert_eq!(flatten(&[nested]), nums(&[1.0, 2.0, 3.0]));
    }
}
