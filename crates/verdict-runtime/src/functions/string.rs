//! String functions
//!
//! Positions are 1-based and count characters, not bytes. `matches` and
//! `replace` take XPath-style regex flags (`i`, `s`, `m`, `x`).

use super::registry::Registry;
use super::{arg, integer_arg, list_arg, string_arg};
use regex::{Regex, RegexBuilder};
use verdict_core::Value;

pub(super) fn register(registry: &mut Registry) {
    registry.add("substring", &["string", "start position", "length?"], substring);
    registry.add("string length", &["string"], string_length);
    registry.add("upper case", &["string"], upper_case);
    registry.add("lower case", &["string"], lower_case);
    registry.add("substring before", &["string", "match"], substring_before);
    registry.add("substring after", &["string", "match"], substring_after);
    registry.add("contains", &["string", "match"], contains);
    registry.add("starts with", &["string", "match"], starts_with);
    registry.add("ends with", &["string", "match"], ends_with);
    registry.add("replace", &["input", "pattern", "replacement", "flags?"], replace);
    registry.add("matches", &["input", "pattern", "flags?"], matches);
    registry.add("split", &["string", "delimiter"], split);
    registry.add("string join", &["list", "delimiter?"], string_join);
    registry.add("string", &["from"], string);
}

fn substring(args: &[Value]) -> Value {
    let (Some(text), Some(start)) = (string_arg(args, 0), integer_arg(args, 1)) else {
        return Value::Null;
    };
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len() as i64;

    // negative positions count back from the end
    let begin = if start > 0 { start - 1 } else { len + start };
    if begin < 0 || begin >= len {
        return Value::from("");
    }

    let end = match arg(args, 2) {
        Value::Null => len,
        Value::Number(_) => match integer_arg(args, 2) {
            Some(count) if count < 0 => return Value::from(""),
            Some(count) => begin.saturating_add(count).min(len),
            None => return Value::Null,
        },
        _ => return Value::Null,
    };

    Value::String(chars[begin as usize..end as usize].iter().collect())
}

fn string_length(args: &[Value]) -> Value {
    string_arg(args, 0).map_or(Value::Null, |s| Value::Number(s.chars().count() as f64))
}

fn upper_case(args: &[Value]) -> Value {
    string_arg(args, 0).map_or(Value::Null, |s| Value::String(s.to_uppercase()))
}

fn lower_case(args: &[Value]) -> Value {
    string_arg(args, 0).map_or(Value::Null, |s| Value::String(s.to_lowercase()))
}

/// Apply `f` to the `(string, match)` pair when both are strings
fn with_match(args: &[Value], f: impl FnOnce(&str, &str) -> Value) -> Value {
    match (string_arg(args, 0), string_arg(args, 1)) {
        (Some(text), Some(needle)) => f(text, needle),
        _ => Value::Null,
    }
}

fn substring_before(args: &[Value]) -> Value {
    with_match(args, |text, needle| {
        Value::from(text.find(needle).map_or("", |pos| &text[..pos]))
    })
}

fn substring_after(args: &[Value]) -> Value {
    with_match(args, |text, needle| {
        Value::from(
            text.find(needle)
                .map_or("", |pos| &text[pos + needle.len()..]),
        )
    })
}

fn contains(args: &[Value]) -> Value {
    with_match(args, |text, needle| Value::Bool(text.contains(needle)))
}

fn starts_with(args: &[Value]) -> Value {
    with_match(args, |text, needle| Value::Bool(text.starts_with(needle)))
}

fn ends_with(args: &[Value]) -> Value {
    with_match(args, |text, needle| Value::Bool(text.ends_with(needle)))
}

/// Compile a pattern with optional flags; unknown flags reject the pattern
fn build_regex(pattern: &str, flags: &Value) -> Option<Regex> {
    let flags = match flags {
        Value::Null => "",
        Value::String(s) => s.as_str(),
        _ => return None,
    };

    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            's' => builder.dot_matches_new_line(true),
            'm' => builder.multi_line(true),
            'x' => builder.ignore_whitespace(true),
            _ => return None,
        };
    }

    match builder.build() {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::debug!("Invalid regex pattern '{}': {}", pattern, err);
            None
        }
    }
}

fn replace(args: &[Value]) -> Value {
    let (Some(input), Some(pattern), Some(replacement)) =
        (string_arg(args, 0), string_arg(args, 1), string_arg(args, 2))
    else {
        return Value::Null;
    };

    build_regex(pattern, arg(args, 3)).map_or(Value::Null, |regex| {
        Value::String(regex.replace_all(input, replacement).into_owned())
    })
}

fn matches(args: &[Value]) -> Value {
    let (Some(input), Some(pattern)) = (string_arg(args, 0), string_arg(args, 1)) else {
        return Value::Null;
    };

    build_regex(pattern, arg(args, 2)).map_or(Value::Null, |regex| {
        Value::Bool(regex.is_match(input))
    })
}

/// Split on a literal delimiter; an empty delimiter splits into characters
fn split(args: &[Value]) -> Value {
    with_match(args, |text, delimiter| {
        let parts: Vec<Value> = if delimiter.is_empty() {
            text.chars().map(|c| Value::String(c.to_string())).collect()
        } else {
            text.split(delimiter).map(Value::from).collect()
        };
        Value::List(parts)
    })
}

/// Join list elements; null elements are skipped
fn string_join(args: &[Value]) -> Value {
    let Some(items) = list_arg(args, 0) else {
        return Value::Null;
    };
    let delimiter = match arg(args, 1) {
        Value::Null => "",
        Value::String(s) => s.as_str(),
        _ => return Value::Null,
    };

    let parts: Vec<String> = items
        .iter()
        .filter(|item| !item.is_null())
        .map(Value::to_feel_string)
        .collect();
    Value::String(parts.join(delimiter))
}

fn string(args: &[Value]) -> Value {
    match arg(args, 0) {
        Value::Null => Value::Null,
        value => Value::String(value.to_feel_string()),
    }
}
