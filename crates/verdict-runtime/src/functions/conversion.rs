//! Conversion functions: `date`, `number`

use super::registry::Registry;
use super::{arg, integer_arg, string_arg};
use crate::temporal;
use chrono::NaiveDate;
use verdict_core::Value;

pub(super) fn register(registry: &mut Registry) {
    registry.add("date", &["from", "month?", "day?"], date);
    registry.add(
        "number",
        &["from", "grouping separator?", "decimal separator?"],
        number,
    );
}

/// `date("2017-01-01")`, `date("2017-01-01T10:00:00")` or `date(2017, 1, 1)`.
///
/// Dates are represented as ISO `YYYY-MM-DD` strings.
fn date(args: &[Value]) -> Value {
    let parsed = match (arg(args, 0), arg(args, 1), arg(args, 2)) {
        (Value::String(text), Value::Null, Value::Null) => temporal::parse_date(text)
            .or_else(|| temporal::parse_datetime(text).map(|dt| dt.date())),
        (Value::Number(_), Value::Number(_), Value::Number(_)) => {
            match (integer_arg(args, 0), integer_arg(args, 1), integer_arg(args, 2)) {
                (Some(year), Some(month), Some(day)) => from_parts(year, month, day),
                _ => None,
            }
        }
        _ => None,
    };

    parsed.map_or(Value::Null, |d| {
        Value::String(d.format("%Y-%m-%d").to_string())
    })
}

fn from_parts(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    if !(1..=9999).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

/// Parse a number from text, honouring optional separators.
///
/// The grouping separator may be a space, comma or period; the decimal
/// separator a comma or period, and the two must differ.
fn number(args: &[Value]) -> Value {
    let Some(text) = string_arg(args, 0) else {
        return Value::Null;
    };

    let grouping = match arg(args, 1) {
        Value::Null => None,
        Value::String(s) if matches!(s.as_str(), " " | "," | ".") => Some(s.as_str()),
        _ => return Value::Null,
    };
    let decimal = match arg(args, 2) {
        Value::Null => None,
        Value::String(s) if matches!(s.as_str(), "," | ".") => Some(s.as_str()),
        _ => return Value::Null,
    };
    if grouping.is_some() && grouping == decimal {
        return Value::Null;
    }

    let mut normalized = text.trim().to_string();
    if let Some(sep) = grouping {
        normalized = normalized.replace(sep, "");
    }
    if let Some(sep) = decimal {
        normalized = normalized.replace(sep, ".");
    }

    normalized
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map_or(Value::Null, Value::Number)
}
