//! ISO-8601 temporal parsing
//!
//! Dates, times, date-times and durations appear in decision tables as
//! plain strings. These helpers recognise them so unary tests and the
//! `date()` built-in can compare and normalise them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}(:\d{2})?$").expect("valid time regex"));

static DATETIME_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$").expect("valid date-time regex")
});

static DURATION_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-)?P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("valid duration regex")
});

/// A duration split into its calendar and clock parts.
///
/// Ordering compares months first, then seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    pub months: i64,
    pub seconds: i64,
}

/// Parse `YYYY-MM-DD`
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Parse `hh:mm:ss` or `hh:mm`
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let caps = TIME_SHAPE.captures(text)?;
    let format = if caps.get(1).is_some() { "%H:%M:%S" } else { "%H:%M" };
    NaiveTime::parse_from_str(text, format).ok()
}

/// Parse `YYYY-MM-DDThh:mm:ss`
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if !DATETIME_SHAPE.is_match(text) {
        return None;
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Parse an ISO-8601 duration such as `P1Y2M`, `P3DT4H` or `-PT30M`
pub fn parse_duration(text: &str) -> Option<Duration> {
    let caps = DURATION_SHAPE.captures(text)?;

    // `P` and `PT` alone carry no component
    if (2..=7).all(|i| caps.get(i).is_none()) || text.ends_with('T') {
        return None;
    }

    let part = |i: usize| -> Option<i64> {
        caps.get(i)
            .map_or(Some(0), |m| m.as_str().parse::<i64>().ok())
    };

    let months = part(2)?.checked_mul(12)?.checked_add(part(3)?)?;
    let seconds = part(4)?
        .checked_mul(86_400)?
        .checked_add(part(5)?.checked_mul(3_600)?)?
        .checked_add(part(6)?.checked_mul(60)?)?
        .checked_add(part(7)?)?;

    let sign = if caps.get(1).is_some() { -1 } else { 1 };
    Some(Duration {
        months: sign * months,
        seconds: sign * seconds,
    })
}

/// Compare two strings as the first temporal kind both parse as.
///
/// Kinds are tried in order: date, time, date-time, duration.
pub fn compare_temporal(left: &str, right: &str) -> Option<Ordering> {
    if let (Some(l), Some(r)) = (parse_date(left), parse_date(right)) {
        return Some(l.cmp(&r));
    }
    if let (Some(l), Some(r)) = (parse_time(left), parse_time(right)) {
        return Some(l.cmp(&r));
    }
    if let (Some(l), Some(r)) = (parse_datetime(left), parse_datetime(right)) {
        return Some(l.cmp(&r));
    }
    if let (Some(l), Some(r)) = (parse_duration(left), parse_duration(right)) {
        return Some(l.cmp(&r));
    }
    None
}

/// Temporal equality of a test literal against a candidate.
///
/// Returns `None` when the test is not temporal at all. A temporal test
/// never matches a candidate of another kind.
pub fn temporal_equals(test: &str, candidate: &str) -> Option<bool> {
    if let Some(t) = parse_date(test) {
        return Some(parse_date(candidate) == Some(t));
    }
    if let Some(t) = parse_time(test) {
        return Some(parse_time(candidate) == Some(t));
    }
    if let Some(t) = parse_datetime(test) {
        return Some(parse_datetime(candidate) == Some(t));
    }
    if let Some(t) = parse_duration(test) {
        return Some(parse_duration(candidate) == Some(t));
    }
    None
}
