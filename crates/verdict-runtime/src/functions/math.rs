//! Numeric functions and rounding modes

use super::registry::Registry;
use super::{integer_arg, number_arg};
use verdict_core::Value;

pub(super) fn register(registry: &mut Registry) {
    registry.add("abs", &["n"], abs);
    registry.add("floor", &["n"], floor);
    registry.add("ceiling", &["n"], ceiling);
    registry.add("sqrt", &["number"], sqrt);
    registry.add("exp", &["number"], exp);
    registry.add("log", &["number"], log);
    registry.add("odd", &["number"], odd);
    registry.add("even", &["number"], even);
    registry.add("modulo", &["dividend", "divisor"], modulo);
    registry.add("decimal", &["n", "scale"], round_half_even);
    registry.add("round", &["n", "scale"], round_half_even);
    registry.add("round up", &["n", "scale"], round_up);
    registry.add("round down", &["n", "scale"], round_down);
    registry.add("round half up", &["n", "scale"], round_half_up);
    registry.add("round half down", &["n", "scale"], round_half_down);
}

fn unary(args: &[Value], f: impl FnOnce(f64) -> Option<f64>) -> Value {
    number_arg(args, 0)
        .and_then(f)
        .map_or(Value::Null, Value::Number)
}

fn abs(args: &[Value]) -> Value {
    unary(args, |n| Some(n.abs()))
}

fn floor(args: &[Value]) -> Value {
    unary(args, |n| Some(n.floor()))
}

fn ceiling(args: &[Value]) -> Value {
    unary(args, |n| Some(n.ceil()))
}

fn sqrt(args: &[Value]) -> Value {
    unary(args, |n| (n >= 0.0).then(|| n.sqrt()))
}

fn exp(args: &[Value]) -> Value {
    unary(args, |n| Some(n.exp()))
}

fn log(args: &[Value]) -> Value {
    unary(args, |n| (n > 0.0).then(|| n.ln()))
}

fn parity(args: &[Value], want_odd: bool) -> Value {
    match number_arg(args, 0) {
        Some(n) if n.is_finite() && n.fract() == 0.0 => Value::Bool((n % 2.0 != 0.0) == want_odd),
        _ => Value::Null,
    }
}

fn odd(args: &[Value]) -> Value {
    parity(args, true)
}

fn even(args: &[Value]) -> Value {
    parity(args, false)
}

/// `dividend - divisor * floor(dividend / divisor)`; the sign follows the divisor
fn modulo(args: &[Value]) -> Value {
    match (number_arg(args, 0), number_arg(args, 1)) {
        (Some(_), Some(divisor)) if divisor == 0.0 => Value::Null,
        (Some(dividend), Some(divisor)) => {
            Value::Number(dividend - divisor * (dividend / divisor).floor())
        }
        _ => Value::Null,
    }
}

/// Scale `n` by `10^scale`, round with `mode`, and scale back
fn round_with(args: &[Value], mode: fn(f64) -> f64) -> Value {
    let (Some(n), Some(scale)) = (number_arg(args, 0), integer_arg(args, 1)) else {
        return Value::Null;
    };
    let Ok(scale) = i32::try_from(scale) else {
        return Value::Null;
    };

    let multiplier = 10f64.powi(scale);
    Value::Number(mode(n * multiplier) / multiplier)
}

fn round_half_even(args: &[Value]) -> Value {
    round_with(args, f64::round_ties_even)
}

fn round_up(args: &[Value]) -> Value {
    round_with(args, |x| if x >= 0.0 { x.ceil() } else { x.floor() })
}

fn round_down(args: &[Value]) -> Value {
    round_with(args, f64::trunc)
}

fn round_half_up(args: &[Value]) -> Value {
    round_with(args, f64::round)
}

fn round_half_down(args: &[Value]) -> Value {
    round_with(args, |x| {
        if x >= 0.0 {
            (x - 0.5).ceil()
        } else {
            (x + 0.5).floor()
        }
    })
}
