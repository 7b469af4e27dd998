//! Built-in FEEL functions
//!
//! A static name → (signature, implementation) registry. Implementations
//! receive arguments already bound to their declared parameter order and
//! return null for null or mistyped arguments.

mod boolean;
mod conversion;
mod list;
mod math;
mod registry;
mod string;

pub use registry::{builtin_names, is_builtin, lookup, BuiltinFn, BuiltinFunction};

use verdict_core::Value;

static NULL: Value = Value::Null;

/// Argument at `index`, or null when the call supplied fewer
pub(crate) fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&NULL)
}

pub(crate) fn number_arg(args: &[Value], index: usize) -> Option<f64> {
    arg(args, index).as_f64()
}

pub(crate) fn string_arg(args: &[Value], index: usize) -> Option<&str> {
    arg(args, index).as_str()
}

pub(crate) fn list_arg(args: &[Value], index: usize) -> Option<&[Value]> {
    arg(args, index).as_list()
}

/// Integral value of a numeric argument
pub(crate) fn integer_arg(args: &[Value], index: usize) -> Option<i64> {
    number_arg(args, index)
        .filter(|n| n.is_finite())
        .map(|n| n.trunc() as i64)
}
