//! Function registry

use super::{boolean, conversion, list, math, string};
use crate::engine::{Parameter, Signature};
use std::collections::HashMap;
use std::sync::LazyLock;
use verdict_core::Value;

/// Implementation of a built-in function
pub type BuiltinFn = fn(&[Value]) -> Value;

/// A registered built-in function
pub struct BuiltinFunction {
    pub signature: Signature,
    pub implementation: BuiltinFn,
}

impl BuiltinFunction {
    pub fn call(&self, args: &[Value]) -> Value {
        (self.implementation)(args)
    }
}

static REGISTRY: LazyLock<HashMap<&'static str, BuiltinFunction>> = LazyLock::new(|| {
    let mut registry = Registry::default();
    boolean::register(&mut registry);
    math::register(&mut registry);
    string::register(&mut registry);
    list::register(&mut registry);
    conversion::register(&mut registry);
    registry.functions
});

/// Look up a built-in by name
pub fn lookup(name: &str) -> Option<&'static BuiltinFunction> {
    REGISTRY.get(name)
}

pub fn is_builtin(name: &str) -> bool {
    REGISTRY.contains_key(name)
}

/// All built-in names, sorted
pub fn builtin_names() -> Vec<&'static str> {
    let mut names: Vec<_> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Collects registrations from each function family
#[derive(Default)]
pub(super) struct Registry {
    functions: HashMap<&'static str, BuiltinFunction>,
}

impl Registry {
    /// Register a function. A trailing `?` marks a parameter optional.
    pub(super) fn add(&mut self, name: &'static str, parameters: &[&str], implementation: BuiltinFn) {
        self.insert(name, parameters, false, implementation);
    }

    /// Register a function that accepts extra trailing arguments
    pub(super) fn add_variadic(
        &mut self,
        name: &'static str,
        parameters: &[&str],
        implementation: BuiltinFn,
    ) {
        self.insert(name, parameters, true, implementation);
    }

    fn insert(
        &mut self,
        name: &'static str,
        parameters: &[&str],
        variadic: bool,
        implementation: BuiltinFn,
    ) {
        let parameters = parameters
            .iter()
            .map(|param| match param.strip_suffix('?') {
                Some(optional) => Parameter::optional(optional),
                None => Parameter::required(*param),
            })
            .collect();

        let mut signature = Signature::new(name, parameters);
        if variadic {
            signature = signature.variadic();
        }

        self.functions.insert(
            name,
            BuiltinFunction {
                signature,
                implementation,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_functions() {
        for name in ["not", "abs", "substring", "string length", "sum", "date", "number"] {
            assert!(is_builtin(name), "missing built-in {}", name);
        }
        assert!(!is_builtin("PMT"));
    }

    #[test]
    fn test_optional_parameters_are_marked() {
        let substring = lookup("substring").unwrap();
        let optional: Vec<bool> = substring
            .signature
            .parameters
            .iter()
            .map(|p| p.optional)
            .collect();
        assert_eq!(optional, vec![false, false, true]);
        assert_eq!(substring.signature.parameters[1].name, "start position");
    }

    #[test]
    fn test_variadic_functions() {
        assert!(lookup("append").unwrap().signature.variadic);
        assert!(!lookup("count").unwrap().signature.variadic);
    }

    #[test]
    fn test_builtin_names_sorted() {
        let names = builtin_names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
