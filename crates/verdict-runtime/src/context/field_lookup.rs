//! Field Lookup Utilities
//!
//! Name resolution against context objects with DMN naming fallbacks.

use crate::error::{Result, RuntimeError};
use std::collections::HashMap;
use verdict_core::Value;

/// Spellings tried for a variable name, in order.
///
/// Exact, spaces as underscores, lowercase, lowercase with underscores, and
/// spaces removed.
pub fn variable_variants(name: &str) -> Vec<String> {
    let underscored = name.replace(' ', "_");
    let lower = name.to_lowercase();
    let lower_underscored = underscored.to_lowercase();
    let no_spaces = name.replace(' ', "");
    dedup(vec![
        name.to_string(),
        underscored,
        lower,
        lower_underscored,
        no_spaces,
    ])
}

/// Spellings tried for a property name, in order.
///
/// Exact, spaces as underscores, camelCase as snake_case, and lowercase.
pub fn property_variants(name: &str) -> Vec<String> {
    let underscored = name.replace(' ', "_");
    let snake = camel_to_snake(name);
    let lower = name.to_lowercase();
    dedup(vec![name.to_string(), underscored, snake, lower])
}

/// Resolve a variable against the context object
pub fn lookup_variable(context: &Value, name: &str) -> Result<Value> {
    let found = context
        .as_object()
        .and_then(|map| first_match(map, variable_variants(name)));

    match found {
        Some(value) => Ok(value.clone()),
        None => Err(RuntimeError::UndefinedVariable(name.to_string())),
    }
}

/// Resolve a property on an evaluated base value.
///
/// A null base yields null; any other non-object base is an error.
pub fn lookup_property(base: &Value, property: &str) -> Result<Value> {
    let map = match base {
        Value::Null => {
            tracing::debug!("Property '{}' accessed on null, returning Null", property);
            return Ok(Value::Null);
        }
        Value::Object(map) => map,
        other => {
            return Err(RuntimeError::NotAnObject {
                property: property.to_string(),
                type_name: other.type_name(),
            })
        }
    };

    first_match(map, property_variants(property))
        .cloned()
        .ok_or_else(|| RuntimeError::PropertyNotFound(property.to_string()))
}

fn first_match(map: &HashMap<String, Value>, variants: Vec<String>) -> Option<&Value> {
    variants.iter().find_map(|key| map.get(key))
}

/// `firstName` becomes `first_name`
fn camel_to_snake(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            snake.push('_');
        }
        snake.extend(c.to_lowercase());
    }
    snake
}

fn dedup(variants: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(variants.len());
    for variant in variants {
        if !unique.contains(&variant) {
            unique.push(variant);
        }
    }
    unique
}
