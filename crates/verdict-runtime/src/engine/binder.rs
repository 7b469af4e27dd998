//! Parameter binding
//!
//! Maps a call's evaluated arguments onto a declared signature and produces
//! the positional argument list the implementation expects.

use crate::error::{Result, RuntimeError};
use verdict_core::Value;

/// A declared formal parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub optional: bool,
}

impl Parameter {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: true,
        }
    }
}

/// Declared signature of a callable
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Extra arguments beyond the declared parameters are accepted
    pub variadic: bool,
}

impl Signature {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
            variadic: false,
        }
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// Evaluated call-site arguments. A call never mixes the two styles.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArguments {
    Positional(Vec<Value>),
    Named(Vec<(String, Value)>),
}

impl CallArguments {
    pub fn len(&self) -> usize {
        match self {
            CallArguments::Positional(values) => values.len(),
            CallArguments::Named(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bind arguments against a signature.
///
/// Without a signature every argument is passed through in call order.
/// Failures are reported as [`RuntimeError::BindingFailed`]; the evaluator
/// turns them into a null result.
pub fn bind_arguments(
    function: &str,
    signature: Option<&Signature>,
    arguments: CallArguments,
) -> Result<Vec<Value>> {
    let Some(signature) = signature else {
        return Ok(match arguments {
            CallArguments::Positional(values) => values,
            CallArguments::Named(pairs) => pairs.into_iter().map(|(_, value)| value).collect(),
        });
    };

    match arguments {
        CallArguments::Positional(values) => bind_positional(function, signature, values),
        CallArguments::Named(pairs) => bind_named(function, signature, pairs),
    }
}

fn bind_positional(function: &str, signature: &Signature, values: Vec<Value>) -> Result<Vec<Value>> {
    let formal = &signature.parameters;

    if !signature.variadic && values.len() > formal.len() {
        return Err(binding_failed(
            function,
            format!(
                "expects {} parameter(s), but {} were provided",
                formal.len(),
                values.len()
            ),
        ));
    }

    let mut provided = values.into_iter();
    let mut args = Vec::with_capacity(formal.len());

    for param in formal {
        match provided.next() {
            Some(value) => args.push(value),
            None if param.optional => args.push(Value::Null),
            None => {
                return Err(binding_failed(
                    function,
                    format!("required parameter '{}' not provided", param.name),
                ))
            }
        }
    }

    // only a variadic signature can have anything left
    args.extend(provided);
    Ok(args)
}

fn bind_named(
    function: &str,
    signature: &Signature,
    pairs: Vec<(String, Value)>,
) -> Result<Vec<Value>> {
    let formal = &signature.parameters;
    let mut args = vec![Value::Null; formal.len()];
    let mut provided = vec![false; formal.len()];

    for (name, value) in pairs {
        match formal.iter().position(|param| param.name == name) {
            Some(index) => {
                args[index] = value;
                provided[index] = true;
            }
            None if signature.variadic => args.push(value),
            None => {
                return Err(binding_failed(
                    function,
                    format!("unknown parameter '{}'", name),
                ))
            }
        }
    }

    if let Some(missing) = formal
        .iter()
        .zip(&provided)
        .find(|(param, was_provided)| !param.optional && !**was_provided)
    {
        return Err(binding_failed(
            function,
            format!("required parameter '{}' not provided", missing.0.name),
        ));
    }

    Ok(args)
}

fn binding_failed(function: &str, message: String) -> RuntimeError {
    RuntimeError::BindingFailed {
        function: function.to_string(),
        message,
    }
}
