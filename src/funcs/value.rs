//! Dynamic values passed to and returned from helpers.

use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::utils::FormatError;

/// A helper argument or result.
///
/// Strings coerce to integers and lists on demand, so helpers can be driven
/// from plain text (e.g. command-line arguments).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    Ints(Vec<i64>),
    Strs(Vec<String>),
    Time(DateTime<Local>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
            Value::Ints(values) => {
                let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(" "))
            }
            Value::Strs(values) => write!(f, "[{}]", values.join(" ")),
            Value::Time(time) => f.write_str(&time.to_rfc3339()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<Vec<i64>> for Value {
    fn from(values: Vec<i64>) -> Self {
        Value::Ints(values)
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Value::Strs(values)
    }
}

impl From<DateTime<Local>> for Value {
    fn from(time: DateTime<Local>) -> Self {
        Value::Time(time)
    }
}

/// Errors raised when calling a helper
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("unknown helper '{0}'")]
    Unknown(String),

    #[error("expected {expected} arguments, got {got}")]
    Arity { expected: String, got: usize },

    #[error("argument {index}: expected {expected}, got '{found}'")]
    Type {
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("argument {index}: {value} does not fit in {target}")]
    Range {
        index: usize,
        value: i64,
        target: &'static str,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// Positional access to helper arguments with coercion
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    values: &'a [Value],
}

impl<'a> Args<'a> {
    /// Require exactly `n` arguments
    pub fn exact(values: &'a [Value], n: usize) -> Result<Self, CallError> {
        if values.len() != n {
            return Err(CallError::Arity {
                expected: n.to_string(),
                got: values.len(),
            });
        }
        Ok(Args { values })
    }

    /// Require at least `n` arguments
    pub fn at_least(values: &'a [Value], n: usize) -> Result<Self, CallError> {
        if values.len() < n {
            return Err(CallError::Arity {
                expected: format!("at least {}", n),
                got: values.len(),
            });
        }
        Ok(Args { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn type_error(&self, index: usize, expected: &'static str) -> CallError {
        CallError::Type {
            index,
            expected,
            found: self.values[index].to_string(),
        }
    }

    pub fn int(&self, index: usize) -> Result<i64, CallError> {
        match &self.values[index] {
            Value::Int(n) => Ok(*n),
            Value::Str(s) => s.trim().parse().map_err(|_| self.type_error(index, "integer")),
            _ => Err(self.type_error(index, "integer")),
        }
    }

    /// An integer that must fit in `T`
    pub fn narrow<T: TryFrom<i64>>(&self, index: usize) -> Result<T, CallError> {
        let value = self.int(index)?;
        T::try_from(value).map_err(|_| CallError::Range {
            index,
            value,
            target: std::any::type_name::<T>(),
        })
    }

    pub fn string(&self, index: usize) -> Result<String, CallError> {
        match &self.values[index] {
            Value::Str(s) => Ok(s.clone()),
            Value::Int(n) => Ok(n.to_string()),
            _ => Err(self.type_error(index, "string")),
        }
    }

    /// A list of integers; text is read as comma separated decimals
    pub fn ints(&self, index: usize) -> Result<Vec<i64>, CallError> {
        match &self.values[index] {
            Value::Ints(values) => Ok(values.clone()),
            Value::Int(n) => Ok(vec![*n]),
            Value::Str(s) if s.trim().is_empty() => Ok(Vec::new()),
            Value::Str(s) => s
                .split(',')
                .map(|part| part.trim().parse())
                .collect::<Result<_, _>>()
                .map_err(|_| self.type_error(index, "integer list")),
            _ => Err(self.type_error(index, "integer list")),
        }
    }

    /// A list of strings; text is read as comma separated items
    pub fn strs(&self, index: usize) -> Result<Vec<String>, CallError> {
        match &self.values[index] {
            Value::Strs(values) => Ok(values.clone()),
            Value::Str(s) if s.is_empty() => Ok(Vec::new()),
            Value::Str(s) => Ok(s.split(',').map(String::from).collect()),
            _ => Err(self.type_error(index, "string list")),
        }
    }

    /// Every argument from `index` on, as strings
    pub fn rest_strings(&self, index: usize) -> Result<Vec<String>, CallError> {
        (index..self.values.len()).map(|i| self.string(i)).collect()
    }

    /// Every argument from `index` on, as integers
    pub fn rest_ints(&self, index: usize) -> Result<Vec<i64>, CallError> {
        (index..self.values.len()).map(|i| self.int(i)).collect()
    }
}
