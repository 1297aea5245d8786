use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{JsonKind, Violation};

/// Appends a field segment to a `$`-rooted path for mismatch reporting.
pub(crate) fn field_path(parent: &str, field: &str) -> String {
    format!("{parent}.{field}")
}

/// A validator/encoder pair for one payload type.
///
/// `decode` tests arbitrary JSON against the declared shape and reports every
/// path-qualified mismatch it finds; `encode` converts a validated value back
/// to its plain-data representation and is total over valid values.
pub trait PayloadSchema {
    type Value;

    fn decode(&self, input: &serde_json::Value, path: &str) -> Result<Self::Value, Vec<Violation>>;

    fn encode(&self, value: &Self::Value) -> serde_json::Value;
}

fn wrong_type(path: &str, expected: &'static str, input: &serde_json::Value) -> Vec<Violation> {
    vec![Violation::WrongType {
        path: path.to_string(),
        expected,
        found: JsonKind::of(input),
    }]
}

/// Accepts exactly a JSON string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSchema;

impl PayloadSchema for StringSchema {
    type Value = String;

    fn decode(&self, input: &serde_json::Value, path: &str) -> Result<String, Vec<Violation>> {
        match input.as_str() {
            Some(s) => Ok(s.to_string()),
            None => Err(wrong_type(path, "a string", input)),
        }
    }

    fn encode(&self, value: &String) -> serde_json::Value {
        serde_json::Value::String(value.clone())
    }
}

/// Accepts exactly a JSON number, integral or floating.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberSchema;

impl PayloadSchema for NumberSchema {
    type Value = serde_json::Number;

    fn decode(
        &self,
        input: &serde_json::Value,
        path: &str,
    ) -> Result<serde_json::Number, Vec<Violation>> {
        match input {
            serde_json::Value::Number(n) => Ok(n.clone()),
            other => Err(wrong_type(path, "a number", other)),
        }
    }

    fn encode(&self, value: &serde_json::Number) -> serde_json::Value {
        serde_json::Value::Number(value.clone())
    }
}

/// Accepts exactly a JSON boolean.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolSchema;

impl PayloadSchema for BoolSchema {
    type Value = bool;

    fn decode(&self, input: &serde_json::Value, path: &str) -> Result<bool, Vec<Violation>> {
        match input.as_bool() {
            Some(b) => Ok(b),
            None => Err(wrong_type(path, "a boolean", input)),
        }
    }

    fn encode(&self, value: &bool) -> serde_json::Value {
        serde_json::Value::Bool(*value)
    }
}

/// Accepts any JSON value unchanged, `null` included.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySchema;

impl PayloadSchema for AnySchema {
    type Value = serde_json::Value;

    fn decode(
        &self,
        input: &serde_json::Value,
        _path: &str,
    ) -> Result<serde_json::Value, Vec<Violation>> {
        Ok(input.clone())
    }

    fn encode(&self, value: &serde_json::Value) -> serde_json::Value {
        value.clone()
    }
}

/// Adapts a serde-derived type into the same path-qualified reporting.
///
/// `expected` names the payload shape in diagnostics (e.g. `"UserRecord"`).
pub struct SerdeSchema<T> {
    expected: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeSchema<T> {
    pub fn new(expected: &'static str) -> Self {
        Self {
            expected,
            _marker: PhantomData,
        }
    }
}

impl<T> PayloadSchema for SerdeSchema<T>
where
    T: Serialize + DeserializeOwned,
{
    type Value = T;

    fn decode(&self, input: &serde_json::Value, path: &str) -> Result<T, Vec<Violation>> {
        serde_json::from_value(input.clone()).map_err(|e| {
            vec![Violation::Invalid {
                path: path.to_string(),
                reason: format!("not a valid {}: {e}", self.expected),
            }]
        })
    }

    fn encode(&self, value: &T) -> serde_json::Value {
        // A value that already deserialized from JSON re-serializes cleanly.
        serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
    }
}
