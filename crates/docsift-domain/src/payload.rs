//! Parsed payloads, the intermediate representation classification runs on

use crate::signature::Signature;
use serde_json::{Map, Value};

/// A document payload that parsed as a JSON object
///
/// Payloads that are valid JSON but not objects (arrays, scalars) never become
/// a `Payload` and therefore never match a signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Parse a serialized payload
    ///
    /// Returns `Ok(None)` when the JSON is well-formed but not an object.
    pub fn parse(raw: &str) -> Result<Option<Self>, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(value))
    }

    /// Wrap a JSON value if it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Whether the object has an entry for `key` (a `null` value counts)
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Raw value of `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether every key of the signature is present, with array checks applied
    pub fn satisfies(&self, signature: &Signature) -> bool {
        if !signature.keys.iter().all(|key| self.has(key)) {
            return false;
        }
        match signature.array_key {
            Some(key) => self.number_array(key).is_some(),
            None => true,
        }
    }

    /// Text of `key`: strings verbatim, other non-null values as compact JSON
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Numeric value of `key`
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Integral value of `key`; floats are truncated
    pub fn integer(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?;
        value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
    }

    /// String at a nested path, e.g. `["data", "type"]`
    pub fn nested_str(&self, path: &[&str]) -> Option<String> {
        let (first, rest) = path.split_first()?;
        let mut current = self.get(first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        current.as_str().map(str::to_string)
    }

    /// The array at `key`, if it exists and every element is a number
    pub fn number_array(&self, key: &str) -> Option<Vec<f64>> {
        let items = self.get(key)?.as_array()?;
        items.iter().map(Value::as_f64).collect()
    }
}
