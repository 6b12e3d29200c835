//! Scalar setting values
//!
//! Every stored value is one of three scalars. Numbers follow the host
//! store's JSON rules: a non-finite number serializes as `null`, and `null`
//! reads back as NaN (an empty numeric field).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored or live setting value.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Name of the scalar type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "string",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

// NaN compares equal to NaN so an empty numeric field is not perpetually dirty
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) if n.is_nan() => f.write_str("NaN"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| serde::de::Error::custom("number out of range")),
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            serde_json::Value::Null => Ok(Value::Number(f64::NAN)),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean, number or string, found {other}"
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_json_shapes() {
        assert_eq!(serde_json::to_string(&Value::Bool(false)).unwrap(), "false");
        assert_eq!(serde_json::to_string(&Value::Number(2.5)).unwrap(), "2.5");
        assert_eq!(serde_json::to_string(&Value::from("b")).unwrap(), "\"b\"");

        let parsed: Value = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, Value::Number(3.0));
        let parsed: Value = serde_json::from_str("true").unwrap();
        assert_eq!(parsed, Value::Bool(true));
    }

    #[test]
    fn test_nan_survives_as_null() {
        let json = serde_json::to_string(&Value::Number(f64::NAN)).unwrap();
        assert_eq!(json, "null");
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Value::Number(f64::NAN));
    }

    #[test]
    fn test_rejects_nested_values() {
        assert!(serde_json::from_str::<Value>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Value>(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn test_cross_type_inequality() {
        assert_ne!(Value::from("1"), Value::Number(1.0));
        assert_ne!(Value::from("true"), Value::Bool(true));
    }
}
