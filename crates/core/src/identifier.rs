//! Identifier validation
//!
//! Namespaces, groups and entry keys all share one naming rule: a word
//! character that is not a digit, followed by any number of ASCII
//! alphanumerics, underscores or hyphens. Identifiers are never normalized,
//! only accepted or rejected.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::error::SchemaError;

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_-]*$";

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IDENTIFIER_PATTERN).unwrap())
}

/// Check `id` against the identifier rule.
pub fn validate(id: &str) -> Result<(), SchemaError> {
    if identifier_regex().is_match(id) {
        Ok(())
    } else {
        Err(SchemaError::InvalidIdentifier(id.to_string()))
    }
}

/// A validated namespace, group or entry identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(id: impl Into<String>) -> Result<Self, SchemaError> {
        let id = id.into();
        validate(&id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Identifier {
    type Error = SchemaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Identifier::new(raw).map_err(serde::de::Error::custom)
    }
}
