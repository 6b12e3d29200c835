//! Entry schema
//!
//! Add-ons describe entries with a loose [`EntrySpec`] (every field optional,
//! mirroring the object literal an add-on author writes). [`EntrySpec::build`]
//! turns it into a checked [`Entry`] whose [`EntryKind`] carries only the
//! fields that make sense for that kind, so a choice entry without selections
//! or an entry with an unknown type never reaches the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;
use crate::identifier::Identifier;
use crate::value::Value;

// ============================================================================
// Entry types
// ============================================================================

/// Declared type of an entry, before its fields are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Boolean,
    Text,
    Number,
    SingleChoiceExclusive,
    SingleChoiceList,
}

impl EntryType {
    pub const ALL: [EntryType; 5] = [
        EntryType::Boolean,
        EntryType::Text,
        EntryType::Number,
        EntryType::SingleChoiceExclusive,
        EntryType::SingleChoiceList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Boolean => "boolean",
            EntryType::Text => "text",
            EntryType::Number => "number",
            EntryType::SingleChoiceExclusive => "single-choice-exclusive",
            EntryType::SingleChoiceList => "single-choice-list",
        }
    }

    /// Choice kinds require a non-empty selection list.
    pub fn is_choice(&self) -> bool {
        matches!(self, EntryType::SingleChoiceExclusive | EntryType::SingleChoiceList)
    }
}

impl FromStr for EntryType {
    type Err = SchemaError;

    /// Accepts the canonical names plus the legacy `checkbox`, `radio` and
    /// `dropdown` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" | "checkbox" => Ok(EntryType::Boolean),
            "text" => Ok(EntryType::Text),
            "number" => Ok(EntryType::Number),
            "single-choice-exclusive" | "radio" => Ok(EntryType::SingleChoiceExclusive),
            "single-choice-list" | "dropdown" => Ok(EntryType::SingleChoiceList),
            other => Err(SchemaError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (value, label) pair of a choice entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub value: String,
    pub text: String,
}

impl Selection {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self { value: value.into(), text: text.into() }
    }
}

/// A checked entry kind with its type-specific fields.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    Boolean { default: bool },
    Text { default: String },
    Number { default: f64 },
    SingleChoiceExclusive { selections: Vec<Selection>, default: String },
    SingleChoiceList { selections: Vec<Selection>, default: String },
}

impl EntryKind {
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryKind::Boolean { .. } => EntryType::Boolean,
            EntryKind::Text { .. } => EntryType::Text,
            EntryKind::Number { .. } => EntryType::Number,
            EntryKind::SingleChoiceExclusive { .. } => EntryType::SingleChoiceExclusive,
            EntryKind::SingleChoiceList { .. } => EntryType::SingleChoiceList,
        }
    }

    /// The declared default as a stored value.
    pub fn default_value(&self) -> Value {
        match self {
            EntryKind::Boolean { default } => Value::Bool(*default),
            EntryKind::Text { default } => Value::Text(default.clone()),
            EntryKind::Number { default } => Value::Number(*default),
            EntryKind::SingleChoiceExclusive { default, .. }
            | EntryKind::SingleChoiceList { default, .. } => Value::Text(default.clone()),
        }
    }

    pub fn selections(&self) -> Option<&[Selection]> {
        match self {
            EntryKind::SingleChoiceExclusive { selections, .. }
            | EntryKind::SingleChoiceList { selections, .. } => Some(selections),
            _ => None,
        }
    }
}

// ============================================================================
// Entries
// ============================================================================

/// A registered setting.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: Identifier,
    pub title: String,
    pub description: Option<String>,
    pub kind: EntryKind,
}

impl Entry {
    pub fn default_value(&self) -> Value {
        self.kind.default_value()
    }

    pub fn entry_type(&self) -> EntryType {
        self.kind.entry_type()
    }
}

/// Entry description as written by an add-on author.
///
/// Deserializes from the same camelCase object shape add-ons have always
/// used: `{title, key, type, defaultValue, description?, selections?}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selections: Option<Vec<Selection>>,
}

impl EntrySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn entry_type(mut self, entry_type: impl Into<String>) -> Self {
        self.entry_type = Some(entry_type.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append one selection pair, creating the list if needed.
    pub fn selection(mut self, value: impl Into<String>, text: impl Into<String>) -> Self {
        self.selections
            .get_or_insert_with(Vec::new)
            .push(Selection::new(value, text));
        self
    }

    /// Names of every required field this spec lacks.
    ///
    /// `selections` is only required when the declared type is a choice type,
    /// and counts as missing when present but empty.
    pub fn missing_parameters(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push("title");
        }
        if self.key.is_none() {
            missing.push("key");
        }
        if self.entry_type.is_none() {
            missing.push("type");
        }
        if self.default_value.is_none() {
            missing.push("defaultValue");
        }
        let is_choice = self
            .entry_type
            .as_deref()
            .and_then(|t| t.parse::<EntryType>().ok())
            .is_some_and(|t| t.is_choice());
        if is_choice && self.selections.as_ref().map_or(true, |s| s.is_empty()) {
            missing.push("selections");
        }
        missing
    }

    /// Check the spec and produce a typed [`Entry`].
    ///
    /// Reports every missing field at once; then checks the key, the type
    /// name and finally the default value.
    ///
    /// Boolean and number entries also accept their default written as a
    /// string (`"true"`, `"2.5"`); the parsed scalar is what gets seeded.
    /// Text and choice entries take string defaults only, so the store
    /// holds exactly the declared value.
    pub fn build(&self) -> Result<Entry, SchemaError> {
        let missing = self.missing_parameters();
        let (Some(title), Some(key), Some(type_name), Some(default), true) = (
            self.title.as_ref(),
            self.key.as_deref(),
            self.entry_type.as_deref(),
            self.default_value.as_ref(),
            missing.is_empty(),
        ) else {
            return Err(SchemaError::MissingParameters {
                missing,
                spec: self.to_json(),
            });
        };

        let key = Identifier::new(key)?;
        let entry_type: EntryType = type_name.parse()?;
        let kind = build_kind(entry_type, key.as_str(), default, self.selections.as_deref())?;

        Ok(Entry {
            key,
            title: title.clone(),
            description: self.description.clone(),
            kind,
        })
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

fn build_kind(
    entry_type: EntryType,
    key: &str,
    default: &Value,
    selections: Option<&[Selection]>,
) -> Result<EntryKind, SchemaError> {
    let invalid = |reason: String| SchemaError::InvalidDefault {
        key: key.to_string(),
        reason,
    };

    match entry_type {
        EntryType::Boolean => {
            let default = match default {
                Value::Bool(b) => *b,
                Value::Text(s) if s == "true" => true,
                Value::Text(s) if s == "false" => false,
                other => return Err(invalid(format!("expected a boolean, found {other:?}"))),
            };
            Ok(EntryKind::Boolean { default })
        }
        EntryType::Text => match default {
            Value::Text(s) => Ok(EntryKind::Text { default: s.clone() }),
            other => Err(invalid(format!("expected a string, found {other:?}"))),
        },
        EntryType::Number => {
            let default = match default {
                Value::Number(n) => *n,
                Value::Text(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| invalid(format!("\"{s}\" is not a number")))?,
                Value::Bool(b) => return Err(invalid(format!("expected a number, found {b}"))),
            };
            Ok(EntryKind::Number { default })
        }
        EntryType::SingleChoiceExclusive | EntryType::SingleChoiceList => {
            let selections = selections.unwrap_or_default().to_vec();
            let default = match default {
                Value::Text(s) => s.clone(),
                other => return Err(invalid(format!("expected a selection value, found {other:?}"))),
            };
            if !selections.iter().any(|s| s.value == default) {
                return Err(invalid(format!("\"{default}\" is not one of the selections")));
            }
            Ok(if entry_type == EntryType::SingleChoiceExclusive {
                EntryKind::SingleChoiceExclusive { selections, default }
            } else {
                EntryKind::SingleChoiceList { selections, default }
            })
        }
    }
}
