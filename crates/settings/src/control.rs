//! Control renderer
//!
//! Maps an entry's kind to a concrete control shape:
//!
//! | kind                      | widget        | live value             |
//! |---------------------------|---------------|------------------------|
//! | `boolean`                 | `Toggle`      | checked flag           |
//! | `text`                    | `TextField`   | string content         |
//! | `number`                  | `NumberField` | numeric content        |
//! | `single-choice-exclusive` | `ButtonGroup` | selected option value  |
//! | `single-choice-list`      | `DropDown`    | selected option value  |
//!
//! Every control carries its key and its default value, and exposes one
//! get/set interface regardless of widget, so the change tracker and the
//! save/reset coordinator never branch on the widget kind.

use fouru_core::{Entry, EntryKind, EntryType, Identifier, Selection, Value};

/// One option of a choice control.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    /// Element id, only assigned to exclusive buttons (`"{control id}-{n}"`)
    pub element_id: Option<String>,
    pub value: String,
    pub label: String,
}

/// The interactive part of a control and its live state.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Toggle { checked: bool },
    TextField { content: String },
    NumberField { value: f64 },
    ButtonGroup { options: Vec<ChoiceOption>, selected: Option<usize> },
    DropDown { options: Vec<ChoiceOption>, selected: Option<usize> },
}

impl Widget {
    pub fn options(&self) -> Option<&[ChoiceOption]> {
        match self {
            Widget::ButtonGroup { options, .. } | Widget::DropDown { options, .. } => Some(options),
            _ => None,
        }
    }
}

/// A rendered entry: widget state plus the metadata needed to save or reset it.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    key: Identifier,
    entry_type: EntryType,
    element_id: String,
    label: String,
    description: Option<String>,
    default: Value,
    widget: Widget,
}

impl Control {
    pub fn key(&self) -> &Identifier {
        &self.key
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Page-unique element id: `"{namespace}__{key}"`
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// The entry's declared default, kept for reset.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Current (possibly unsaved) value.
    ///
    /// A choice control with nothing selected reads as the empty string.
    pub fn value(&self) -> Value {
        match &self.widget {
            Widget::Toggle { checked } => Value::Bool(*checked),
            Widget::TextField { content } => Value::Text(content.clone()),
            Widget::NumberField { value } => Value::Number(*value),
            Widget::ButtonGroup { options, selected } | Widget::DropDown { options, selected } => {
                let value = selected
                    .and_then(|i| options.get(i))
                    .map(|o| o.value.clone())
                    .unwrap_or_default();
                Value::Text(value)
            }
        }
    }

    /// Set the live value, coercing it to the widget's shape.
    pub fn set_value(&mut self, value: &Value) {
        match &mut self.widget {
            Widget::Toggle { checked } => *checked = coerce_bool(value),
            Widget::TextField { content } => *content = value.to_string(),
            Widget::NumberField { value: n } => *n = coerce_number(value),
            Widget::ButtonGroup { options, selected } | Widget::DropDown { options, selected } => {
                let wanted = value.to_string();
                *selected = options.iter().position(|o| o.value == wanted);
                if selected.is_none() {
                    log::warn!(
                        "'{}' is not an option of {}; leaving it unselected",
                        wanted,
                        self.element_id
                    );
                }
            }
        }
    }

    /// Restore the declared default. Returns true if the live value changed.
    pub fn reset(&mut self) -> bool {
        let before = self.value();
        let default = self.default.clone();
        self.set_value(&default);
        before != self.value()
    }
}

/// Checked-flag coercion: strings compare against `"true"`, numbers are
/// truthy when non-zero.
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Text(s) => s == "true",
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
    }
}

/// Numeric coercion: strings are parsed as floating point, NaN when unparsable.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
    }
}

/// Element id of an entry's control.
pub fn element_id(namespace: &Identifier, key: &Identifier) -> String {
    format!("{namespace}__{key}")
}

/// Build the control for `entry`, showing `current` as its live value.
pub fn render(namespace: &Identifier, entry: &Entry, current: &Value) -> Control {
    let element_id = element_id(namespace, &entry.key);

    let widget = match &entry.kind {
        EntryKind::Boolean { .. } => Widget::Toggle { checked: false },
        EntryKind::Text { .. } => Widget::TextField { content: String::new() },
        EntryKind::Number { .. } => Widget::NumberField { value: f64::NAN },
        EntryKind::SingleChoiceExclusive { selections, .. } => Widget::ButtonGroup {
            options: choice_options(selections, Some(&element_id)),
            selected: None,
        },
        EntryKind::SingleChoiceList { selections, .. } => Widget::DropDown {
            options: choice_options(selections, None),
            selected: None,
        },
    };

    let mut control = Control {
        key: entry.key.clone(),
        entry_type: entry.entry_type(),
        element_id,
        label: entry.title.clone(),
        description: entry.description.clone(),
        default: entry.default_value(),
        widget,
    };
    control.set_value(current);
    control
}

fn choice_options(selections: &[Selection], id_prefix: Option<&str>) -> Vec<ChoiceOption> {
    selections
        .iter()
        .enumerate()
        .map(|(i, s)| ChoiceOption {
            element_id: id_prefix.map(|prefix| format!("{prefix}-{}", i + 1)),
            value: s.value.clone(),
            label: s.text.clone(),
        })
        .collect()
}
