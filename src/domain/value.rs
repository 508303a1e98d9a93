//! Field values
//!
//! Input widgets hand back raw text. [`FieldValue`] keeps the kind the field
//! was declared with, so numbers stay numbers and an unselected dropdown stays
//! distinguishable from a selected empty-looking option.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// A selectable dropdown option, either text or numeric.
#[derive(Debug, Clone, PartialEq)]
pub enum Choice {
    Number(f64),
    Text(String),
}

impl Choice {
    /// Reads one `options` entry of any JSON type. Numbers stay numeric,
    /// `null` is dropped and everything else is kept as its text.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => n.as_f64().map(Choice::Number),
            Value::String(s) => Some(Choice::Text(s)),
            other => Some(Choice::Text(other.to_string())),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Number(n) => write!(f, "{}", n),
            Choice::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Choice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Choice::Number(n) => serialize_number(*n, serializer),
            Choice::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// The value kind a field type stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Number,
    Selection,
}

/// Current value of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// `raw` is the text as entered; `parsed` is `None` when it is blank or
    /// not a finite number.
    Number { raw: String, parsed: Option<f64> },
    /// `None` is the empty "Select an option" sentinel.
    Selection(Option<Choice>),
}

impl FieldValue {
    /// The value a field of `kind` holds before any input.
    pub fn empty(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Text => FieldValue::Text(String::new()),
            ValueKind::Number => FieldValue::number(""),
            ValueKind::Selection => FieldValue::Selection(None),
        }
    }

    /// A number value holding `raw` verbatim.
    pub fn number(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = raw.trim().parse::<f64>().ok().filter(|n| n.is_finite());
        FieldValue::Number { raw, parsed }
    }

    /// The numeric reading of a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number { parsed, .. } => *parsed,
            _ => None,
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Number { .. } => ValueKind::Number,
            FieldValue::Selection(_) => ValueKind::Selection,
        }
    }

    /// Converts raw widget text into a value of `kind`.
    ///
    /// Selections resolve to the matching entry of `options` so numeric
    /// options keep their numeric form; text that matches no option is kept
    /// as a text choice.
    pub fn from_input(kind: ValueKind, raw: &str, options: &[Choice]) -> Self {
        match kind {
            ValueKind::Text => FieldValue::Text(raw.to_string()),
            ValueKind::Number => FieldValue::number(raw),
            ValueKind::Selection => {
                if raw.is_empty() {
                    return FieldValue::Selection(None);
                }
                let choice = options
                    .iter()
                    .find(|option| option.to_string() == raw)
                    .cloned()
                    .unwrap_or_else(|| Choice::Text(raw.to_string()));
                FieldValue::Selection(Some(choice))
            }
        }
    }

    /// Converts a `value`/`default_value` taken from the schema document.
    pub fn from_schema(kind: ValueKind, value: &SchemaValue, options: &[Choice]) -> Self {
        match (kind, value) {
            (ValueKind::Number, SchemaValue::Number(n)) => FieldValue::Number {
                raw: n.to_string(),
                parsed: Some(*n),
            },
            (_, other) => Self::from_input(kind, &other.to_string(), options),
        }
    }

    /// True when the value renders as an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number { raw, .. } => raw.is_empty(),
            FieldValue::Selection(c) => c.is_none(),
        }
    }
}

/// Textual representation used for pattern matching and display. Numbers
/// show exactly what was entered.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Number { raw: s, .. } => f.write_str(s),
            FieldValue::Selection(Some(choice)) => choice.fmt(f),
            FieldValue::Selection(None) => Ok(()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Number { parsed: Some(n), .. } => serialize_number(*n, serializer),
            // Blank or unparseable input goes out as the text that was entered
            FieldValue::Number { raw, parsed: None } => serializer.serialize_str(raw),
            FieldValue::Selection(Some(choice)) => choice.serialize(serializer),
            FieldValue::Selection(None) => serializer.serialize_str(""),
        }
    }
}

/// A scalar `value` / `default_value` as written in the schema document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SchemaValue {
    /// Reads a `value` / `default_value` of any JSON type; `null` is absent
    /// and arrays or objects are kept as their JSON text.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(SchemaValue::Bool(b)),
            Value::Number(n) => n.as_f64().map(SchemaValue::Number),
            Value::String(s) => Some(SchemaValue::Text(s)),
            other => Some(SchemaValue::Text(other.to_string())),
        }
    }
}

impl fmt::Display for SchemaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaValue::Bool(b) => write!(f, "{}", b),
            SchemaValue::Number(n) => write!(f, "{}", n),
            SchemaValue::Text(s) => f.write_str(s),
        }
    }
}

// Whole numbers go out as integers so `3` does not become `3.0` in the snapshot.
fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}
