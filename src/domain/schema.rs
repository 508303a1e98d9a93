//! Schema model
//!
//! A form definition is an ordered list of field descriptors:
//!
//! ```json
//! [
//!   { "type": "text", "validation": "^[a-z]+$" },
//!   { "type": "number", "min_value": 1, "max_value": 10, "default_value": 5 },
//!   { "type": "dropdown", "options": ["red", "green"] }
//! ]
//! ```
//!
//! YAML documents use the same top-level sequence. TOML has no top-level
//! arrays, so TOML documents list descriptors under `[[fields]]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

use super::error::SchemaParseError;
use super::value::{Choice, FieldValue, SchemaValue, ValueKind};

// ============================================================================
// Identity
// ============================================================================

/// Stable identity of a field, assigned when the definition is loaded.
///
/// Reloading a document assigns fresh ids, so state recorded against an
/// earlier definition can never be read back through a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(Uuid);

impl FieldId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Positional key `field<index>`, used for display and in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey(pub usize);

impl FieldKey {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field{}", self.0)
    }
}

/// Accepts `field3` as well as a bare `3`.
impl FromStr for FieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("field").unwrap_or(s);
        digits
            .parse::<usize>()
            .map(FieldKey)
            .map_err(|_| format!("'{}' is not a field key (expected field<index>)", s))
    }
}

impl Serialize for FieldKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Field Descriptor
// ============================================================================

/// Declared field type. Unrecognized names are kept verbatim and render
/// like `text`; a non-string `type` is kept as its JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum FieldType {
    Text,
    LongText,
    Dropdown,
    Number,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::LongText => "longtext",
            FieldType::Dropdown => "dropdown",
            FieldType::Number => "number",
            FieldType::Other(name) => name,
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        match self {
            FieldType::Number => ValueKind::Number,
            FieldType::Dropdown => ValueKind::Selection,
            FieldType::Text | FieldType::LongText | FieldType::Other(_) => ValueKind::Text,
        }
    }
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::Other(String::new())
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "text" => FieldType::Text,
            "longtext" => FieldType::LongText,
            "dropdown" => FieldType::Dropdown,
            "number" => FieldType::Number,
            _ => FieldType::Other(name),
        }
    }
}

impl From<Value> for FieldType {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => FieldType::from(name),
            Value::Null => FieldType::default(),
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One schema entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(skip)]
    pub id: FieldId,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<SchemaValue>,
    /// Preset current value, e.g. carried over from an earlier session.
    #[serde(default, deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub value: Option<SchemaValue>,
    /// Regular expression the value must contain a match for.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    /// Advisory lower bound for number inputs.
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Advisory upper bound for number inputs.
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::choices", skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Choice>>,
}

impl FieldDescriptor {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            id: FieldId::new(),
            field_type,
            default_value: None,
            value: None,
            validation: None,
            min_value: None,
            max_value: None,
            options: None,
        }
    }

    pub fn with_validation(mut self, rule: impl Into<String>) -> Self {
        self.validation = Some(rule.into());
        self
    }

    pub fn with_options(mut self, options: Vec<Choice>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_default(mut self, value: SchemaValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    pub fn options(&self) -> &[Choice] {
        self.options.as_deref().unwrap_or_default()
    }

    /// The rule to enforce, if any. An empty rule string enforces nothing.
    pub fn rule(&self) -> Option<&str> {
        self.validation.as_deref().filter(|rule| !rule.is_empty())
    }

    /// Value before any user edit: the preset `value`, then `default_value`,
    /// then the empty value of the field's kind.
    pub fn initial_value(&self) -> FieldValue {
        let kind = self.field_type.value_kind();
        self.value
            .as_ref()
            .or(self.default_value.as_ref())
            .map(|v| FieldValue::from_schema(kind, v, self.options()))
            .unwrap_or_else(|| FieldValue::empty(kind))
    }
}

/// Descriptor attributes accept any JSON type. Values of an unexpected type
/// are converted where there is an obvious reading and dropped otherwise, so
/// one odd attribute never rejects the whole document.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::domain::value::{Choice, SchemaValue};

    pub fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<SchemaValue>, D::Error> {
        Ok(SchemaValue::from_json(Value::deserialize(deserializer)?))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        })
    }

    pub fn choices<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<Choice>>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(entries) => Some(entries.into_iter().filter_map(Choice::from_json).collect()),
            _ => None,
        })
    }
}

// ============================================================================
// Form Definition
// ============================================================================

/// Serialization format of a schema document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

impl SchemaFormat {
    /// Infers the format from a file extension. `None` for unknown extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(SchemaFormat::Json),
            Some("yaml") | Some("yml") => Some(SchemaFormat::Yaml),
            Some("toml") => Some(SchemaFormat::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchemaFormat::Json => "json",
            SchemaFormat::Yaml => "yaml",
            SchemaFormat::Toml => "toml",
        })
    }
}

impl FromStr for SchemaFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(SchemaFormat::Json),
            "yaml" | "yml" => Ok(SchemaFormat::Yaml),
            "toml" => Ok(SchemaFormat::Toml),
            other => Err(format!("unknown schema format '{}' (expected json, yaml or toml)", other)),
        }
    }
}

#[derive(Deserialize)]
struct TomlDocument {
    fields: Vec<FieldDescriptor>,
}

/// Ordered sequence of field descriptors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDefinition {
    fields: Vec<FieldDescriptor>,
}

impl FormDefinition {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Interprets `text` as a form definition. Every descriptor gets a fresh
    /// [`FieldId`].
    pub fn parse(text: &str, format: SchemaFormat) -> Result<Self, SchemaParseError> {
        let fields: Vec<FieldDescriptor> = match format {
            SchemaFormat::Json => serde_json::from_str(text).map_err(|e| SchemaParseError::new(format, e))?,
            SchemaFormat::Yaml => serde_yaml::from_str(text).map_err(|e| SchemaParseError::new(format, e))?,
            SchemaFormat::Toml => {
                toml::from_str::<TomlDocument>(text)
                    .map_err(|e| SchemaParseError::new(format, e))?
                    .fields
            }
        };
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Descriptors paired with their positional keys, in order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldDescriptor)> {
        self.fields.iter().enumerate().map(|(i, field)| (FieldKey(i), field))
    }

    pub fn get(&self, id: FieldId) -> Option<(FieldKey, &FieldDescriptor)> {
        self.iter().find(|(_, field)| field.id == id)
    }

    pub fn by_key(&self, key: FieldKey) -> Option<&FieldDescriptor> {
        self.fields.get(key.index())
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.fields.iter().any(|field| field.id == id)
    }
}
