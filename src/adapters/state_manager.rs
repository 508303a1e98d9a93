use std::collections::HashMap;

use crate::domain::{FieldDescriptor, FieldId, FieldValue};

/// Current values and validation messages of one form session.
///
/// Both maps are keyed by [`FieldId`]. Writing a value never touches the
/// error map; errors are only recomputed on submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormStateStore {
    values: HashMap<FieldId, FieldValue>,
    errors: HashMap<FieldId, String>,
}

impl FormStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, id: FieldId) -> Option<&FieldValue> {
        self.values.get(&id)
    }

    pub fn set_value(&mut self, id: FieldId, value: FieldValue) {
        self.values.insert(id, value);
    }

    /// Edited value if there is one, otherwise the field's initial value.
    pub fn current_value(&self, field: &FieldDescriptor) -> FieldValue {
        self.values
            .get(&field.id)
            .cloned()
            .unwrap_or_else(|| field.initial_value())
    }

    /// Stored message; `Some("")` means the field passed its last check.
    pub fn error(&self, id: FieldId) -> Option<&str> {
        self.errors.get(&id).map(String::as_str)
    }

    pub fn set_error(&mut self, id: FieldId, message: impl Into<String>) {
        self.errors.insert(id, message.into());
    }

    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|message| !message.is_empty())
    }

    /// Get all values (for inspection)
    pub fn values(&self) -> &HashMap<FieldId, FieldValue> {
        &self.values
    }

    /// Get all error messages (for inspection)
    pub fn errors(&self) -> &HashMap<FieldId, String> {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }
}
