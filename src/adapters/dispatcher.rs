//! Field dispatch
//!
//! Maps each descriptor's declared type to the input it is shown with, and
//! turns edits coming back from those inputs into typed values in the store.

use tracing::debug;

use super::state_manager::FormStateStore;
use crate::domain::{Choice, FieldDescriptor, FieldId, FieldKey, FieldType, FieldValue, FormDefinition};

/// Label of the always-present empty option of a dropdown.
pub const EMPTY_OPTION_LABEL: &str = "Select an option";

// ============================================================================
// Input Widgets
// ============================================================================

/// Input representation of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum InputWidget {
    /// Multi-line free text (`text`, `longtext`).
    TextArea,
    /// Single-line free text, used for unrecognized types.
    TextInput,
    /// Numeric input; bounds are passed to the widget, not enforced.
    NumberInput { min: Option<f64>, max: Option<f64> },
    /// Selection with an empty sentinel ahead of `options`.
    Select { options: Vec<Choice> },
}

/// Edit coming back from a widget: the raw text now shown in it.
#[derive(Debug, Clone, PartialEq)]
pub struct EditEvent {
    pub id: FieldId,
    pub raw: String,
}

impl EditEvent {
    pub fn new(id: FieldId, raw: impl Into<String>) -> Self {
        Self { id, raw: raw.into() }
    }
}

/// Everything a presentation layer needs to draw one field.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    pub id: FieldId,
    pub key: FieldKey,
    pub label: String,
    pub widget: InputWidget,
    pub value: FieldValue,
    /// Present only while the field is marked invalid.
    pub error: Option<String>,
}

// ============================================================================
// Dispatcher
// ============================================================================

pub struct FieldDispatcher;

impl FieldDispatcher {
    pub fn widget_for(field: &FieldDescriptor) -> InputWidget {
        match &field.field_type {
            FieldType::Text | FieldType::LongText => InputWidget::TextArea,
            FieldType::Number => InputWidget::NumberInput {
                min: field.min_value,
                max: field.max_value,
            },
            FieldType::Dropdown => InputWidget::Select {
                options: field.options().to_vec(),
            },
            FieldType::Other(_) => InputWidget::TextInput,
        }
    }

    /// `Select <type>:` for dropdowns, `Enter <type>:` otherwise. A field
    /// without a type is labeled as text.
    pub fn label_for(field: &FieldDescriptor) -> String {
        let name = match field.field_type.as_str() {
            "" => "text",
            name => name,
        };
        match field.field_type {
            FieldType::Dropdown => format!("Select {}:", name),
            _ => format!("Enter {}:", name),
        }
    }

    pub fn render_field(key: FieldKey, field: &FieldDescriptor, store: &FormStateStore) -> RenderedField {
        RenderedField {
            id: field.id,
            key,
            label: Self::label_for(field),
            widget: Self::widget_for(field),
            value: store.current_value(field),
            error: store
                .error(field.id)
                .filter(|message| !message.is_empty())
                .map(String::from),
        }
    }

    /// One rendered field per descriptor, in definition order.
    pub fn render(definition: &FormDefinition, store: &FormStateStore) -> Vec<RenderedField> {
        definition
            .iter()
            .map(|(key, field)| Self::render_field(key, field, store))
            .collect()
    }

    /// Writes the edited field's new value. Only that field's entry changes.
    ///
    /// Returns `false` when the id does not belong to `definition`, e.g. an
    /// edit raised by a widget of a definition that has since been replaced.
    pub fn apply_edit(definition: &FormDefinition, store: &mut FormStateStore, edit: EditEvent) -> bool {
        let Some((key, field)) = definition.get(edit.id) else {
            debug!(id = %edit.id, "Ignoring edit for unknown field");
            return false;
        };

        let value = FieldValue::from_input(field.field_type.value_kind(), &edit.raw, field.options());
        debug!(field = %key, value = %value, "Field edited");
        store.set_value(field.id, value);
        true
    }
}
