use std::sync::Arc;
use tracing::{error, info};

use super::dispatcher::{EditEvent, FieldDispatcher, RenderedField};
use super::state_manager::FormStateStore;
use super::submission::{SubmissionController, SubmissionSnapshot, SubmissionState, SubmitOutcome};
use crate::domain::{FieldKey, FormDefinition, SchemaFormat, SchemaParseError};

/// Everything the presentation layer shows for the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedForm {
    pub fields: Vec<RenderedField>,
    /// Present only in the `Submitted` state.
    pub snapshot: Option<Arc<SubmissionSnapshot>>,
}

/// One form session: the loaded definition plus its state.
///
/// All handlers run to completion on the caller's thread; the session is
/// owned by whichever shell drives it and is never shared.
#[derive(Debug, Default)]
pub struct FormSession {
    definition: FormDefinition,
    store: FormStateStore,
    controller: SubmissionController,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definition(definition: FormDefinition) -> Self {
        let mut session = Self::new();
        session.load(definition);
        session
    }

    /// Replaces the definition and clears values, errors and snapshot.
    pub fn load(&mut self, definition: FormDefinition) {
        info!(fields = definition.len(), "Form definition loaded");
        self.definition = definition;
        self.reset();
    }

    /// Parses and loads a document. On a parse error the current definition
    /// and its state are kept as they are.
    pub fn load_str(&mut self, text: &str, format: SchemaFormat) -> Result<(), SchemaParseError> {
        match FormDefinition::parse(text, format) {
            Ok(definition) => {
                self.load(definition);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to load form definition");
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        self.store.reset();
        self.controller.reset();
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn store(&self) -> &FormStateStore {
        &self.store
    }

    pub fn state(&self) -> &SubmissionState {
        self.controller.state()
    }

    pub fn snapshot(&self) -> Option<&Arc<SubmissionSnapshot>> {
        self.controller.snapshot()
    }

    pub fn edit(&mut self, edit: EditEvent) -> bool {
        FieldDispatcher::apply_edit(&self.definition, &mut self.store, edit)
    }

    /// Edits the field at a positional key. Returns `false` when no field
    /// sits at that position.
    pub fn edit_key(&mut self, key: FieldKey, raw: impl Into<String>) -> bool {
        match self.definition.by_key(key) {
            Some(field) => {
                let edit = EditEvent::new(field.id, raw);
                self.edit(edit)
            }
            None => false,
        }
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        self.controller.submit(&self.definition, &mut self.store)
    }

    pub fn render(&self) -> RenderedForm {
        RenderedForm {
            fields: FieldDispatcher::render(&self.definition, &self.store),
            snapshot: self.controller.snapshot().cloned(),
        }
    }
}
