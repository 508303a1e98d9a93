//! Submission controller
//!
//! Two states: `Editing` (no snapshot) and `Submitted` (a snapshot exists).
//! A submit where every rule passes moves to `Submitted`, replacing any earlier
//! snapshot. A submit with any failing field moves back to `Editing`. There is
//! no terminal state; the controller cycles for as long as the definition
//! stays loaded.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use tracing::{info, warn};

use super::state_manager::FormStateStore;
use crate::domain::{FieldKey, FieldValue, FormDefinition, PatternCache, VALIDATION_FAILED};

// ============================================================================
// Snapshot
// ============================================================================

/// Values of every field at the moment a submission passed validation.
///
/// Serializes as a JSON object keyed by positional key, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionSnapshot {
    entries: Vec<(FieldKey, FieldValue)>,
}

impl SubmissionSnapshot {
    fn capture(definition: &FormDefinition, store: &FormStateStore) -> Self {
        Self {
            entries: definition
                .iter()
                .map(|(key, field)| (key, store.current_value(field)))
                .collect(),
        }
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json_string(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Serialize for SubmissionSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ============================================================================
// State Machine
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Editing,
    Submitted(Arc<SubmissionSnapshot>),
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(Arc<SubmissionSnapshot>),
    /// Positional keys of the fields that failed, in field order.
    Rejected { failed: Vec<FieldKey> },
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    patterns: PatternCache,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&Arc<SubmissionSnapshot>> {
        match &self.state {
            SubmissionState::Submitted(snapshot) => Some(snapshot),
            SubmissionState::Editing => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Validates every field that declares a rule, records `""` or
    /// [`VALIDATION_FAILED`] for each, and publishes a snapshot when all pass.
    ///
    /// A rule that does not compile fails its field; the remaining fields are
    /// still checked. Any failure withdraws a previously published snapshot.
    pub fn submit(&mut self, definition: &FormDefinition, store: &mut FormStateStore) -> SubmitOutcome {
        let mut failed = Vec::new();

        for (key, field) in definition.iter() {
            let Some(rule) = field.rule() else {
                continue;
            };

            let value = store.current_value(field);
            let passed = match self.patterns.validate(Some(rule), &value) {
                Ok(passed) => passed,
                Err(e) => {
                    warn!(field = %key, error = %e, "Validation rule does not compile, failing field");
                    false
                }
            };

            store.set_error(field.id, if passed { "" } else { VALIDATION_FAILED });
            if !passed {
                failed.push(key);
            }
        }

        if !failed.is_empty() {
            info!(failed = failed.len(), fields = definition.len(), "Submission rejected");
            self.state = SubmissionState::Editing;
            return SubmitOutcome::Rejected { failed };
        }

        let snapshot = Arc::new(SubmissionSnapshot::capture(definition, store));
        info!(fields = snapshot.len(), "Submission accepted");
        self.state = SubmissionState::Submitted(snapshot.clone());
        SubmitOutcome::Submitted(snapshot)
    }

    /// Back to `Editing` with no snapshot. Compiled rules are dropped too,
    /// since the next definition brings its own.
    pub fn reset(&mut self) {
        self.state = SubmissionState::Editing;
        self.patterns.clear();
    }
}
