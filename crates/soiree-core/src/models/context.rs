//! Wizard context: which event category is being planned and in which mode.

use serde::{Deserialize, Serialize};

use crate::db::DRAFT_KEY_PREFIX;

/// Identifies a wizard session.
///
/// The visible step list and the draft storage key are both derived from
/// these three values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WizardContext {
    /// Event category, e.g. `social`, `corporate`, `religious`
    pub section_id: String,
    /// Sub-category within the section, e.g. `wedding`, `conference`
    pub subsection: String,
    /// Remote event being edited; `None` when creating a new event
    pub edit_event_id: Option<u64>,
}

impl WizardContext {
    pub fn new(
        section_id: impl Into<String>,
        subsection: impl Into<String>,
        edit_event_id: Option<u64>,
    ) -> Self {
        Self {
            section_id: section_id.into(),
            subsection: subsection.into(),
            edit_event_id,
        }
    }

    /// Whether the wizard edits an existing remote event.
    pub fn is_edit_mode(&self) -> bool {
        self.edit_event_id.is_some()
    }

    /// Local storage key of the draft for this context:
    /// `draft_{section}_{subsection}_{editId|new}`.
    pub fn draft_key(&self) -> String {
        let edit = self
            .edit_event_id
            .map_or_else(|| "new".to_string(), |id| id.to_string());
        format!(
            "{DRAFT_KEY_PREFIX}{}_{}_{edit}",
            self.section_id, self.subsection
        )
    }
}
