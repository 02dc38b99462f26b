//! Draft snapshot persisted to local storage while the wizard is in progress.

use std::collections::BTreeSet;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use super::{EventFormData, PlanningChoice, Selections, WizardStep};

/// Drafts older than this are discarded instead of restored.
pub const DRAFT_MAX_AGE: SignedDuration = SignedDuration::from_hours(24);

/// Serialized wizard state.
///
/// The JSON layout matches the browser draft format: camelCase keys and a
/// `timestamp` in epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub form_data: EventFormData,
    pub current_step: WizardStep,
    #[serde(default)]
    pub selections: Selections,
    #[serde(default)]
    pub planning_choice: Option<PlanningChoice>,
    #[serde(default)]
    pub completed_steps: BTreeSet<WizardStep>,
    /// Save time in milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl DraftSnapshot {
    /// Save time as a timestamp, if the stored value is in range.
    pub fn saved_at(&self) -> Option<Timestamp> {
        Timestamp::from_millisecond(self.timestamp).ok()
    }

    /// Age of the draft at `now`.
    pub fn age(&self, now: Timestamp) -> SignedDuration {
        SignedDuration::from_millis(now.as_millisecond().saturating_sub(self.timestamp))
    }

    /// A draft is restorable while strictly younger than [`DRAFT_MAX_AGE`].
    pub fn is_fresh(&self, now: Timestamp) -> bool {
        self.age(now) < DRAFT_MAX_AGE
    }
}
