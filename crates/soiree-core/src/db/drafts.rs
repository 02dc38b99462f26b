//! Draft snapshots stored under context-scoped keys.

use jiff::Timestamp;
use log::{debug, warn};

use super::DRAFT_KEY_PREFIX;
use crate::{
    error::Result,
    models::{DraftSnapshot, WizardContext},
};

/// Outcome of reading the draft for a context.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftLoad {
    /// A fresh draft was found
    Restored(DraftSnapshot),
    /// A draft older than the maximum age was found and deleted
    Expired,
    /// No draft is stored for the context
    Missing,
    /// The stored value did not parse and was deleted
    Corrupt,
}

impl DraftLoad {
    /// The restored snapshot, if any.
    pub fn into_snapshot(self) -> Option<DraftSnapshot> {
        match self {
            DraftLoad::Restored(snapshot) => Some(snapshot),
            DraftLoad::Expired | DraftLoad::Missing | DraftLoad::Corrupt => None,
        }
    }
}

/// A draft found while listing the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDraft {
    pub key: String,
    pub snapshot: DraftSnapshot,
}

impl super::LocalStorage {
    /// Writes the snapshot under the context's draft key.
    pub fn save_draft(&mut self, context: &WizardContext, snapshot: &DraftSnapshot) -> Result<()> {
        let key = context.draft_key();
        let json = serde_json::to_string(snapshot)?;
        self.set_item(&key, &json)?;
        debug!("Saved draft {key} at step {}", snapshot.current_step.as_str());
        Ok(())
    }

    /// Reads the context's draft, deleting it when it is stale or unreadable.
    pub fn load_draft(&mut self, context: &WizardContext, now: Timestamp) -> Result<DraftLoad> {
        let key = context.draft_key();
        let Some(raw) = self.get_item(&key)? else {
            return Ok(DraftLoad::Missing);
        };

        let snapshot = match serde_json::from_str::<DraftSnapshot>(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Discarding unreadable draft {key}: {e}");
                self.remove_item(&key)?;
                return Ok(DraftLoad::Corrupt);
            }
        };

        if !snapshot.is_fresh(now) {
            debug!("Discarding expired draft {key}");
            self.remove_item(&key)?;
            return Ok(DraftLoad::Expired);
        }

        Ok(DraftLoad::Restored(snapshot))
    }

    /// Deletes the context's draft. Returns whether one existed.
    pub fn discard_draft(&mut self, context: &WizardContext) -> Result<bool> {
        self.remove_item(&context.draft_key())
    }

    /// Every readable draft in the store, ordered by key.
    pub fn list_drafts(&self) -> Result<Vec<StoredDraft>> {
        let mut drafts = Vec::new();
        for key in self.keys_with_prefix(DRAFT_KEY_PREFIX)? {
            let Some(raw) = self.get_item(&key)? else {
                continue;
            };
            match serde_json::from_str::<DraftSnapshot>(&raw) {
                Ok(snapshot) => drafts.push(StoredDraft { key, snapshot }),
                Err(e) => warn!("Skipping unreadable draft {key}: {e}"),
            }
        }
        Ok(drafts)
    }
}
