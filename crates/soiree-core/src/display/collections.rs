//! Collection wrapper types for displaying groups of records.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::{db::StoredDraft, models::RemoteEvent};

/// Newtype wrapper for displaying a list of remote events.
///
/// ```rust
/// use soiree_core::{EventSummaries, RemoteEvent};
///
/// let events = EventSummaries(Vec::<RemoteEvent>::new());
/// assert_eq!(events.to_string(), "No events found.\n");
/// ```
pub struct EventSummaries(pub Vec<RemoteEvent>);

impl EventSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&RemoteEvent> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RemoteEvent> {
        self.0.iter()
    }
}

impl Index<usize> for EventSummaries {
    type Output = RemoteEvent;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for EventSummaries {
    type Item = RemoteEvent;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for EventSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No events found.");
        }
        for event in &self.0 {
            let payload = &event.payload;
            writeln!(f, "## {} (ID: {})", payload.event_name, event.id)?;
            writeln!(f)?;
            writeln!(f, "- **Type**: {}", payload.event_type)?;
            match (&payload.event_date, payload.date_confirmed) {
                (Some(date), true) => writeln!(f, "- **Date**: {date}")?,
                _ => writeln!(f, "- **Date**: not confirmed")?,
            }
            if !payload.city.is_empty() {
                writeln!(f, "- **City**: {}", payload.city)?;
            }
            writeln!(f, "- **Attendees**: {}", payload.attendees)?;
            if let Some(status) = &event.status {
                writeln!(f, "- **Status**: {status}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying locally stored drafts.
pub struct DraftSummaries(pub Vec<StoredDraft>);

impl DraftSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for DraftSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No drafts found.");
        }
        for draft in &self.0 {
            let snapshot = &draft.snapshot;
            let name = if snapshot.form_data.event_name.is_empty() {
                "Untitled event"
            } else {
                snapshot.form_data.event_name.as_str()
            };
            writeln!(f, "## {name}")?;
            writeln!(f)?;
            writeln!(f, "- **Key**: {}", draft.key)?;
            writeln!(f, "- **Step**: {}", snapshot.current_step.title())?;
            if let Some(saved) = snapshot.saved_at() {
                writeln!(f, "- **Saved**: {}", LocalDateTime(&saved))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
