//! Result wrapper types for submissions and quote requests.

use std::fmt;

use crate::{models::RemoteEvent, quote::QuoteReceipt};

/// Outcome of submitting the wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResult {
    pub event: RemoteEvent,
    /// `true` when an existing event was updated
    pub updated: bool,
    /// Whether a local draft was deleted afterwards
    pub draft_removed: bool,
}

impl fmt::Display for SubmitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.updated { "Updated" } else { "Created" };
        writeln!(f, "{verb} event with ID: {}", self.event.id)?;
        if self.draft_removed {
            writeln!(f, "Local draft removed.")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.event)
    }
}

impl fmt::Display for QuoteReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => writeln!(f, "Quote request submitted with ID: {id}")?,
            None => writeln!(f, "Quote request submitted.")?,
        }
        if let Some(status) = &self.status {
            writeln!(f, "- Status: {status}")?;
        }
        if self.sent_to_vendors {
            writeln!(f, "- Selected vendors notified")?;
        }
        Ok(())
    }
}
