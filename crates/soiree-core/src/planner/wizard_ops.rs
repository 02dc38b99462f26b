//! Wizard session operations: start, resume, drafts and submission.

use jiff::Timestamp;
use log::{debug, info};

use super::EventPlanner;
use crate::{
    autosave::Autosave,
    db::{self, DraftLoad, StoredDraft},
    display::SubmitResult,
    error::{PlanningError, Result},
    models::WizardContext,
    payload::{from_api_payload, to_api_payload},
    wizard::{validate_all, WizardState},
};

/// Where the state returned by [`EventPlanner::start_wizard`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOrigin {
    /// No draft was stored
    Fresh,
    /// A fresh draft was restored
    RestoredDraft,
    /// The stored draft was too old and has been deleted
    ExpiredDraft,
    /// The stored draft could not be read and has been deleted
    CorruptDraft,
    /// The form was loaded from the backend for editing
    RemoteEvent,
}

/// A started wizard session.
#[derive(Debug, Clone)]
pub struct WizardStart {
    pub state: WizardState,
    pub origin: StartOrigin,
}

impl EventPlanner {
    /// Starts a wizard session.
    ///
    /// In create mode the stored draft for the context is restored when it
    /// is younger than a day. In edit mode the event is loaded from the
    /// backend and every step it already satisfies is marked completed.
    pub async fn start_wizard(&self, context: &WizardContext) -> Result<WizardStart> {
        if let Some(id) = context.edit_event_id {
            let event = self.api.get_event(id).await?;
            let form = from_api_payload(&event.payload);
            debug!("Loaded event {id} for editing");
            return Ok(WizardStart {
                state: WizardState::for_edit(context.clone(), form),
                origin: StartOrigin::RemoteEvent,
            });
        }

        let load_context = context.clone();
        let load = db::blocking(&self.db_path, move |storage| {
            storage.load_draft(&load_context, Timestamp::now())
        })
        .await?;

        let (state, origin) = match load {
            DraftLoad::Restored(snapshot) => {
                debug!("Restored draft {}", context.draft_key());
                (
                    WizardState::from_draft(context.clone(), snapshot),
                    StartOrigin::RestoredDraft,
                )
            }
            DraftLoad::Expired => (WizardState::new(context.clone()), StartOrigin::ExpiredDraft),
            DraftLoad::Corrupt => (WizardState::new(context.clone()), StartOrigin::CorruptDraft),
            DraftLoad::Missing => (WizardState::new(context.clone()), StartOrigin::Fresh),
        };
        Ok(WizardStart { state, origin })
    }

    /// Reloads a session saved with [`EventPlanner::save_draft`].
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::SessionNotFound` when no fresh draft is
    /// stored for the context.
    pub async fn resume_session(&self, context: &WizardContext) -> Result<WizardState> {
        let load_context = context.clone();
        let load = db::blocking(&self.db_path, move |storage| {
            storage.load_draft(&load_context, Timestamp::now())
        })
        .await?;

        match load.into_snapshot() {
            Some(snapshot) => Ok(WizardState::from_draft(context.clone(), snapshot)),
            None => Err(PlanningError::SessionNotFound {
                key: context.draft_key(),
            }),
        }
    }

    /// Writes the state to its draft key now and clears the dirty flag.
    pub async fn save_draft(&self, state: &mut WizardState) -> Result<Timestamp> {
        let now = Timestamp::now();
        let context = state.context.clone();
        let snapshot = state.to_draft(now);
        db::blocking(&self.db_path, move |storage| {
            storage.save_draft(&context, &snapshot)
        })
        .await?;
        state.mark_saved(now);
        Ok(now)
    }

    /// Deletes the draft for the context. Returns whether one existed.
    pub async fn discard_draft(&self, context: &WizardContext) -> Result<bool> {
        let context = context.clone();
        db::blocking(&self.db_path, move |storage| storage.discard_draft(&context)).await
    }

    /// Every readable draft in local storage.
    pub async fn list_drafts(&self) -> Result<Vec<StoredDraft>> {
        db::blocking(&self.db_path, |storage| storage.list_drafts()).await
    }

    /// Validates the whole form, creates or updates the remote event and
    /// deletes the draft.
    ///
    /// On success the state moves to the terminal success step. Nothing is
    /// sent when any gated step fails validation.
    pub async fn submit(&self, state: &mut WizardState) -> Result<SubmitResult> {
        if state.is_complete() {
            return Err(PlanningError::invalid_input("step")
                .with_reason("this event has already been submitted"));
        }

        let errors = validate_all(&state.form);
        if !errors.is_empty() {
            return Err(PlanningError::Validation { step: None, errors });
        }

        let context = state.context.clone();
        let payload = to_api_payload(&state.form, &context.section_id, &context.subsection);
        let (event, updated) = match context.edit_event_id {
            Some(id) => (self.api.update_event(id, &payload).await?, true),
            None => (self.api.create_event(&payload).await?, false),
        };

        let draft_removed = self.discard_draft(&context).await?;
        state.mark_submitted();
        info!(
            "{} event {} from {}",
            if updated { "Updated" } else { "Created" },
            event.id,
            context.draft_key()
        );

        Ok(SubmitResult {
            event,
            updated,
            draft_removed,
        })
    }

    /// Starts a debounced autosave task writing to this planner's store.
    ///
    /// Must be called from within a tokio runtime.
    pub fn autosave(&self) -> Autosave {
        Autosave::spawn(&self.db_path, self.autosave_delay)
    }
}
