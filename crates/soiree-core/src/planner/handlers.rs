//! Handler operations that return formatted wrapper types.

use super::EventPlanner;
use crate::{
    display::{DraftSummaries, EventSummaries, OperationStatus, StepProgress},
    error::Result,
    models::WizardContext,
    params::{DeleteEvent, StepQuery},
    wizard::WizardState,
};

impl EventPlanner {
    /// Handle listing remote events.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use soiree_core::EventPlannerBuilder;
    /// # async {
    /// let planner = EventPlannerBuilder::new().build().await?;
    /// let events = planner.list_events_summary().await?;
    /// println!("{events}");
    /// # Result::<(), soiree_core::PlanningError>::Ok(())
    /// # };
    /// ```
    pub async fn list_events_summary(&self) -> Result<EventSummaries> {
        Ok(EventSummaries(self.list_events().await?))
    }

    /// Handle listing local drafts.
    pub async fn list_drafts_summary(&self) -> Result<DraftSummaries> {
        Ok(DraftSummaries(self.list_drafts().await?))
    }

    /// Handle deleting an event, reporting the outcome as a status line.
    ///
    /// An unconfirmed deletion is reported as a failure rather than an
    /// error so interfaces can show it like any other result.
    pub async fn delete_event_status(&self, params: &DeleteEvent) -> Result<OperationStatus> {
        if !params.confirmed {
            return Ok(OperationStatus::failure(format!(
                "Event {} was not deleted; deletion must be confirmed",
                params.id
            )));
        }
        self.delete_event(params).await?;
        Ok(OperationStatus::success(format!("Deleted event {}", params.id)))
    }

    /// Handle discarding the draft for a session.
    pub async fn discard_draft_status(&self, context: &WizardContext) -> Result<OperationStatus> {
        Ok(if self.discard_draft(context).await? {
            OperationStatus::success(format!("Discarded draft {}", context.draft_key()))
        } else {
            OperationStatus::failure(format!("No draft stored for {}", context.draft_key()))
        })
    }

    /// Handle previewing the visible steps of a wizard without a session.
    pub fn preview_steps(&self, params: &StepQuery) -> StepProgress {
        let mut state = WizardState::new(params.context());
        state.planning_choice = params.planning_choice;
        StepProgress::from_state(&state)
    }

    /// Handle logging out, reporting the outcome as a status line.
    pub async fn logout_status(&self) -> Result<OperationStatus> {
        Ok(if self.logout().await? {
            OperationStatus::success("Logged out")
        } else {
            OperationStatus::success("No active session")
        })
    }
}
