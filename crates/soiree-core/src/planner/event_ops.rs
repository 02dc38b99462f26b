//! Remote event operations.

use log::info;

use super::EventPlanner;
use crate::{
    error::{PlanningError, Result},
    models::RemoteEvent,
    params::{DeleteEvent, Id},
};

impl EventPlanner {
    /// Lists the events visible to the logged-in user.
    pub async fn list_events(&self) -> Result<Vec<RemoteEvent>> {
        self.api.list_events().await
    }

    /// Retrieves an event by its ID.
    pub async fn get_event(&self, params: &Id) -> Result<RemoteEvent> {
        self.api.get_event(params.id).await
    }

    /// Permanently deletes an event.
    ///
    /// This cannot be undone, so nothing is sent unless `confirmed` is set.
    pub async fn delete_event(&self, params: &DeleteEvent) -> Result<()> {
        if !params.confirmed {
            return Err(PlanningError::invalid_input("confirmed")
                .with_reason(format!("deleting event {} requires confirmation", params.id)));
        }
        self.api.delete_event(params.id).await?;
        info!("Deleted event {}", params.id);
        Ok(())
    }
}
