//! Reference data lookups falling back to the built-in catalog.

use log::warn;

use super::EventPlanner;
use crate::{
    catalog,
    error::{PlanningError, Result},
    models::{RequirementImage, RequirementInfo, RequirementQuestion, Tradition},
};

/// Uses `fetched` unless it failed or came back empty.
fn or_fallback<T>(what: &str, fetched: Result<Vec<T>>, fallback: impl FnOnce() -> Vec<T>) -> Vec<T> {
    match fetched {
        Ok(items) if !items.is_empty() => items,
        Ok(_) => {
            warn!("Backend returned no {what}, using built-in list");
            fallback()
        }
        Err(e) => {
            warn!("Could not load {what}, using built-in list: {e}");
            fallback()
        }
    }
}

impl EventPlanner {
    pub async fn states(&self) -> Vec<String> {
        or_fallback("states", self.api.states().await, catalog::states)
    }

    pub async fn cities(&self, state: &str) -> Vec<String> {
        or_fallback("cities", self.api.cities(state).await, || {
            catalog::cities(state)
        })
    }

    pub async fn traditions(&self, event_type: &str) -> Vec<Tradition> {
        or_fallback(
            "traditions",
            self.api.traditions(event_type).await,
            catalog::traditions,
        )
    }

    /// Special requirements offered for an event category.
    pub async fn requirements(&self, event_id: &str) -> Vec<RequirementInfo> {
        or_fallback(
            "requirements",
            self.api.requirements(event_id).await,
            catalog::requirements,
        )
    }

    /// Follow-up questions of a requirement. There is no fallback.
    pub async fn requirement_questions(
        &self,
        requirement_id: &str,
    ) -> Result<Vec<RequirementQuestion>> {
        if requirement_id.trim().is_empty() {
            return Err(PlanningError::invalid_input("requirementId")
                .with_reason("requirement id cannot be empty"));
        }
        self.api.requirement_questions(requirement_id).await
    }

    /// Sample images for a requirement; empty when the backend has none or
    /// cannot be reached.
    pub async fn requirement_images(
        &self,
        requirement_name: &str,
        event_name: &str,
    ) -> Vec<RequirementImage> {
        match self
            .api
            .requirement_images(requirement_name, event_name)
            .await
        {
            Ok(images) => images,
            Err(e) => {
                warn!("Could not load images for {requirement_name}: {e}");
                Vec::new()
            }
        }
    }
}
