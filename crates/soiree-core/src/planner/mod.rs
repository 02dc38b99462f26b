//! High-level planner API tying the wizard to storage and the backend.
//!
//! This module provides the main [`EventPlanner`] interface. The planner
//! owns no wizard state itself: callers hold a [`WizardState`] and pass it
//! in, while the planner handles everything that touches local storage or
//! the network.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │  LocalStorage   │
//! │   (handlers)    │───▶│ (wizard_ops,    │───▶│   (via db/)     │
//! │                 │    │  event_ops, ...)│───▶│   ApiClient     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!  Display wrappers        Business Logic        Persistence / HTTP
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`EventPlanner`] instances
//! - [`wizard_ops`]: Session start and resume, drafts, submission
//! - [`event_ops`]: Remote event listing, lookup and deletion
//! - [`quote_ops`]: Quote requests
//! - [`catalog_ops`]: Reference data with built-in fallbacks
//! - [`auth_ops`]: Login and logout
//! - [`handlers`]: The same operations returning display wrappers
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use soiree_core::{EventPlannerBuilder, WizardContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = EventPlannerBuilder::new()
//!     .with_api_url(Some("https://events.example.com/api"))
//!     .build()
//!     .await?;
//!
//! let context = WizardContext::new("corporate", "conference", None);
//! let mut start = planner.start_wizard(&context).await?;
//! start.state.set_field("eventName", "DevFest")?;
//! start.state.set_field("attendees", "300")?;
//! planner.save_draft(&mut start.state).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`WizardState`]: crate::wizard::WizardState

use std::{path::PathBuf, time::Duration};

use crate::api::ApiClient;

pub mod auth_ops;
pub mod builder;
pub mod catalog_ops;
pub mod event_ops;
pub mod handlers;
pub mod quote_ops;
pub mod wizard_ops;


pub use builder::EventPlannerBuilder;
pub use wizard_ops::{StartOrigin, WizardStart};

/// Main planner interface.
pub struct EventPlanner {
    pub(crate) db_path: PathBuf,
    pub(crate) api: ApiClient,
    pub(crate) autosave_delay: Duration,
}

impl EventPlanner {
    /// Creates a new planner with the specified store and API client.
    pub(crate) fn new(db_path: PathBuf, api: ApiClient, autosave_delay: Duration) -> Self {
        Self {
            db_path,
            api,
            autosave_delay,
        }
    }

    /// The backend client, for calls the planner does not wrap.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
