//! Core library for the Soiree event-planning wizard.
//!
//! This crate provides the business logic behind the multi-step event
//! creation wizard: the step sequencer, per-step field validation, draft
//! persistence with expiry, assembly of the backend payload, the REST API
//! adapter with token refresh, and the quote-request composer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Wizard      │    │  EventPlanner   │    │   LocalStorage  │
//! │ (steps, rules,  │───▶│ (drafts, submit,│───▶│   (SQLite k/v)  │
//! │  state machine) │    │  quotes, auth)  │───▶│   ApiClient     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`wizard`]: pure step sequencing, validation and the [`WizardState`]
//!   transitions
//! - [`db`]: the key/value store that stands in for browser local storage,
//!   including draft snapshots
//! - [`autosave`]: debounced draft saving with cancellation
//! - [`payload`]: conversion between the wizard form and the backend record
//! - [`api`]: the HTTP client for the backend REST API
//! - [`quote`]: targeted and comprehensive quote requests
//! - [`planner`]: the [`EventPlanner`] facade tying everything together
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use soiree_core::{EventPlannerBuilder, WizardContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = EventPlannerBuilder::new()
//!     .with_database_path(Some("soiree.db"))
//!     .build()
//!     .await?;
//!
//! let context = WizardContext::new("social", "wedding", None);
//! let mut start = planner.start_wizard(&context).await?;
//! start.state.edit_form(|form| form.event_name = "Asha & Vikram".to_string());
//! planner.save_draft(&mut start.state).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod autosave;
pub mod catalog;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod payload;
pub mod planner;
pub mod quote;
pub mod wizard;

// Re-export commonly used types
pub use api::{ApiClient, ApiError};
pub use autosave::Autosave;
pub use db::{DraftLoad, LocalStorage, StoredDraft};
pub use display::{
    DraftSummaries, EventSummaries, LocalDateTime, OperationStatus, StepMarker, StepProgress,
    SubmitResult, ValidationReport,
};
pub use error::{PlanningError, Result};
pub use models::{
    DraftSnapshot, EventDateTime, EventFormData, EventPayload, EventType, PlanningChoice,
    ProviderRef, RemoteEvent, Selections, SpecialRequirement, TimelineItem, WizardContext,
    WizardStep,
};
pub use payload::{from_api_payload, to_api_payload};
pub use planner::{EventPlanner, EventPlannerBuilder, StartOrigin, WizardStart};
pub use quote::{QuoteDraft, QuoteMode, QuoteReceipt, QuoteRequest};
pub use wizard::{FieldErrors, StepPlan, WizardAction, WizardState};
