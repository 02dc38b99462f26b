//! Data models for the event-planning wizard.
//!
//! This module contains the domain records shared by the wizard, the draft
//! store and the API adapter. Display implementations for these models are
//! located in [`crate::display::models`] to keep data structures separate
//! from presentation.
//!
//! # Model Groups
//!
//! - **Wizard**: [`WizardStep`], [`PlanningChoice`], [`WizardContext`]
//! - **Form**: [`EventFormData`] and its nested [`SpecialRequirement`],
//!   [`TimelineItem`], [`EventDateTime`]; provider picks in [`Selections`]
//! - **Drafts**: [`DraftSnapshot`], the JSON stored in local storage
//! - **Backend**: [`EventPayload`], [`RemoteEvent`], [`FormDataBlob`],
//!   [`EventType`] and the catalog records in [`catalog`]
//!
//! The form and draft records serialize in camelCase so that drafts written
//! by the browser wizard load unchanged; backend records use snake_case.
//!
//! # Examples
//!
//! ```rust
//! use soiree_core::models::{EventDateTime, EventFormData};
//!
//! let form: EventFormData = serde_json::from_str(
//!     r#"{"eventName": "Diwali Mela", "attendees": "250", "dateTime": "not-confirmed"}"#,
//! )
//! .unwrap();
//! assert_eq!(form.attendees, Some(250));
//! assert_eq!(form.date_time, Some(EventDateTime::NotConfirmed));
//! ```

pub mod catalog;
pub mod context;
pub mod draft;
pub mod event;
pub mod form;
pub(crate) mod lenient;
pub mod step;


pub use catalog::{RequirementImage, RequirementInfo, RequirementQuestion, Tradition};
pub use context::WizardContext;
pub use draft::{DraftSnapshot, DRAFT_MAX_AGE};
pub use event::{EventPayload, EventType, FormDataBlob, RemoteEvent, FORM_DATA_SCHEMA_VERSION};
pub use form::{
    budget_from_range, EventDateTime, EventFormData, ProviderRef, Selections,
    SpecialRequirement, TimelineItem, DATE_NOT_CONFIRMED,
};
pub use step::{PlanningChoice, WizardStep};
