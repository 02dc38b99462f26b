//! The event-creation wizard: step sequencing, field validation and the
//! session state machine.
//!
//! Everything in this module is pure. Persistence and network calls live in
//! [`crate::db`], [`crate::autosave`] and [`crate::planner`].
//!
//! # Examples
//!
//! ```rust
//! use soiree_core::{PlanningChoice, WizardContext, WizardStep};
//! use soiree_core::wizard::visible_steps;
//!
//! let context = WizardContext::new("social", "wedding", None);
//! let plan = visible_steps(&context, Some(PlanningChoice::Quick));
//! assert_eq!(plan.steps().last(), Some(&WizardStep::Review));
//! assert!(plan.contains(WizardStep::Venues));
//! ```

pub mod sequencer;
pub mod state;
pub mod validation;

pub use sequencer::{includes_food, includes_tradition, visible_steps, StepPlan};
pub use state::{WizardAction, WizardState};
pub use validation::{step_has_errors, validate_all, validate_step, FieldErrors, GATED_STEPS};
