//! Parameter structures for planner operations.
//!
//! These structures are shared by every interface that drives the planner.
//! They carry only serde derives (plus `JsonSchema` behind the `schema`
//! feature); interface layers wrap them with their own derives, e.g. clap
//! argument structs converting into them via `From`.
//!
//! ```ignore
//! #[derive(Args)]
//! pub struct DeleteArgs {
//!     pub id: u64,
//!     #[arg(long)]
//!     pub yes: bool,
//! }
//!
//! impl From<DeleteArgs> for DeleteEvent {
//!     fn from(args: DeleteArgs) -> Self {
//!         DeleteEvent { id: args.id, confirmed: args.yes }
//!     }
//! }
//! ```

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{PlanningChoice, ProviderRef, WizardContext};
use crate::quote::QuoteMode;

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the remote event to operate on
    pub id: u64,
}

/// Parameters for deleting a remote event.
///
/// Deletion cannot be undone, so it only proceeds when `confirmed` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteEvent {
    pub id: u64,
    #[serde(default)]
    pub confirmed: bool,
}

/// Credentials for `POST /auth/login/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Login {
    pub email: String,
    pub password: String,
}

/// Identifies a wizard session and, optionally, a planning depth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepQuery {
    /// Event category, e.g. `social`
    pub section_id: String,
    /// Sub-category, e.g. `wedding`
    pub subsection: String,
    /// Remote event being edited
    #[serde(default)]
    pub edit_event_id: Option<u64>,
    /// `quick` or `detailed`
    #[serde(default)]
    pub planning_choice: Option<PlanningChoice>,
}

impl StepQuery {
    pub fn context(&self) -> WizardContext {
        WizardContext::new(&self.section_id, &self.subsection, self.edit_event_id)
    }
}

/// A single form field assignment, by its camelCase name.
///
/// `value` is parsed as JSON when possible and used as a plain string
/// otherwise, so `attendees=120` and `eventName=Holi Bash` both work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FieldUpdate {
    pub field: String,
    pub value: String,
}

/// Parameters for a quote request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RequestQuote {
    /// Stored event to pre-fill from
    #[serde(default)]
    pub event_id: Option<u64>,
    #[serde(default)]
    pub vendors: Vec<ProviderRef>,
    #[serde(default)]
    pub venues: Vec<ProviderRef>,
    #[serde(default)]
    pub mode: QuoteMode,
    /// Also send a targeted request to the wider network
    #[serde(default)]
    pub expand_to_network: bool,
    /// Notify the picked vendors through the stored event
    #[serde(default)]
    pub notify_vendors: bool,
    /// Overrides for the pre-filled contact details
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
