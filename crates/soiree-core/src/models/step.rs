//! Wizard step and planning-depth enumerations.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Type-safe enumeration of the event-creation wizard stages.
///
/// The wire representation is the lower-case tag used by the browser draft
/// format (`"basic"`, `"thankyou"`, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    /// Event name, client contact details and attendee count
    Basic,
    /// State and city of the event
    Location,
    /// Date/time and duration
    Duration,
    /// Budget selection
    Budget,
    /// Cultural or religious tradition
    Tradition,
    /// Food preferences
    Food,
    /// Special requirements (add-on services)
    Requirements,
    /// Schedule of the day
    Timeline,
    /// Planning-depth choice screen shown after the budget in create mode
    Thankyou,
    /// Venue picks (quick planning)
    Venues,
    /// Vendor picks (quick planning)
    Vendors,
    /// Final review before submission
    Review,
    /// Terminal state after a successful submission
    Success,
}

impl WizardStep {
    /// Every step tag in declaration order.
    pub const ALL: [WizardStep; 13] = [
        WizardStep::Basic,
        WizardStep::Location,
        WizardStep::Duration,
        WizardStep::Budget,
        WizardStep::Tradition,
        WizardStep::Food,
        WizardStep::Requirements,
        WizardStep::Timeline,
        WizardStep::Thankyou,
        WizardStep::Venues,
        WizardStep::Vendors,
        WizardStep::Review,
        WizardStep::Success,
    ];

    /// Wire tag of the step.
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Basic => "basic",
            WizardStep::Location => "location",
            WizardStep::Duration => "duration",
            WizardStep::Budget => "budget",
            WizardStep::Tradition => "tradition",
            WizardStep::Food => "food",
            WizardStep::Requirements => "requirements",
            WizardStep::Timeline => "timeline",
            WizardStep::Thankyou => "thankyou",
            WizardStep::Venues => "venues",
            WizardStep::Vendors => "vendors",
            WizardStep::Review => "review",
            WizardStep::Success => "success",
        }
    }

    /// Human-readable heading shown in progress displays.
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Basic => "Basic Details",
            WizardStep::Location => "Location",
            WizardStep::Duration => "Date & Duration",
            WizardStep::Budget => "Budget",
            WizardStep::Tradition => "Traditions",
            WizardStep::Food => "Food Preferences",
            WizardStep::Requirements => "Special Requirements",
            WizardStep::Timeline => "Timeline",
            WizardStep::Thankyou => "Planning Style",
            WizardStep::Venues => "Venues",
            WizardStep::Vendors => "Vendors",
            WizardStep::Review => "Review",
            WizardStep::Success => "Submitted",
        }
    }
}

impl FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        WizardStep::ALL
            .into_iter()
            .find(|step| step.as_str() == tag)
            .ok_or_else(|| format!("Invalid wizard step: {s}"))
    }
}

/// Depth of planning chosen on the [`WizardStep::Thankyou`] screen.
///
/// An unset choice is represented as `Option::None` and follows the detailed
/// path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum PlanningChoice {
    /// Pick venues and vendors right away, skipping the detailed steps
    Quick,
    /// Walk through traditions, food, requirements and timeline
    Detailed,
}

impl PlanningChoice {
    /// Wire tag of the choice.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanningChoice::Quick => "quick",
            PlanningChoice::Detailed => "detailed",
        }
    }
}

impl FromStr for PlanningChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(PlanningChoice::Quick),
            "detailed" => Ok(PlanningChoice::Detailed),
            _ => Err(format!("Invalid planning choice: {s}")),
        }
    }
}
