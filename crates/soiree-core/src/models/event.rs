//! Backend event representation: request payload and stored record.

use std::collections::BTreeMap;
use std::str::FromStr;

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{lenient, EventFormData, SpecialRequirement, TimelineItem};

/// Current version of the nested `form_data` blob.
pub const FORM_DATA_SCHEMA_VERSION: u32 = 1;

/// Constrained event type accepted by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Wedding,
    Birthday,
    Corporate,
    Conference,
    Festival,
    Religious,
    Cultural,
    Social,
    Sports,
    #[default]
    #[serde(other)]
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Wedding => "wedding",
            EventType::Birthday => "birthday",
            EventType::Corporate => "corporate",
            EventType::Conference => "conference",
            EventType::Festival => "festival",
            EventType::Religious => "religious",
            EventType::Cultural => "cultural",
            EventType::Social => "social",
            EventType::Sports => "sports",
            EventType::Other => "other",
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wedding" => Ok(EventType::Wedding),
            "birthday" => Ok(EventType::Birthday),
            "corporate" => Ok(EventType::Corporate),
            "conference" => Ok(EventType::Conference),
            "festival" => Ok(EventType::Festival),
            "religious" => Ok(EventType::Religious),
            "cultural" => Ok(EventType::Cultural),
            "social" => Ok(EventType::Social),
            "sports" => Ok(EventType::Sports),
            "other" => Ok(EventType::Other),
            _ => Err(format!("Invalid event type: {s}")),
        }
    }
}

/// Versioned copy of every raw wizard field, stored by the backend as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FormDataBlob {
    #[serde(rename = "schemaVersion", default)]
    pub schema_version: u32,
    #[serde(flatten)]
    pub fields: EventFormData,
}

/// Request body for creating or updating an event.
///
/// Every field defaults when absent so records written by older clients
/// still decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct EventPayload {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub event_name: String,
    pub event_type: EventType,
    /// Raw wizard section, e.g. `social`
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub event_category: String,
    /// Raw wizard subsection, e.g. `wedding`
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub event_subcategory: String,

    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub client_name: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub client_email: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub client_phone: String,

    /// `YYYY-MM-DD`, absent while the date is not confirmed
    pub event_date: Option<String>,
    /// `HH:MM:SS`, absent while the date is not confirmed
    pub event_time: Option<String>,
    pub date_confirmed: bool,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub duration: String,

    #[serde(deserialize_with = "lenient::u32_or_zero")]
    #[cfg_attr(feature = "schema", schemars(with = "u32"))]
    pub attendees: u32,
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    #[cfg_attr(feature = "schema", schemars(with = "u64"))]
    pub budget: u64,

    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub state: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub city: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub venue_address: String,

    pub tradition: Option<String>,
    pub food_preferences: Vec<String>,

    /// Never empty: the backend rejects events without services
    pub services: Vec<String>,

    #[serde(deserialize_with = "super::form::deserialize_requirements")]
    #[cfg_attr(
        feature = "schema",
        schemars(with = "BTreeMap<String, SpecialRequirement>")
    )]
    pub special_requirements: BTreeMap<String, SpecialRequirement>,

    /// Top-level copy of the venue type selection
    pub selected_venue_types: Vec<String>,
    /// Top-level copy of the vendor service selection
    pub selected_vendor_services: Vec<String>,

    pub timeline: Vec<TimelineItem>,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub description: String,

    #[serde(deserialize_with = "lenient_blob")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<FormDataBlob>"))]
    pub form_data: Option<FormDataBlob>,
}

/// Keeps a record readable when its stored blob is from an unknown layout.
fn lenient_blob<'de, D>(deserializer: D) -> Result<Option<FormDataBlob>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Event record as stored and returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteEvent {
    pub id: u64,
    #[serde(flatten)]
    pub payload: EventPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}
