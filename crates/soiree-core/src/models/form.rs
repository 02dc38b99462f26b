//! The wizard form record and its nested value types.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use jiff::{civil, tz::TimeZone, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::lenient;

/// Wire sentinel for an event whose date is not fixed yet.
pub const DATE_NOT_CONFIRMED: &str = "not-confirmed";

/// All fields collected by the wizard.
///
/// Serialized in camelCase so drafts written by the browser wizard load
/// unchanged. Missing fields fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct EventFormData {
    pub event_name: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,

    /// Expected number of guests
    #[serde(deserialize_with = "lenient::opt_u32")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<u32>"))]
    pub attendees: Option<u32>,

    /// Date and time, or the not-confirmed sentinel
    #[serde(deserialize_with = "lenient::opt_event_date_time")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub date_time: Option<EventDateTime>,

    /// Free-form duration, e.g. `"4 hours"` or `"2 days"`
    pub duration: String,

    pub state: String,
    pub city: String,
    pub venue_address: String,

    /// Budget in whole rupees
    #[serde(deserialize_with = "lenient::opt_u64")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<u64>"))]
    pub budget: Option<u64>,

    pub tradition: Option<String>,
    pub food_preferences: Vec<String>,

    /// Requirement id to the user's answer for that add-on
    #[serde(deserialize_with = "deserialize_requirements")]
    #[cfg_attr(
        feature = "schema",
        schemars(with = "BTreeMap<String, SpecialRequirement>")
    )]
    pub special_requirements: BTreeMap<String, SpecialRequirement>,

    pub selected_services: BTreeSet<String>,
    pub selected_venue_types: BTreeSet<String>,
    pub selected_vendor_services: BTreeSet<String>,

    pub timeline: Vec<TimelineItem>,

    pub description: String,
    pub additional_notes: String,
}

impl EventFormData {
    /// Applies a displayed budget range (e.g. `"₹50,000 - ₹1,00,000"`) by
    /// storing its upper bound. Returns the stored amount.
    pub fn select_budget_range(&mut self, label: &str) -> Option<u64> {
        let amount = budget_from_range(label)?;
        self.budget = Some(amount);
        Some(amount)
    }

    /// Sets a requirement as selected with an optional quantity.
    pub fn select_requirement(&mut self, id: impl Into<String>, quantity: Option<u32>) {
        let entry = self.special_requirements.entry(id.into()).or_default();
        entry.selected = true;
        if quantity.is_some() {
            entry.quantity = quantity;
        }
    }

    /// Ids of the requirements currently selected.
    pub fn selected_requirements(&self) -> impl Iterator<Item = &str> {
        self.special_requirements
            .iter()
            .filter(|(_, req)| req.selected)
            .map(|(id, _)| id.as_str())
    }
}

/// Extracts the upper bound from a displayed budget range.
///
/// Digit groups separated by commas (including Indian lakh grouping) are
/// read as one number; the last number in the label wins, so open-ended
/// labels such as `"Above ₹10,00,000"` yield their only amount.
pub fn budget_from_range(label: &str) -> Option<u64> {
    let mut numbers = Vec::new();
    let mut current = String::new();
    let mut chars = label.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if c == ',' && !current.is_empty() && chars.peek().is_some_and(char::is_ascii_digit)
        {
            continue;
        } else if !current.is_empty() {
            numbers.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        numbers.push(current);
    }

    numbers.last().and_then(|n| n.parse().ok())
}

/// Event date: either a concrete civil date-time or explicitly unconfirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDateTime {
    NotConfirmed,
    At(civil::DateTime),
}

impl EventDateTime {
    /// The concrete date-time, if confirmed.
    pub fn datetime(&self) -> Option<civil::DateTime> {
        match self {
            EventDateTime::NotConfirmed => None,
            EventDateTime::At(dt) => Some(*dt),
        }
    }
}

impl FromStr for EventDateTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == DATE_NOT_CONFIRMED {
            return Ok(EventDateTime::NotConfirmed);
        }
        if let Ok(dt) = s.parse::<civil::DateTime>() {
            return Ok(EventDateTime::At(dt));
        }
        if let Ok(date) = s.parse::<civil::Date>() {
            return Ok(EventDateTime::At(date.to_datetime(civil::Time::midnight())));
        }
        // `toISOString()` output is UTC; read it back as local wall-clock time.
        s.parse::<Timestamp>()
            .map(|ts| EventDateTime::At(ts.to_zoned(TimeZone::system()).datetime()))
            .map_err(|e| format!("Invalid event date '{s}': {e}"))
    }
}

impl fmt::Display for EventDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventDateTime::NotConfirmed => f.write_str(DATE_NOT_CONFIRMED),
            EventDateTime::At(dt) => write!(f, "{dt}"),
        }
    }
}

impl Serialize for EventDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A user's answer for one special requirement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct SpecialRequirement {
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Follow-up questions shown for this requirement
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<String>,
    /// Question to answer
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub answers: BTreeMap<String, String>,
}

impl SpecialRequirement {
    /// Normalizes any stored shape into a requirement.
    ///
    /// Accepts the structured object, a legacy plain quantity (number or
    /// numeric string, meaning "selected with this quantity") and a bare
    /// boolean. Returns `None` for shapes that carry no usable answer.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(selected) => Some(Self {
                selected: *selected,
                ..Default::default()
            }),
            Value::Number(_) | Value::String(_) => {
                let quantity = lenient::value_to_u64(value).and_then(|n| u32::try_from(n).ok())?;
                Some(Self {
                    selected: quantity > 0,
                    quantity: Some(quantity),
                    ..Default::default()
                })
            }
            Value::Object(map) => {
                let quantity = map
                    .get("quantity")
                    .and_then(lenient::value_to_u64)
                    .and_then(|n| u32::try_from(n).ok());
                let selected = map
                    .get("selected")
                    .and_then(Value::as_bool)
                    .unwrap_or_else(|| quantity.is_some_and(|q| q > 0));
                let unit = map
                    .get("unit")
                    .and_then(Value::as_str)
                    .filter(|u| !u.is_empty())
                    .map(String::from);
                let questions = map
                    .get("questions")
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|q| match q {
                                Value::String(text) => Some(text.clone()),
                                Value::Object(obj) => obj
                                    .get("question_text")
                                    .or_else(|| obj.get("text"))
                                    .and_then(Value::as_str)
                                    .map(String::from),
                                _ => None,
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                let answers = map
                    .get("answers")
                    .and_then(Value::as_object)
                    .map(|obj| {
                        obj.iter()
                            .map(|(k, v)| {
                                let text = match v {
                                    Value::String(s) => s.clone(),
                                    other => other.to_string(),
                                };
                                (k.clone(), text)
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                Some(Self {
                    selected,
                    quantity,
                    unit,
                    questions,
                    answers,
                })
            }
            Value::Null | Value::Array(_) => None,
        }
    }
}

pub(crate) fn deserialize_requirements<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, SpecialRequirement>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .iter()
        .filter_map(|(id, value)| SpecialRequirement::from_value(value).map(|r| (id.clone(), r)))
        .collect())
}

/// One entry of the day's schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct TimelineItem {
    /// Clock time, e.g. `"18:30"`
    pub time: String,
    pub activity: String,
    pub description: String,
}

/// A concrete venue or vendor picked on the quick-planning path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct ProviderRef {
    pub id: u64,
    pub name: String,
    /// Vendor category or venue type, used for service matching
    pub category: String,
}

/// Provider picks held alongside the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct Selections {
    pub venues: Vec<ProviderRef>,
    pub vendors: Vec<ProviderRef>,
}

impl Selections {
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty() && self.vendors.is_empty()
    }
}
