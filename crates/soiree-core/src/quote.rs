//! Quote requests to vendors and venues.
//!
//! A [`QuoteDraft`] collects the event context and the picked providers;
//! [`QuoteDraft::compose`] validates it and produces the [`QuoteRequest`]
//! body. Targeted requests go only to the picked providers unless
//! `expand_to_network` is set; comprehensive requests always go to the
//! whole network.

use std::str::FromStr;

use jiff::{civil, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlanningError, Result},
    models::{lenient, EventFormData, ProviderRef, RemoteEvent, Selections},
    payload::from_api_payload,
    wizard::FieldErrors,
};

/// Service names vendors are matched against, in display order.
pub const VENDOR_SERVICES: &[&str] = &[
    "Venue",
    "Catering",
    "Decoration",
    "Photography",
    "Videography",
    "Music & Entertainment",
    "Sound & Lighting",
    "Makeup & Styling",
    "Invitations",
    "Transportation",
];

/// Lower-case fragments and the service they indicate.
const SERVICE_KEYWORDS: &[(&str, &str)] = &[
    ("venue", "Venue"),
    ("hall", "Venue"),
    ("cater", "Catering"),
    ("food", "Catering"),
    ("cake", "Catering"),
    ("decor", "Decoration"),
    ("flor", "Decoration"),
    ("flower", "Decoration"),
    ("photo", "Photography"),
    ("video", "Videography"),
    ("film", "Videography"),
    ("music", "Music & Entertainment"),
    ("dj", "Music & Entertainment"),
    ("band", "Music & Entertainment"),
    ("entertain", "Music & Entertainment"),
    ("sound", "Sound & Lighting"),
    ("light", "Sound & Lighting"),
    ("makeup", "Makeup & Styling"),
    ("mehendi", "Makeup & Styling"),
    ("mehndi", "Makeup & Styling"),
    ("styl", "Makeup & Styling"),
    ("invitation", "Invitations"),
    ("print", "Invitations"),
    ("transport", "Transportation"),
    ("travel", "Transportation"),
];

fn services_in(text: &str) -> impl Iterator<Item = &'static str> + '_ {
    let text = text.to_lowercase();
    SERVICE_KEYWORDS
        .iter()
        .filter(move |(keyword, _)| text.contains(keyword))
        .map(|(_, service)| *service)
}

/// Candidate services for a quote, de-duplicated in vocabulary order.
///
/// Vendor categories, the event's selected services and requirements all
/// contribute; any picked venue adds `Venue`. Vendor names are ignored.
pub fn derive_services(
    event: Option<&EventFormData>,
    vendors: &[ProviderRef],
    venues: &[ProviderRef],
) -> Vec<String> {
    let mut found: Vec<&'static str> = Vec::new();

    for vendor in vendors {
        found.extend(services_in(&vendor.category));
    }
    if !venues.is_empty() {
        found.push("Venue");
    }
    if let Some(form) = event {
        for id in form
            .selected_services
            .iter()
            .chain(&form.selected_vendor_services)
            .map(String::as_str)
            .chain(form.selected_requirements())
        {
            found.extend(services_in(id));
        }
    }

    VENDOR_SERVICES
        .iter()
        .filter(|service| found.contains(service))
        .map(|service| service.to_string())
        .collect()
}

/// Who receives the quote request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    /// Only the picked providers
    #[default]
    Targeted,
    /// Every matching provider in the network
    Comprehensive,
}

impl QuoteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteMode::Targeted => "targeted",
            QuoteMode::Comprehensive => "comprehensive",
        }
    }
}

impl FromStr for QuoteMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "targeted" => Ok(QuoteMode::Targeted),
            "comprehensive" => Ok(QuoteMode::Comprehensive),
            _ => Err(format!("Invalid quote mode: {s}")),
        }
    }
}

/// A quote request being put together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteDraft {
    /// Event the request originates from; enables sending to vendors
    pub origin_event_id: Option<u64>,
    pub event_name: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub event_date: Option<civil::Date>,
    pub location: String,
    pub attendees: Option<u32>,
    pub budget: Option<u64>,
    pub vendors: Vec<ProviderRef>,
    pub venues: Vec<ProviderRef>,
    pub mode: QuoteMode,
    pub expand_to_network: bool,
    /// Also notify the picked vendors through the origin event
    pub notify_vendors: bool,
    pub message: String,
    /// Form the request was filled from, used for service matching
    pub source_form: Option<EventFormData>,
}

impl QuoteDraft {
    /// Pre-fills a draft from wizard form data and provider picks.
    pub fn from_form(form: &EventFormData, selections: &Selections) -> Self {
        let location = [form.city.trim(), form.state.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            event_name: form.event_name.clone(),
            client_name: form.client_name.clone(),
            client_email: form.client_email.clone(),
            client_phone: form.client_phone.clone(),
            event_date: form
                .date_time
                .as_ref()
                .and_then(|dt| dt.datetime())
                .map(|dt| dt.date()),
            location,
            attendees: form.attendees,
            budget: form.budget,
            vendors: selections.vendors.clone(),
            venues: selections.venues.clone(),
            source_form: Some(form.clone()),
            ..Default::default()
        }
    }

    /// Pre-fills a draft from a stored event.
    pub fn from_event(event: &RemoteEvent) -> Self {
        let form = from_api_payload(&event.payload);
        let mut draft = Self::from_form(&form, &Selections::default());
        draft.origin_event_id = Some(event.id);
        draft
    }

    /// Errors blocking submission; empty when the draft can be sent.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.vendors.is_empty() && self.venues.is_empty() {
            errors.insert("providers", "Select at least one vendor or venue");
        }
        if self.client_name.trim().is_empty() {
            errors.insert("clientName", "Client name is required");
        }
        if self.client_email.trim().is_empty() {
            errors.insert("clientEmail", "Client email is required");
        }
        if self.client_phone.trim().is_empty() {
            errors.insert("clientPhone", "Client phone is required");
        }
        if self.event_date.is_none() {
            errors.insert("eventDate", "Event date is required");
        }
        errors
    }

    /// Candidate services for this draft.
    pub fn services(&self) -> Vec<String> {
        derive_services(self.source_form.as_ref(), &self.vendors, &self.venues)
    }

    /// Validates the draft and builds the request body.
    pub fn compose(&self) -> Result<QuoteRequest> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(PlanningError::Validation { step: None, errors });
        }
        let event_date = self.event_date.ok_or_else(|| {
            PlanningError::invalid_input("eventDate").with_reason("Event date is required")
        })?;

        Ok(QuoteRequest {
            event_name: self.event_name.trim().to_string(),
            client_name: self.client_name.trim().to_string(),
            client_email: self.client_email.trim().to_string(),
            client_phone: self.client_phone.trim().to_string(),
            event_date: event_date.to_string(),
            location: self.location.clone(),
            attendees: self.attendees,
            budget: self.budget,
            services: self.services(),
            quote_type: self.mode,
            expand_to_network: self.mode == QuoteMode::Comprehensive || self.expand_to_network,
            vendor_ids: self.vendors.iter().map(|v| v.id).collect(),
            venue_ids: self.venues.iter().map(|v| v.id).collect(),
            source_event: self.origin_event_id,
            message: self.message.clone(),
        })
    }
}

/// Body of `POST /quote-requests/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct QuoteRequest {
    pub event_name: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    /// `YYYY-MM-DD`
    pub event_date: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
    pub services: Vec<String>,
    pub quote_type: QuoteMode,
    pub expand_to_network: bool,
    pub vendor_ids: Vec<u64>,
    pub venue_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_event: Option<u64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Body of `POST /events/{id}/send-quotes/`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SendQuotes {
    pub vendor_ids: Vec<u64>,
    pub venue_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_request_id: Option<u64>,
}

/// The backend's answer to a quote request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuoteReceipt {
    #[serde(deserialize_with = "lenient::opt_u64")]
    pub id: Option<u64>,
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::opt_timestamp")]
    pub created_at: Option<Timestamp>,
    /// Set when the picked vendors were notified through the origin event
    #[serde(skip_deserializing)]
    pub sent_to_vendors: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDateTime;

    fn provider(id: u64, name: &str, category: &str) -> ProviderRef {
        ProviderRef {
            id,
            name: name.to_string(),
            category: category.to_string(),
        }
    }

    fn ready_draft() -> QuoteDraft {
        QuoteDraft {
            client_name: "Farah Khan".to_string(),
            client_email: "farah@example.com".to_string(),
            client_phone: "9811111111".to_string(),
            event_date: Some(civil::date(2026, 1, 20)),
            vendors: vec![provider(3, "Lens & Light Studio", "Photographer")],
            ..Default::default()
        }
    }

    #[test]
    fn test_services_follow_vocabulary_order_without_duplicates() {
        let vendors = [
            provider(1, "Shutterbug", "Wedding Photography"),
            provider(2, "Royal Caterers", "Catering"),
            provider(3, "Photo Booth Co", "photo booth"),
        ];
        let venues = [provider(9, "Lakeside Lawn", "lawn")];
        assert_eq!(
            derive_services(None, &vendors, &venues),
            vec!["Venue", "Catering", "Photography"]
        );
    }

    #[test]
    fn test_services_ignore_vendor_names() {
        let vendors = [
            provider(3, "Lens & Light Studio", "Photographer"),
            provider(4, "Sound of Spices", "Catering"),
        ];
        assert_eq!(
            derive_services(None, &vendors, &[]),
            vec!["Catering", "Photography"]
        );
    }

    #[test]
    fn test_services_from_event_selections() {
        let mut form = EventFormData::default();
        form.selected_vendor_services.insert("dj-services".to_string());
        form.select_requirement("decoration", None);
        assert_eq!(
            derive_services(Some(&form), &[], &[]),
            vec!["Decoration", "Music & Entertainment"]
        );
    }

    #[test]
    fn test_compose_requires_provider_and_identity() {
        let mut draft = ready_draft();
        draft.vendors.clear();
        draft.client_phone.clear();
        draft.event_date = None;

        let err = draft.compose().unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(
            errors.field_names(),
            vec!["clientPhone", "eventDate", "providers"]
        );
    }

    #[test]
    fn test_targeted_request_expands_only_on_request() {
        let mut draft = ready_draft();
        let request = draft.compose().unwrap();
        assert_eq!(request.quote_type, QuoteMode::Targeted);
        assert!(!request.expand_to_network);
        assert_eq!(request.vendor_ids, vec![3]);
        assert_eq!(request.event_date, "2026-01-20");
        assert_eq!(request.services, vec!["Photography"]);

        draft.expand_to_network = true;
        assert!(draft.compose().unwrap().expand_to_network);
    }

    #[test]
    fn test_comprehensive_always_expands() {
        let mut draft = ready_draft();
        draft.mode = QuoteMode::Comprehensive;
        draft.expand_to_network = false;
        let request = draft.compose().unwrap();
        assert!(request.expand_to_network);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["quote_type"], "comprehensive");
    }

    #[test]
    fn test_from_form_builds_location_and_date() {
        let form = EventFormData {
            client_name: "Dev".to_string(),
            city: "Udaipur".to_string(),
            state: "Rajasthan".to_string(),
            date_time: Some(EventDateTime::At(civil::date(2026, 3, 1).at(16, 0, 0, 0))),
            ..Default::default()
        };
        let draft = QuoteDraft::from_form(&form, &Selections::default());
        assert_eq!(draft.location, "Udaipur, Rajasthan");
        assert_eq!(draft.event_date, Some(civil::date(2026, 3, 1)));
        assert_eq!(draft.origin_event_id, None);
    }

    #[test]
    fn test_receipt_tolerates_string_id() {
        let receipt: QuoteReceipt =
            serde_json::from_str(r#"{"id": "12", "status": "pending"}"#).unwrap();
        assert_eq!(receipt.id, Some(12));
        assert!(!receipt.sent_to_vendors);
    }
}
