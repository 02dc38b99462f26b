//! Field validation rules gating step transitions and submission.
//!
//! One rule table serves both purposes: [`validate_step`] gates the
//! "next" transition and drives the progress-bar error markers, and
//! [`validate_all`] re-runs the gated rule sets before submission.

use std::collections::BTreeMap;

use crate::models::{EventFormData, WizardStep};

/// Steps that carry required-field rules.
pub const GATED_STEPS: [WizardStep; 4] = [
    WizardStep::Basic,
    WizardStep::Location,
    WizardStep::Duration,
    WizardStep::Budget,
];

/// Field name to user-facing error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Adds every entry of `other`, keeping existing messages.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.0.entry(field).or_insert(message);
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns the errors for one step. Steps without rules never fail.
pub fn validate_step(step: WizardStep, form: &EventFormData) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match step {
        WizardStep::Basic => {
            if blank(&form.event_name) {
                errors.insert("eventName", "Event name is required");
            }
            if blank(&form.client_name) {
                errors.insert("clientName", "Client name is required");
            }
            if blank(&form.client_email) {
                errors.insert("clientEmail", "Client email is required");
            }
            if blank(&form.client_phone) {
                errors.insert("clientPhone", "Client phone is required");
            }
            if form.attendees.unwrap_or(0) < 1 {
                errors.insert("attendees", "Number of attendees must be at least 1");
            }
        }
        WizardStep::Location => {
            if blank(&form.state) || blank(&form.city) {
                errors.insert("venue", "Please select both state and city");
            }
        }
        WizardStep::Duration => {
            if form.date_time.is_none() {
                errors.insert(
                    "dateTime",
                    "Please pick a date and time or mark it as not confirmed",
                );
            }
            if blank(&form.duration) {
                errors.insert("duration", "Duration is required");
            }
        }
        WizardStep::Budget => {
            if form.budget.unwrap_or(0) < 1 {
                errors.insert("budget", "Budget must be at least 1");
            }
        }
        WizardStep::Tradition
        | WizardStep::Food
        | WizardStep::Requirements
        | WizardStep::Timeline
        | WizardStep::Thankyou
        | WizardStep::Venues
        | WizardStep::Vendors
        | WizardStep::Review
        | WizardStep::Success => {}
    }

    errors
}

/// Whether the step currently fails validation.
pub fn step_has_errors(step: WizardStep, form: &EventFormData) -> bool {
    !validate_step(step, form).is_empty()
}

/// Full-form validation run before submission.
pub fn validate_all(form: &EventFormData) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for step in GATED_STEPS {
        errors.merge(validate_step(step, form));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDateTime;

    fn complete_form() -> EventFormData {
        EventFormData {
            event_name: "Annual Offsite".to_string(),
            client_name: "Neha Rao".to_string(),
            client_email: "neha@example.com".to_string(),
            client_phone: "9876543210".to_string(),
            attendees: Some(80),
            date_time: Some(EventDateTime::NotConfirmed),
            duration: "2 days".to_string(),
            state: "Karnataka".to_string(),
            city: "Bengaluru".to_string(),
            budget: Some(500_000),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_form_passes_every_step() {
        let form = complete_form();
        for step in WizardStep::ALL {
            assert!(validate_step(step, &form).is_empty(), "{step:?}");
        }
        assert!(validate_all(&form).is_empty());
    }

    #[test]
    fn test_basic_requires_identity_and_attendees() {
        let mut form = complete_form();
        form.client_email = "   ".to_string();
        form.attendees = Some(0);

        let errors = validate_step(WizardStep::Basic, &form);
        assert_eq!(errors.field_names(), vec!["attendees", "clientEmail"]);
    }

    #[test]
    fn test_location_uses_shared_venue_key() {
        let mut form = complete_form();
        form.city.clear();
        let errors = validate_step(WizardStep::Location, &form);
        assert_eq!(errors.field_names(), vec!["venue"]);
    }

    #[test]
    fn test_duration_accepts_not_confirmed_sentinel() {
        let mut form = complete_form();
        form.date_time = None;
        assert!(validate_step(WizardStep::Duration, &form).contains("dateTime"));

        form.date_time = Some(EventDateTime::NotConfirmed);
        assert!(validate_step(WizardStep::Duration, &form).is_empty());
    }

    #[test]
    fn test_zero_budget_always_fails() {
        let mut form = complete_form();
        form.budget = Some(0);
        assert!(step_has_errors(WizardStep::Budget, &form));
        assert!(validate_all(&form).contains("budget"));
    }

    #[test]
    fn test_validate_all_merges_gated_steps() {
        let errors = validate_all(&EventFormData::default());
        for field in [
            "eventName",
            "clientName",
            "clientEmail",
            "clientPhone",
            "attendees",
            "venue",
            "dateTime",
            "duration",
            "budget",
        ] {
            assert!(errors.contains(field), "missing {field}");
        }
        assert_eq!(errors.len(), 9);
    }
}
