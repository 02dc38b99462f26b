//! Conversion between the wizard form and the backend event record.

use std::collections::BTreeMap;

use jiff::civil;

use crate::models::{
    EventDateTime, EventFormData, EventPayload, EventType, FormDataBlob, SpecialRequirement,
    FORM_DATA_SCHEMA_VERSION,
};

/// Subcategory fragments mapped to backend event types. Checked first.
const SUBCATEGORY_KEYWORDS: &[(&str, EventType)] = &[
    ("wedding", EventType::Wedding),
    ("engagement", EventType::Wedding),
    ("sangeet", EventType::Wedding),
    ("reception", EventType::Wedding),
    ("birthday", EventType::Birthday),
    ("conference", EventType::Conference),
    ("seminar", EventType::Conference),
    ("summit", EventType::Conference),
    ("festival", EventType::Festival),
    ("puja", EventType::Religious),
    ("pooja", EventType::Religious),
    ("tournament", EventType::Sports),
    ("marathon", EventType::Sports),
];

/// Wizard sections mapped to backend event types.
const CATEGORY_TYPES: &[(&str, EventType)] = &[
    ("social", EventType::Social),
    ("corporate", EventType::Corporate),
    ("cultural", EventType::Cultural),
    ("religious", EventType::Religious),
    ("festival", EventType::Festival),
    ("sports", EventType::Sports),
    ("wedding", EventType::Wedding),
    ("birthday", EventType::Birthday),
    ("conference", EventType::Conference),
];

/// Service sent when the form selects nothing.
pub const DEFAULT_SERVICE: &str = "general";

/// Backend event type for a wizard category.
///
/// A keyword in the subcategory wins over the category; anything unmatched
/// maps to [`EventType::Other`].
pub fn event_type_for(category: &str, subcategory: &str) -> EventType {
    let subcategory = subcategory.trim().to_lowercase();
    if let Some((_, event_type)) = SUBCATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| subcategory.contains(keyword))
    {
        return *event_type;
    }

    let category = category.trim().to_lowercase();
    CATEGORY_TYPES
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(EventType::Other, |(_, event_type)| *event_type)
}

/// Merged, de-duplicated service identifiers; never empty.
///
/// Selected services and vendor services come first. Venue types are used
/// only when both are empty.
pub fn collect_services(form: &EventFormData) -> Vec<String> {
    let mut services: Vec<String> = Vec::new();
    let mut push = |id: &String| {
        let id = id.trim();
        if !id.is_empty() && !services.iter().any(|s| s == id) {
            services.push(id.to_string());
        }
    };

    form.selected_services.iter().for_each(&mut push);
    form.selected_vendor_services.iter().for_each(&mut push);
    if form.selected_services.is_empty() && form.selected_vendor_services.is_empty() {
        form.selected_venue_types.iter().for_each(&mut push);
    }

    if services.is_empty() {
        services.push(DEFAULT_SERVICE.to_string());
    }
    services
}

/// Keeps selected requirements only, dropping zero quantities and blank
/// answers.
pub fn normalize_requirements(
    requirements: &BTreeMap<String, SpecialRequirement>,
) -> BTreeMap<String, SpecialRequirement> {
    requirements
        .iter()
        .filter(|(_, requirement)| requirement.selected)
        .map(|(id, requirement)| {
            let normalized = SpecialRequirement {
                selected: true,
                quantity: requirement.quantity.filter(|q| *q > 0),
                unit: requirement.unit.clone().filter(|u| !u.trim().is_empty()),
                questions: requirement
                    .questions
                    .iter()
                    .filter(|q| !q.trim().is_empty())
                    .cloned()
                    .collect(),
                answers: requirement
                    .answers
                    .iter()
                    .filter(|(_, answer)| !answer.trim().is_empty())
                    .map(|(q, a)| (q.clone(), a.clone()))
                    .collect(),
            };
            (id.clone(), normalized)
        })
        .collect()
}

fn split_date_time(date_time: Option<&EventDateTime>) -> (Option<String>, Option<String>, bool) {
    match date_time.and_then(EventDateTime::datetime) {
        Some(dt) => (
            Some(dt.date().to_string()),
            Some(dt.strftime("%H:%M:%S").to_string()),
            true,
        ),
        None => (None, None, false),
    }
}

fn join_date_time(payload: &EventPayload) -> EventDateTime {
    if !payload.date_confirmed {
        return EventDateTime::NotConfirmed;
    }
    let Some(date) = payload
        .event_date
        .as_deref()
        .and_then(|d| d.trim().parse::<civil::Date>().ok())
    else {
        return EventDateTime::NotConfirmed;
    };
    let time = payload
        .event_time
        .as_deref()
        .and_then(|t| t.trim().parse::<civil::Time>().ok())
        .unwrap_or_default();
    EventDateTime::At(date.to_datetime(time))
}

/// Builds the backend record for a form within a wizard category.
pub fn to_api_payload(form: &EventFormData, category: &str, subcategory: &str) -> EventPayload {
    let (event_date, event_time, date_confirmed) = split_date_time(form.date_time.as_ref());

    EventPayload {
        event_name: form.event_name.trim().to_string(),
        event_type: event_type_for(category, subcategory),
        event_category: category.to_string(),
        event_subcategory: subcategory.to_string(),
        client_name: form.client_name.trim().to_string(),
        client_email: form.client_email.trim().to_string(),
        client_phone: form.client_phone.trim().to_string(),
        event_date,
        event_time,
        date_confirmed,
        duration: form.duration.clone(),
        attendees: form.attendees.unwrap_or_default(),
        budget: form.budget.unwrap_or_default(),
        state: form.state.clone(),
        city: form.city.clone(),
        venue_address: form.venue_address.clone(),
        tradition: form.tradition.clone().filter(|t| !t.trim().is_empty()),
        food_preferences: form.food_preferences.clone(),
        services: collect_services(form),
        special_requirements: normalize_requirements(&form.special_requirements),
        selected_venue_types: form.selected_venue_types.iter().cloned().collect(),
        selected_vendor_services: form.selected_vendor_services.iter().cloned().collect(),
        timeline: form.timeline.clone(),
        description: form.description.clone(),
        form_data: Some(FormDataBlob {
            schema_version: FORM_DATA_SCHEMA_VERSION,
            fields: form.clone(),
        }),
    }
}

fn fill(target: &mut String, source: &str) {
    if target.trim().is_empty() && !source.trim().is_empty() {
        *target = source.to_string();
    }
}

/// Rebuilds the wizard form from a stored record for the edit flow.
///
/// The nested blob is preferred; top-level fields fill whatever it lacks.
pub fn from_api_payload(payload: &EventPayload) -> EventFormData {
    let mut form = payload
        .form_data
        .as_ref()
        .map(|blob| blob.fields.clone())
        .unwrap_or_default();

    fill(&mut form.event_name, &payload.event_name);
    fill(&mut form.client_name, &payload.client_name);
    fill(&mut form.client_email, &payload.client_email);
    fill(&mut form.client_phone, &payload.client_phone);
    fill(&mut form.duration, &payload.duration);
    fill(&mut form.state, &payload.state);
    fill(&mut form.city, &payload.city);
    fill(&mut form.venue_address, &payload.venue_address);
    fill(&mut form.description, &payload.description);

    if form.attendees.is_none() && payload.attendees > 0 {
        form.attendees = Some(payload.attendees);
    }
    if form.budget.is_none() && payload.budget > 0 {
        form.budget = Some(payload.budget);
    }
    if form.date_time.is_none() {
        form.date_time = Some(join_date_time(payload));
    }
    if form.tradition.is_none() {
        form.tradition = payload.tradition.clone();
    }
    if form.food_preferences.is_empty() {
        form.food_preferences = payload.food_preferences.clone();
    }
    if form.special_requirements.is_empty() {
        form.special_requirements = payload.special_requirements.clone();
    }
    if form.selected_venue_types.is_empty() {
        form.selected_venue_types = payload.selected_venue_types.iter().cloned().collect();
    }
    if form.selected_vendor_services.is_empty() {
        form.selected_vendor_services = payload.selected_vendor_services.iter().cloned().collect();
    }
    if form.selected_services.is_empty() {
        form.selected_services = payload
            .services
            .iter()
            .filter(|s| *s != DEFAULT_SERVICE)
            .cloned()
            .collect();
    }
    if form.timeline.is_empty() {
        form.timeline = payload.timeline.clone();
    }

    form
}
