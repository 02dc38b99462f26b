//! Display implementations for domain models.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    EventDateTime, EventFormData, EventType, PlanningChoice, RemoteEvent, WizardStep,
};
use crate::payload::from_api_payload;
use crate::quote::QuoteMode;

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PlanningChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for QuoteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn when(date_time: Option<&EventDateTime>) -> String {
    match date_time {
        Some(EventDateTime::At(dt)) => dt.strftime("%Y-%m-%d %H:%M").to_string(),
        Some(EventDateTime::NotConfirmed) => "not confirmed".to_string(),
        None => "not set".to_string(),
    }
}

fn place(city: &str, state: &str) -> String {
    match (city.trim().is_empty(), state.trim().is_empty()) {
        (false, false) => format!("{city}, {state}"),
        (false, true) => city.to_string(),
        (true, false) => state.to_string(),
        (true, true) => "not set".to_string(),
    }
}

/// Review summary of everything collected so far.
impl fmt::Display for EventFormData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.event_name.trim().is_empty() {
            "Untitled event"
        } else {
            self.event_name.as_str()
        };
        writeln!(f, "## {name}")?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Client**: {} <{}> {}",
            self.client_name, self.client_email, self.client_phone
        )?;
        match self.attendees {
            Some(n) => writeln!(f, "- **Attendees**: {n}")?,
            None => writeln!(f, "- **Attendees**: not set")?,
        }
        writeln!(f, "- **When**: {}", when(self.date_time.as_ref()))?;
        if !self.duration.is_empty() {
            writeln!(f, "- **Duration**: {}", self.duration)?;
        }
        writeln!(f, "- **Where**: {}", place(&self.city, &self.state))?;
        if !self.venue_address.is_empty() {
            writeln!(f, "- **Address**: {}", self.venue_address)?;
        }
        match self.budget {
            Some(budget) => writeln!(f, "- **Budget**: ₹{budget}")?,
            None => writeln!(f, "- **Budget**: not set")?,
        }
        if let Some(tradition) = &self.tradition {
            writeln!(f, "- **Tradition**: {tradition}")?;
        }
        if !self.food_preferences.is_empty() {
            writeln!(f, "- **Food**: {}", self.food_preferences.join(", "))?;
        }

        let requirements: Vec<String> = self
            .special_requirements
            .iter()
            .filter(|(_, r)| r.selected)
            .map(|(id, r)| match (r.quantity, &r.unit) {
                (Some(q), Some(unit)) => format!("{id} ({q} {unit})"),
                (Some(q), None) => format!("{id} ({q})"),
                _ => id.clone(),
            })
            .collect();
        if !requirements.is_empty() {
            writeln!(f, "- **Requirements**: {}", requirements.join(", "))?;
        }

        if !self.timeline.is_empty() {
            writeln!(f)?;
            writeln!(f, "### Timeline")?;
            writeln!(f)?;
            for item in &self.timeline {
                writeln!(f, "- {} {}", item.time, item.activity)?;
            }
        }

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }
        Ok(())
    }
}

impl fmt::Display for RemoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let payload = &self.payload;
        writeln!(f, "# {}. {}", self.id, payload.event_name)?;
        writeln!(f)?;
        writeln!(f, "- Type: {}", payload.event_type)?;
        if !payload.event_category.is_empty() {
            writeln!(
                f,
                "- Category: {} / {}",
                payload.event_category, payload.event_subcategory
            )?;
        }
        if let Some(status) = &self.status {
            writeln!(f, "- Status: {status}")?;
        }
        writeln!(f, "- Services: {}", payload.services.join(", "))?;
        if let Some(created) = &self.created_at {
            writeln!(f, "- Created: {}", LocalDateTime(created))?;
        }
        if let Some(updated) = &self.updated_at {
            writeln!(f, "- Updated: {}", LocalDateTime(updated))?;
        }
        writeln!(f)?;
        write!(f, "{}", from_api_payload(payload))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil;

    use super::*;
    use crate::models::EventPayload;

    #[test]
    fn test_form_summary_lists_selected_requirements_only() {
        let mut form = EventFormData {
            event_name: "Onam Sadhya".to_string(),
            city: "Kochi".to_string(),
            date_time: Some(EventDateTime::At(civil::date(2025, 9, 5).at(12, 0, 0, 0))),
            ..Default::default()
        };
        form.select_requirement("banana-leaf-service", Some(200));
        form.special_requirements
            .entry("fireworks".to_string())
            .or_default();

        let output = form.to_string();
        assert!(output.starts_with("## Onam Sadhya"));
        assert!(output.contains("- **When**: 2025-09-05 12:00"));
        assert!(output.contains("- **Where**: Kochi"));
        assert!(output.contains("banana-leaf-service (200)"));
        assert!(!output.contains("fireworks"));
    }

    #[test]
    fn test_remote_event_header() {
        let event = RemoteEvent {
            id: 4,
            payload: EventPayload {
                event_name: "Tech Meetup".to_string(),
                event_type: EventType::Conference,
                services: vec!["general".to_string()],
                ..Default::default()
            },
            status: Some("planning".to_string()),
            created_at: None,
            updated_at: None,
        };
        let output = event.to_string();
        assert!(output.starts_with("# 4. Tech Meetup"));
        assert!(output.contains("- Type: conference"));
        assert!(output.contains("- Status: planning"));
    }
}
