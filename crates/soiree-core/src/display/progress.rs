//! Progress bar and validation feedback for a wizard session.

use std::fmt;

use jiff::Timestamp;

use super::datetime::LocalDateTime;
use crate::{
    models::{PlanningChoice, WizardContext, WizardStep},
    wizard::{FieldErrors, WizardState},
};

/// How a step is drawn in the progress list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMarker {
    Completed,
    Current,
    Pending,
    /// Fails validation right now, visited or not
    Failing,
}

impl StepMarker {
    pub fn icon(&self) -> &'static str {
        match self {
            StepMarker::Completed => "✓",
            StepMarker::Current => "➤",
            StepMarker::Pending => "○",
            StepMarker::Failing => "⚠",
        }
    }
}

/// Snapshot of a session's position for display.
///
/// ```rust
/// use soiree_core::{StepProgress, WizardContext, WizardState};
///
/// let state = WizardState::new(WizardContext::new("corporate", "conference", None));
/// let output = StepProgress::from_state(&state).to_string();
/// assert!(output.contains("➤ **Basic Details**"));
/// assert!(output.contains("(11%)"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StepProgress {
    pub context: WizardContext,
    pub planning_choice: Option<PlanningChoice>,
    pub current: WizardStep,
    pub percent: u8,
    pub steps: Vec<(WizardStep, StepMarker)>,
    pub last_saved: Option<Timestamp>,
    pub unsaved_changes: bool,
}

impl StepProgress {
    pub fn from_state(state: &WizardState) -> Self {
        let steps = state
            .plan()
            .steps()
            .iter()
            .map(|step| {
                let marker = if *step == state.current_step {
                    StepMarker::Current
                } else if state.step_has_errors(*step) {
                    StepMarker::Failing
                } else if state.completed_steps.contains(step) {
                    StepMarker::Completed
                } else {
                    StepMarker::Pending
                };
                (*step, marker)
            })
            .collect();

        Self {
            context: state.context.clone(),
            planning_choice: state.planning_choice,
            current: state.current_step,
            percent: state.progress_percent(),
            steps,
            last_saved: state.last_saved,
            unsaved_changes: state.is_dirty,
        }
    }
}

impl fmt::Display for StepProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.context.edit_event_id {
            Some(id) => format!("editing event {id}"),
            None => "new event".to_string(),
        };
        writeln!(
            f,
            "# {} / {} ({mode})",
            self.context.section_id, self.context.subsection
        )?;
        writeln!(f)?;

        if self.current == WizardStep::Success {
            writeln!(f, "Event submitted (100%).")?;
            return Ok(());
        }

        writeln!(f, "## Progress ({}%)", self.percent)?;
        writeln!(f)?;
        for (step, marker) in &self.steps {
            if *marker == StepMarker::Current {
                writeln!(f, "- {} **{}**", marker.icon(), step.title())?;
            } else {
                writeln!(f, "- {} {}", marker.icon(), step.title())?;
            }
        }
        writeln!(f)?;

        if let Some(choice) = self.planning_choice {
            writeln!(f, "- **Planning**: {}", choice.as_str())?;
        }
        match &self.last_saved {
            Some(saved) => writeln!(f, "- **Last saved**: {}", LocalDateTime(saved))?,
            None => writeln!(f, "- **Last saved**: never")?,
        }
        if self.unsaved_changes {
            writeln!(f, "- Unsaved changes")?;
        }
        Ok(())
    }
}

/// Field errors blocking a transition or submission.
pub struct ValidationReport<'a> {
    pub step: Option<WizardStep>,
    pub errors: &'a FieldErrors,
}

impl<'a> ValidationReport<'a> {
    pub fn new(step: Option<WizardStep>, errors: &'a FieldErrors) -> Self {
        Self { step, errors }
    }
}

impl fmt::Display for ValidationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return writeln!(f, "No validation errors.");
        }
        match self.step {
            Some(step) => writeln!(f, "## {} needs attention", step.title())?,
            None => writeln!(f, "## Event details need attention")?,
        }
        writeln!(f)?;
        for (field, message) in self.errors.iter() {
            writeln!(f, "- **{field}**: {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::validate_step;

    #[test]
    fn test_markers_flag_failing_steps() {
        let mut state = WizardState::new(WizardContext::new("social", "wedding", None));
        state.edit_form(|form| {
            form.event_name = "Naming Ceremony".to_string();
            form.client_name = "Lata".to_string();
            form.client_email = "lata@example.com".to_string();
            form.client_phone = "9000000001".to_string();
            form.attendees = Some(40);
        });
        state.advance().unwrap();

        let progress = StepProgress::from_state(&state);
        assert_eq!(progress.steps[0], (WizardStep::Basic, StepMarker::Completed));
        assert_eq!(progress.steps[1], (WizardStep::Location, StepMarker::Current));
        assert_eq!(progress.steps[2], (WizardStep::Duration, StepMarker::Failing));
        assert_eq!(progress.steps[4], (WizardStep::Thankyou, StepMarker::Pending));

        let output = progress.to_string();
        assert!(output.contains("- ✓ Basic Details"));
        assert!(output.contains("- ➤ **Location**"));
        assert!(output.contains("Unsaved changes"));
    }

    #[test]
    fn test_validation_report_lists_fields() {
        let errors = validate_step(WizardStep::Budget, &Default::default());
        let output = ValidationReport::new(Some(WizardStep::Budget), &errors).to_string();
        assert!(output.contains("## Budget needs attention"));
        assert!(output.contains("- **budget**: Budget must be at least 1"));
    }
}
