//! The wizard state object and its transitions.

use std::collections::BTreeSet;

use jiff::Timestamp;
use serde_json::Value;

use super::{
    sequencer::{visible_steps, StepPlan},
    validation::{step_has_errors, validate_step},
};
use crate::{
    error::{PlanningError, Result},
    models::{
        DraftSnapshot, EventDateTime, EventFormData, PlanningChoice, Selections, WizardContext,
        WizardStep,
    },
};

/// A transition request, for callers that drive the wizard from events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    /// Validate the current step and move forward
    Advance,
    /// Move back one step
    Retreat,
    /// Pick the planning depth on the choice screen
    ChoosePlanning(PlanningChoice),
    /// Jump to an already reachable step
    JumpTo(WizardStep),
    /// Record a successful submission
    Submitted,
    /// Start over with an empty form
    Restart,
}

/// Everything the wizard tracks for one session.
///
/// Exactly one step is current at a time. Form edits go through
/// [`WizardState::edit_form`] so the dirty flag stays accurate for
/// autosave.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub context: WizardContext,
    pub current_step: WizardStep,
    pub completed_steps: BTreeSet<WizardStep>,
    pub planning_choice: Option<PlanningChoice>,
    pub form: EventFormData,
    pub selections: Selections,
    pub is_dirty: bool,
    pub last_saved: Option<Timestamp>,
}

impl WizardState {
    /// Fresh state at the first step.
    pub fn new(context: WizardContext) -> Self {
        Self {
            context,
            current_step: WizardStep::Basic,
            completed_steps: BTreeSet::new(),
            planning_choice: None,
            form: EventFormData::default(),
            selections: Selections::default(),
            is_dirty: false,
            last_saved: None,
        }
    }

    /// Rebuilds a state from a restored draft.
    pub fn from_draft(context: WizardContext, draft: DraftSnapshot) -> Self {
        let last_saved = draft.saved_at();
        let mut state = Self {
            context,
            current_step: draft.current_step,
            completed_steps: draft.completed_steps,
            planning_choice: draft.planning_choice,
            form: draft.form_data,
            selections: draft.selections,
            is_dirty: false,
            last_saved,
        };
        if state.current_step != WizardStep::Success && !state.plan().contains(state.current_step)
        {
            state.current_step = WizardStep::Basic;
        }
        state
    }

    /// State for editing an existing event: every gated step is already
    /// filled in, so they start out completed.
    pub fn for_edit(context: WizardContext, form: EventFormData) -> Self {
        let mut state = Self::new(context);
        state.form = form;
        let plan = state.plan();
        state.completed_steps = plan
            .steps()
            .iter()
            .copied()
            .filter(|step| !step_has_errors(*step, &state.form))
            .collect();
        state
    }

    /// Snapshot for local storage, stamped with `now`.
    pub fn to_draft(&self, now: Timestamp) -> DraftSnapshot {
        DraftSnapshot {
            form_data: self.form.clone(),
            current_step: self.current_step,
            selections: self.selections.clone(),
            planning_choice: self.planning_choice,
            completed_steps: self.completed_steps.clone(),
            timestamp: now.as_millisecond(),
        }
    }

    /// Visible steps for the current context and planning choice.
    pub fn plan(&self) -> StepPlan {
        visible_steps(&self.context, self.planning_choice)
    }

    pub fn current_index(&self) -> usize {
        self.plan().index_of(self.current_step)
    }

    pub fn progress_percent(&self) -> u8 {
        self.plan().progress_percent(self.current_step)
    }

    pub fn is_complete(&self) -> bool {
        self.current_step == WizardStep::Success
    }

    /// Autosave runs only for dirty state that has an event name.
    pub fn should_autosave(&self) -> bool {
        self.is_dirty && !self.form.event_name.trim().is_empty()
    }

    /// Mutates the form and marks the state dirty.
    pub fn edit_form<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut EventFormData),
    {
        edit(&mut self.form);
        self.is_dirty = true;
    }

    /// Assigns one form field from text, by its camelCase name.
    ///
    /// List and map fields take JSON (lists also accept comma-separated
    /// values); every other field takes the text as-is, and an empty value
    /// resets the field. Two shortcuts exist: `budgetRange` applies a
    /// displayed range and `requirement` selects `id` or `id:quantity`.
    pub fn set_field(&mut self, field: &str, raw: &str) -> Result<()> {
        let raw = raw.trim();
        match field {
            "budgetRange" => {
                let mut form = self.form.clone();
                form.select_budget_range(raw).ok_or_else(|| {
                    PlanningError::invalid_input(field)
                        .with_reason(format!("no amount found in '{raw}'"))
                })?;
                self.edit_form(|f| *f = form);
                return Ok(());
            }
            "requirement" => {
                let (id, quantity) = match raw.split_once(':') {
                    Some((id, quantity)) => {
                        let quantity = quantity.trim().parse::<u32>().map_err(|e| {
                            PlanningError::invalid_input(field).with_reason(e.to_string())
                        })?;
                        (id.trim(), Some(quantity))
                    }
                    None => (raw, None),
                };
                if id.is_empty() {
                    return Err(PlanningError::invalid_input(field)
                        .with_reason("requirement id is empty"));
                }
                self.edit_form(|f| f.select_requirement(id, quantity));
                return Ok(());
            }
            _ => {}
        }

        let mut value = serde_json::to_value(&self.form)?;
        let defaults = serde_json::to_value(EventFormData::default())?;
        let (Some(object), Some(default)) = (value.as_object_mut(), defaults.get(field)) else {
            return Err(PlanningError::invalid_input(field).with_reason("unknown form field"));
        };

        let parsed = if raw.is_empty() {
            default.clone()
        } else {
            match default {
                Value::Array(_) => serde_json::from_str::<Value>(raw)
                    .ok()
                    .filter(Value::is_array)
                    .unwrap_or_else(|| {
                        Value::Array(
                            raw.split(',')
                                .map(str::trim)
                                .filter(|item| !item.is_empty())
                                .map(|item| Value::String(item.to_string()))
                                .collect(),
                        )
                    }),
                Value::Object(_) => serde_json::from_str::<Value>(raw).map_err(|e| {
                    PlanningError::invalid_input(field).with_reason(format!("expected JSON: {e}"))
                })?,
                _ => Value::String(raw.to_string()),
            }
        };
        object.insert(field.to_string(), parsed);

        let form: EventFormData = serde_json::from_value(value)
            .map_err(|e| PlanningError::invalid_input(field).with_reason(e.to_string()))?;
        if field == "attendees" && form.attendees.is_none() && !raw.is_empty() {
            return Err(PlanningError::invalid_input(field)
                .with_reason(format!("'{raw}' is not a whole number")));
        }
        if field == "dateTime" && !raw.is_empty() {
            raw.parse::<EventDateTime>()
                .map_err(|e| PlanningError::invalid_input(field).with_reason(e))?;
        }
        if field == "budget" && form.budget.is_none() && !raw.is_empty() {
            return Err(PlanningError::invalid_input(field)
                .with_reason(format!("'{raw}' is not an amount")));
        }
        self.edit_form(|f| *f = form);
        Ok(())
    }

    /// Mutates the provider picks and marks the state dirty.
    pub fn edit_selections<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Selections),
    {
        edit(&mut self.selections);
        self.is_dirty = true;
    }

    /// Records a completed save.
    pub fn mark_saved(&mut self, at: Timestamp) {
        self.is_dirty = false;
        self.last_saved = Some(at);
    }

    /// Validates the current step and moves to the next one.
    ///
    /// Leaving the choice screen without a pick follows the detailed path.
    pub fn advance(&mut self) -> Result<WizardStep> {
        if self.is_complete() {
            return Ok(self.current_step);
        }

        let errors = validate_step(self.current_step, &self.form);
        if !errors.is_empty() {
            return Err(PlanningError::Validation {
                step: Some(self.current_step),
                errors,
            });
        }

        if self.current_step == WizardStep::Thankyou && self.planning_choice.is_none() {
            self.planning_choice = Some(PlanningChoice::Detailed);
        }

        let next = self.plan().next_after(self.current_step);
        if next != self.current_step {
            self.completed_steps.insert(self.current_step);
            self.current_step = next;
            self.is_dirty = true;
        }
        Ok(self.current_step)
    }

    /// Moves back one step.
    ///
    /// Leaving the choice screen backwards clears its completion mark and
    /// the planning choice.
    pub fn retreat(&mut self) -> WizardStep {
        if self.is_complete() {
            return self.current_step;
        }

        if self.current_step == WizardStep::Thankyou {
            self.completed_steps.remove(&WizardStep::Thankyou);
            self.planning_choice = None;
            self.current_step = WizardStep::Budget;
            self.is_dirty = true;
            return self.current_step;
        }

        let prev = self.plan().prev_before(self.current_step);
        if prev != self.current_step {
            self.current_step = prev;
            self.is_dirty = true;
        }
        self.current_step
    }

    /// Records the planning depth on the choice screen and advances.
    pub fn choose_planning(&mut self, choice: PlanningChoice) -> Result<WizardStep> {
        if self.current_step != WizardStep::Thankyou {
            return Err(PlanningError::invalid_input("planningChoice").with_reason(format!(
                "planning depth is chosen on the '{}' step, current step is '{}'",
                WizardStep::Thankyou.as_str(),
                self.current_step.as_str()
            )));
        }
        self.planning_choice = Some(choice);
        self.advance()
    }

    /// Jumps to a visible step that was completed or lies behind the
    /// current one.
    pub fn jump_to(&mut self, step: WizardStep) -> Result<WizardStep> {
        let plan = self.plan();
        let reachable = plan.contains(step)
            && (self.completed_steps.contains(&step)
                || plan.index_of(step) <= plan.index_of(self.current_step));
        if !reachable || self.is_complete() {
            return Err(PlanningError::invalid_input("step").with_reason(format!(
                "step '{}' is not reachable from '{}'",
                step.as_str(),
                self.current_step.as_str()
            )));
        }
        if step != self.current_step {
            self.current_step = step;
            self.is_dirty = true;
        }
        Ok(step)
    }

    /// Enters the terminal success state.
    pub fn mark_submitted(&mut self) {
        self.completed_steps.insert(self.current_step);
        self.current_step = WizardStep::Success;
        self.is_dirty = false;
    }

    /// Starts over at the first step with an empty form.
    pub fn restart(&mut self) {
        *self = Self::new(self.context.clone());
    }

    /// Whether `step` currently fails validation.
    pub fn step_has_errors(&self, step: WizardStep) -> bool {
        step_has_errors(step, &self.form)
    }

    /// Visible steps that currently fail validation, visited or not.
    pub fn steps_with_errors(&self) -> Vec<WizardStep> {
        self.plan()
            .steps()
            .iter()
            .copied()
            .filter(|step| self.step_has_errors(*step))
            .collect()
    }

    /// Applies a transition and returns the resulting current step.
    pub fn apply(&mut self, action: WizardAction) -> Result<WizardStep> {
        match action {
            WizardAction::Advance => self.advance(),
            WizardAction::Retreat => Ok(self.retreat()),
            WizardAction::ChoosePlanning(choice) => self.choose_planning(choice),
            WizardAction::JumpTo(step) => self.jump_to(step),
            WizardAction::Submitted => {
                self.mark_submitted();
                Ok(self.current_step)
            }
            WizardAction::Restart => {
                self.restart();
                Ok(self.current_step)
            }
        }
    }
}
