//! Step sequencing: which steps are visible and how the wizard moves
//! between them.

use crate::models::{PlanningChoice, WizardContext, WizardStep};

/// Sections whose events always get the tradition step.
const TRADITION_SECTIONS: &[&str] = &["social", "cultural", "religious", "festival"];

/// Subsection name fragments that also unlock the tradition step.
const TRADITION_KEYWORDS: &[&str] = &["wedding", "birthday", "party", "celebration"];

/// Sections whose events get the food step.
const FOOD_SECTIONS: &[&str] = &["social", "cultural", "religious", "festival", "corporate"];

/// Virtual and outdoor subsections where catering does not apply.
const FOOD_EXCLUDED_SUBSECTIONS: &[&str] = &[
    "virtual-event",
    "virtual-conference",
    "virtual-meetup",
    "webinar",
    "online-workshop",
    "live-stream",
    "hiking",
    "trekking",
    "camping",
    "adventure-sports",
    "marathon",
];

/// Lower-cases and joins words with hyphens so `"Birthday Party"`,
/// `"birthday_party"` and `"birthday-party"` compare equal.
fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Whether the tradition step applies to the category.
pub fn includes_tradition(section_id: &str, subsection: &str) -> bool {
    let section = normalize(section_id);
    let name = normalize(subsection);
    TRADITION_SECTIONS.contains(&section.as_str())
        || TRADITION_KEYWORDS.iter().any(|kw| name.contains(kw))
}

/// Whether the food step applies to the category.
pub fn includes_food(section_id: &str, subsection: &str) -> bool {
    let section = normalize(section_id);
    let name = normalize(subsection);
    FOOD_SECTIONS.contains(&section.as_str())
        && !FOOD_EXCLUDED_SUBSECTIONS.contains(&name.as_str())
}

/// Computes the ordered list of visible steps.
///
/// - Edit mode: `basic, location, duration, budget`, the conditional
///   `tradition` and `food`, then `requirements, timeline, review`.
/// - Create mode, quick planning: `basic, location, duration, budget,
///   thankyou, venues, vendors, review`.
/// - Create mode, detailed or unset: like edit mode with the `thankyou`
///   choice screen between `budget` and the detailed steps.
pub fn visible_steps(context: &WizardContext, choice: Option<PlanningChoice>) -> StepPlan {
    use WizardStep::*;

    let edit_mode = context.is_edit_mode();
    let mut steps = vec![Basic, Location, Duration, Budget];

    if !edit_mode {
        steps.push(Thankyou);
        if choice == Some(PlanningChoice::Quick) {
            steps.extend([Venues, Vendors, Review]);
            return StepPlan { steps, edit_mode };
        }
    }

    if includes_tradition(&context.section_id, &context.subsection) {
        steps.push(Tradition);
    }
    if includes_food(&context.section_id, &context.subsection) {
        steps.push(Food);
    }
    steps.extend([Requirements, Timeline, Review]);

    StepPlan { steps, edit_mode }
}

/// An ordered list of visible steps with the transition rules over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPlan {
    steps: Vec<WizardStep>,
    edit_mode: bool,
}

impl StepPlan {
    pub fn steps(&self) -> &[WizardStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains(&self, step: WizardStep) -> bool {
        self.steps.contains(&step)
    }

    /// Position of `step`, clamped to 0 when it is not visible.
    pub fn index_of(&self, step: WizardStep) -> usize {
        self.steps.iter().position(|s| *s == step).unwrap_or(0)
    }

    /// Completion percentage shown in the progress bar.
    pub fn progress_percent(&self, current: WizardStep) -> u8 {
        if current == WizardStep::Success || self.steps.is_empty() {
            return 100;
        }
        let position = (self.index_of(current) + 1) as f64;
        (position / self.steps.len() as f64 * 100.0).round() as u8
    }

    /// Step following `current`; stays put on the last step.
    pub fn next_after(&self, current: WizardStep) -> WizardStep {
        if !self.edit_mode && current == WizardStep::Budget {
            return WizardStep::Thankyou;
        }
        match self.steps.iter().position(|s| *s == current) {
            Some(index) if index + 1 < self.steps.len() => self.steps[index + 1],
            _ => current,
        }
    }

    /// Step preceding `current`; stays put on the first step.
    pub fn prev_before(&self, current: WizardStep) -> WizardStep {
        if current == WizardStep::Thankyou {
            return WizardStep::Budget;
        }
        match self.steps.iter().position(|s| *s == current) {
            Some(index) if index > 0 => self.steps[index - 1],
            _ => current,
        }
    }

    /// Whether `step` is the final content step.
    pub fn is_last(&self, step: WizardStep) -> bool {
        self.steps.last() == Some(&step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use WizardStep::*;

    fn create(section: &str, subsection: &str) -> WizardContext {
        WizardContext::new(section, subsection, None)
    }

    fn edit(section: &str, subsection: &str) -> WizardContext {
        WizardContext::new(section, subsection, Some(9))
    }

    #[test]
    fn test_corporate_conference_detailed() {
        let plan = visible_steps(&create("corporate", "conference"), None);
        assert_eq!(
            plan.steps(),
            &[
                Basic,
                Location,
                Duration,
                Budget,
                Thankyou,
                Food,
                Requirements,
                Timeline,
                Review
            ]
        );
    }

    #[test]
    fn test_social_wedding_includes_tradition_and_food() {
        let plan = visible_steps(&create("social", "wedding"), Some(PlanningChoice::Detailed));
        assert!(plan.contains(Tradition));
        assert!(plan.contains(Food));
        assert_eq!(plan.index_of(Tradition) + 1, plan.index_of(Food));
    }

    #[test]
    fn test_keyword_unlocks_tradition_outside_tradition_sections() {
        assert!(includes_tradition("corporate", "Office Party"));
        assert!(includes_tradition("sports", "team_celebration"));
        assert!(!includes_tradition("corporate", "product-launch"));
    }

    #[test]
    fn test_food_exclusions() {
        assert!(!includes_food("corporate", "webinar"));
        assert!(!includes_food("social", "Virtual Event"));
        assert!(includes_food("corporate", "conference"));
        assert!(!includes_food("sports", "tournament"));
    }

    #[test]
    fn test_quick_planning_path() {
        let plan = visible_steps(&create("social", "wedding"), Some(PlanningChoice::Quick));
        assert_eq!(
            plan.steps(),
            &[Basic, Location, Duration, Budget, Thankyou, Venues, Vendors, Review]
        );
    }

    #[test]
    fn test_edit_mode_never_shows_choice_or_providers() {
        for choice in [None, Some(PlanningChoice::Quick), Some(PlanningChoice::Detailed)] {
            let plan = visible_steps(&edit("social", "birthday"), choice);
            assert!(!plan.contains(Thankyou));
            assert!(!plan.contains(Venues));
            assert!(!plan.contains(Vendors));
            assert_eq!(plan.steps().first(), Some(&Basic));
            assert_eq!(plan.steps().last(), Some(&Review));
        }
    }

    #[test]
    fn test_every_combination_starts_with_basic_and_ends_with_review() {
        let sections = ["social", "cultural", "religious", "festival", "corporate", "sports", ""];
        let subsections = ["wedding", "conference", "webinar", "hiking", "birthday-party", ""];
        let choices = [None, Some(PlanningChoice::Quick), Some(PlanningChoice::Detailed)];
        for section in sections {
            for subsection in subsections {
                for choice in choices {
                    for edit_id in [None, Some(1)] {
                        let ctx = WizardContext::new(section, subsection, edit_id);
                        let plan = visible_steps(&ctx, choice);
                        assert_eq!(plan.steps().first(), Some(&Basic));
                        assert_eq!(plan.steps().last(), Some(&Review));
                    }
                }
            }
        }
    }

    #[test]
    fn test_next_after_budget_in_create_mode_goes_to_choice_screen() {
        let plan = visible_steps(&create("corporate", "conference"), None);
        assert_eq!(plan.next_after(Budget), Thankyou);
        assert_eq!(plan.next_after(Thankyou), Food);

        let edit_plan = visible_steps(&edit("corporate", "conference"), None);
        assert_eq!(edit_plan.next_after(Budget), Food);
    }

    #[test]
    fn test_next_on_last_step_is_noop() {
        let plan = visible_steps(&create("social", "wedding"), None);
        assert_eq!(plan.next_after(Review), Review);
        assert_eq!(plan.prev_before(Basic), Basic);
    }

    #[test]
    fn test_prev_from_choice_screen_returns_to_budget() {
        let plan = visible_steps(&create("social", "wedding"), Some(PlanningChoice::Quick));
        assert_eq!(plan.prev_before(Thankyou), Budget);
        assert_eq!(plan.prev_before(Venues), Thankyou);
    }

    #[test]
    fn test_index_clamps_and_progress() {
        let plan = visible_steps(&create("social", "wedding"), Some(PlanningChoice::Quick));
        assert_eq!(plan.index_of(Timeline), 0);
        assert_eq!(plan.progress_percent(Basic), 13);
        assert_eq!(plan.progress_percent(Budget), 50);
        assert_eq!(plan.progress_percent(Review), 100);
        assert_eq!(plan.progress_percent(Success), 100);
    }
}
