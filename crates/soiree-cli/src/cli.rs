//! Command handlers for the terminal interface.
//!
//! Wizard commands follow one pattern: load the session (its draft, or a
//! fresh wizard when none is stored), apply a single change, save the draft
//! if anything changed, render the result.

use anyhow::{bail, Context, Result};
use soiree_core::{
    display::{OperationStatus, StepProgress, ValidationReport},
    params::{DeleteEvent, Id, RequestQuote, StepQuery},
    ApiError, EventPlanner, PlanningChoice, PlanningError, StartOrigin, WizardContext,
    WizardState, WizardStep,
};

use crate::{
    args::{
        AuthCommands, CatalogCommands, EventCommands, PickArgs, QuoteCommands, SetArgs,
        WizardCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    planner: EventPlanner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: EventPlanner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub fn show_steps(&self, query: StepQuery) -> Result<()> {
        let progress = self.planner.preview_steps(&query);
        self.renderer.render(&progress.to_string())
    }

    pub async fn handle_wizard_command(&self, command: WizardCommands) -> Result<()> {
        match command {
            WizardCommands::Start(session) => self.start(session.into()).await,
            WizardCommands::Status(session) => self.status(session.into()).await,
            WizardCommands::Set(args) => self.set(args).await,
            WizardCommands::Next(session) => {
                self.transition(session.into(), |state| state.advance())
                    .await
            }
            WizardCommands::Back(session) => {
                self.transition(session.into(), |state| Ok(state.retreat()))
                    .await
            }
            WizardCommands::Choose(args) => {
                let choice: PlanningChoice = args.choice.into();
                self.transition(args.session.into(), move |state| {
                    state.choose_planning(choice)
                })
                .await
            }
            WizardCommands::Goto(args) => {
                let step = args.step;
                self.transition(args.session.into(), move |state| state.jump_to(step))
                    .await
            }
            WizardCommands::Pick(args) => self.pick(args).await,
            WizardCommands::Submit(session) => self.submit(session.into()).await,
            WizardCommands::Discard(session) => {
                let context: WizardContext = session.into();
                let status = self.planner.discard_draft_status(&context).await?;
                self.renderer.render(&status.to_string())
            }
            WizardCommands::Drafts => {
                let drafts = self.planner.list_drafts_summary().await?;
                self.renderer.render(&drafts.to_string())
            }
        }
    }

    async fn start(&self, context: WizardContext) -> Result<()> {
        let start = self
            .planner
            .start_wizard(&context)
            .await
            .context("Failed to start the wizard")?;
        let mut state = start.state;

        let notice = match start.origin {
            StartOrigin::Fresh => "Started a new session.",
            StartOrigin::RestoredDraft => "Restored your saved draft.",
            StartOrigin::ExpiredDraft => "Your previous draft was older than a day and was discarded.",
            StartOrigin::CorruptDraft => "Your previous draft could not be read and was discarded.",
            StartOrigin::RemoteEvent => "Loaded the event for editing.",
        };
        if state.should_autosave() {
            self.planner.save_draft(&mut state).await?;
        }
        self.renderer.notice(notice);
        self.render_progress(&state)
    }

    /// Loads the session's draft, or opens the wizard afresh when none is
    /// stored.
    async fn resume(&self, context: &WizardContext) -> Result<WizardState> {
        match self.planner.resume_session(context).await {
            Ok(state) => Ok(state),
            Err(PlanningError::SessionNotFound { .. }) => {
                let start = self.planner.start_wizard(context).await.with_context(|| {
                    format!(
                        "Failed to open a session for {} / {}",
                        context.section_id, context.subsection
                    )
                })?;
                Ok(start.state)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn status(&self, context: WizardContext) -> Result<()> {
        let state = self.resume(&context).await?;
        self.render_progress(&state)?;
        self.renderer.render(&format!("\n{}", state.form))?;

        let failing = state.steps_with_errors();
        if !failing.is_empty() {
            let titles: Vec<&str> = failing.iter().map(|step| step.title()).collect();
            self.renderer
                .render(&format!("\n- ⚠ Incomplete: {}\n", titles.join(", ")))?;
        }
        Ok(())
    }

    async fn set(&self, args: SetArgs) -> Result<()> {
        let context: WizardContext = args.session.into();
        let mut state = self.resume(&context).await?;

        for assignment in &args.assignments {
            if let Err(e) = state.set_field(&assignment.field, &assignment.value) {
                self.save_if_dirty(&mut state).await?;
                return Err(e.into());
            }
        }
        self.save_if_dirty(&mut state).await?;

        let fields: Vec<&str> = args.assignments.iter().map(|a| a.field.as_str()).collect();
        self.renderer.render(
            &OperationStatus::success(format!("Updated {}", fields.join(", "))).to_string(),
        )
    }

    async fn pick(&self, args: PickArgs) -> Result<()> {
        let context: WizardContext = args.session.into();
        let mut state = self.resume(&context).await?;
        let venues: Vec<_> = args.venues.into_iter().map(|p| p.0).collect();
        let vendors: Vec<_> = args.vendors.into_iter().map(|p| p.0).collect();

        state.edit_selections(|selections| {
            if args.replace {
                selections.venues.clear();
                selections.vendors.clear();
            }
            for venue in venues {
                if !selections.venues.iter().any(|v| v.id == venue.id) {
                    selections.venues.push(venue);
                }
            }
            for vendor in vendors {
                if !selections.vendors.iter().any(|v| v.id == vendor.id) {
                    selections.vendors.push(vendor);
                }
            }
        });
        self.save_if_dirty(&mut state).await?;

        self.renderer.render(
            &OperationStatus::success(format!(
                "{} venues and {} vendors picked",
                state.selections.venues.len(),
                state.selections.vendors.len()
            ))
            .to_string(),
        )
    }

    /// Applies a transition, saves and shows where the session stands.
    async fn transition<F>(&self, context: WizardContext, apply: F) -> Result<()>
    where
        F: FnOnce(&mut WizardState) -> soiree_core::Result<WizardStep>,
    {
        let mut state = self.resume(&context).await?;
        let outcome = apply(&mut state);
        self.save_if_dirty(&mut state).await?;

        match outcome {
            Ok(_) => self.render_progress(&state),
            Err(e) => self.report(e),
        }
    }

    async fn submit(&self, context: WizardContext) -> Result<()> {
        let mut state = self.resume(&context).await?;
        match self.planner.submit(&mut state).await {
            Ok(result) => self.renderer.render(&result.to_string()),
            Err(e) => {
                self.save_if_dirty(&mut state).await?;
                self.report(e)
            }
        }
    }

    /// The end-of-command save standing in for the page-unload save.
    async fn save_if_dirty(&self, state: &mut WizardState) -> Result<()> {
        if state.is_dirty && !state.is_complete() {
            self.planner
                .save_draft(state)
                .await
                .context("Failed to save the draft")?;
        }
        Ok(())
    }

    fn render_progress(&self, state: &WizardState) -> Result<()> {
        self.renderer
            .render(&StepProgress::from_state(state).to_string())
    }

    /// Shows validation failures in full; other errors propagate.
    fn report(&self, error: PlanningError) -> Result<()> {
        if let PlanningError::Validation { step, errors } = &error {
            self.renderer
                .render(&ValidationReport::new(*step, errors).to_string())?;
            bail!("Please fix the fields above before continuing");
        }
        Err(error.into())
    }

    /// Points the user at `auth login` when the backend rejected the session.
    pub fn suggest_login(&self, error: &anyhow::Error) {
        if needs_login(error) {
            self.renderer.notice("Run `soiree auth login` to sign in again.");
        }
    }

    pub async fn handle_event_command(&self, command: EventCommands) -> Result<()> {
        match command {
            EventCommands::List => {
                let events = self.planner.list_events_summary().await?;
                self.renderer.render(&events.to_string())
            }
            EventCommands::Show(args) => {
                let params: Id = args.into();
                let event = self.planner.get_event(&params).await?;
                self.renderer.render(&event.to_string())
            }
            EventCommands::Delete(args) => {
                let params: DeleteEvent = args.into();
                let status = self.planner.delete_event_status(&params).await?;
                self.renderer.render(&status.to_string())?;
                if !status.success {
                    bail!("Use --confirm to delete event {}", params.id);
                }
                Ok(())
            }
        }
    }

    pub async fn handle_quote_command(&self, command: QuoteCommands) -> Result<()> {
        match command {
            QuoteCommands::Request(args) => {
                let params: RequestQuote = args.into();
                match self.planner.request_quote(&params).await {
                    Ok(receipt) => self.renderer.render(&receipt.to_string()),
                    Err(e) => self.report(e),
                }
            }
        }
    }

    pub async fn handle_auth_command(&self, command: AuthCommands) -> Result<()> {
        match command {
            AuthCommands::Login(args) => {
                self.planner
                    .login(&args.into())
                    .await
                    .context("Login failed")?;
                self.renderer
                    .render(&OperationStatus::success("Logged in").to_string())
            }
            AuthCommands::Logout => {
                let status = self.planner.logout_status().await?;
                self.renderer.render(&status.to_string())
            }
        }
    }

    pub async fn handle_catalog_command(&self, command: CatalogCommands) -> Result<()> {
        let markdown = match command {
            CatalogCommands::States => bullet_list("States", self.planner.states().await),
            CatalogCommands::Cities { state } => {
                let cities = self.planner.cities(&state).await;
                bullet_list(&format!("Cities in {state}"), cities)
            }
            CatalogCommands::Traditions { event_type } => {
                let traditions = self.planner.traditions(&event_type).await;
                bullet_list(
                    "Traditions",
                    traditions
                        .into_iter()
                        .map(|t| {
                            if t.description.is_empty() {
                                t.name
                            } else {
                                format!("**{}**: {}", t.name, t.description)
                            }
                        })
                        .collect(),
                )
            }
            CatalogCommands::Requirements { event_id } => {
                let requirements = self.planner.requirements(&event_id).await;
                bullet_list(
                    "Special requirements",
                    requirements
                        .into_iter()
                        .map(|r| match r.unit {
                            Some(unit) => format!("`{}` {} (per {unit})", r.id, r.name),
                            None => format!("`{}` {}", r.id, r.name),
                        })
                        .collect(),
                )
            }
        };
        self.renderer.render(&markdown)
    }
}

/// Whether any error in the chain is an expired or rejected session.
fn needs_login(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<ApiError>()
            .or_else(|| match cause.downcast_ref::<PlanningError>() {
                Some(PlanningError::Api(api)) => Some(api),
                _ => None,
            })
            .is_some_and(ApiError::is_auth_error)
    })
}

fn bullet_list(title: &str, items: Vec<String>) -> String {
    let mut out = format!("# {title}\n\n");
    if items.is_empty() {
        out.push_str("Nothing found.\n");
    }
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
    out
}
