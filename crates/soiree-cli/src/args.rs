//! Command-line interface definitions using clap.
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types with `From`, so `soiree_core::params` stays free of
//! CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → EventPlanner
//! ```

use std::{path::PathBuf, str::FromStr};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use soiree_core::{
    params::{DeleteEvent, Id, Login, RequestQuote, StepQuery},
    PlanningChoice, ProviderRef, QuoteMode, WizardContext, WizardStep,
};

/// Terminal front end for the Soiree event-planning wizard
///
/// Walks through the event-creation wizard one command at a time. Every
/// wizard command loads the session's local draft, applies one change and
/// saves the draft again before exiting.
#[derive(Parser)]
#[command(version, about, name = "soiree")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/soiree/soiree.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Base URL of the backend API
    #[arg(long, global = true, env = "SOIREE_API_URL")]
    pub api_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview the steps of a wizard without starting a session
    Steps(StepsArgs),
    /// Drive a wizard session
    #[command(alias = "w")]
    Wizard {
        #[command(subcommand)]
        command: WizardCommands,
    },
    /// Manage events stored on the backend
    #[command(alias = "e")]
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Request quotes from vendors and venues
    #[command(alias = "q")]
    Quote {
        #[command(subcommand)]
        command: QuoteCommands,
    },
    /// Log in to or out of the backend
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Look up reference data
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Print the JSON schema of the event payload sent to the backend
    Schema,
}

/// Identifies a wizard session.
#[derive(ClapArgs, Clone)]
pub struct SessionArgs {
    /// Event category, e.g. social, corporate, religious
    #[arg(long)]
    pub section: String,
    /// Sub-category within the section, e.g. wedding, conference
    #[arg(long)]
    pub subsection: String,
    /// ID of the stored event to edit instead of creating a new one
    #[arg(long = "edit", value_name = "ID")]
    pub edit_event_id: Option<u64>,
}

impl From<SessionArgs> for WizardContext {
    fn from(val: SessionArgs) -> Self {
        WizardContext::new(val.section, val.subsection, val.edit_event_id)
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PlanningChoiceArg {
    Quick,
    Detailed,
}

impl From<PlanningChoiceArg> for PlanningChoice {
    fn from(val: PlanningChoiceArg) -> Self {
        match val {
            PlanningChoiceArg::Quick => PlanningChoice::Quick,
            PlanningChoiceArg::Detailed => PlanningChoice::Detailed,
        }
    }
}

/// Preview the visible steps for a category
#[derive(ClapArgs)]
pub struct StepsArgs {
    #[command(flatten)]
    pub session: SessionArgs,
    /// Planning depth to preview
    #[arg(long = "plan", value_enum)]
    pub planning_choice: Option<PlanningChoiceArg>,
}

impl From<StepsArgs> for StepQuery {
    fn from(val: StepsArgs) -> Self {
        StepQuery {
            section_id: val.session.section,
            subsection: val.session.subsection,
            edit_event_id: val.session.edit_event_id,
            planning_choice: val.planning_choice.map(Into::into),
        }
    }
}

/// Assign form fields
#[derive(ClapArgs)]
pub struct SetArgs {
    #[command(flatten)]
    pub session: SessionArgs,
    /// One or more `field=value` pairs using the camelCase field names,
    /// e.g. `eventName="Holi Bash" attendees=120`
    #[arg(required = true, value_name = "FIELD=VALUE")]
    pub assignments: Vec<Assignment>,
}

/// A `field=value` pair.
#[derive(Clone, Debug)]
pub struct Assignment {
    pub field: String,
    pub value: String,
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(format!("missing field name in '{s}'"));
        }
        Ok(Assignment {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

/// A provider given as `ID:NAME[:CATEGORY]`.
#[derive(Clone, Debug)]
pub struct ProviderArg(pub ProviderRef);

impl FromStr for ProviderArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let id = parts
            .next()
            .unwrap_or_default()
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid provider id in '{s}': {e}"))?;
        let name = parts.next().unwrap_or_default().trim().to_string();
        let category = parts.next().unwrap_or_default().trim().to_string();
        Ok(ProviderArg(ProviderRef { id, name, category }))
    }
}

fn providers(args: Vec<ProviderArg>) -> Vec<ProviderRef> {
    args.into_iter().map(|p| p.0).collect()
}

/// Choose the planning depth on the choice step
#[derive(ClapArgs)]
pub struct ChooseArgs {
    #[command(flatten)]
    pub session: SessionArgs,
    #[arg(value_enum)]
    pub choice: PlanningChoiceArg,
}

/// Jump to a step that was already reached
#[derive(ClapArgs)]
pub struct GotoArgs {
    #[command(flatten)]
    pub session: SessionArgs,
    /// Step tag, e.g. basic, location, budget
    pub step: WizardStep,
}

/// Pick venues and vendors on the quick-planning path
#[derive(ClapArgs)]
pub struct PickArgs {
    #[command(flatten)]
    pub session: SessionArgs,
    /// Venue as ID:NAME[:TYPE]; repeatable
    #[arg(long = "venue", value_name = "ID:NAME[:TYPE]")]
    pub venues: Vec<ProviderArg>,
    /// Vendor as ID:NAME[:CATEGORY]; repeatable
    #[arg(long = "vendor", value_name = "ID:NAME[:CATEGORY]")]
    pub vendors: Vec<ProviderArg>,
    /// Replace earlier picks instead of adding to them
    #[arg(long)]
    pub replace: bool,
}

#[derive(Subcommand)]
pub enum WizardCommands {
    /// Start a session, restoring a recent draft or loading the edited event
    Start(SessionArgs),
    /// Show progress and the collected details
    #[command(alias = "st")]
    Status(SessionArgs),
    /// Assign form fields
    Set(SetArgs),
    /// Validate the current step and move to the next one
    #[command(alias = "n")]
    Next(SessionArgs),
    /// Move back one step
    #[command(alias = "b")]
    Back(SessionArgs),
    /// Choose quick or detailed planning
    Choose(ChooseArgs),
    /// Jump to a step that was already reached
    Goto(GotoArgs),
    /// Pick venues and vendors
    Pick(PickArgs),
    /// Validate everything and create or update the event
    Submit(SessionArgs),
    /// Delete the session's draft
    Discard(SessionArgs),
    /// List stored drafts
    Drafts,
}

/// Show an event
#[derive(ClapArgs)]
pub struct ShowEventArgs {
    /// ID of the event to display
    pub id: u64,
}

impl From<ShowEventArgs> for Id {
    fn from(val: ShowEventArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete an event permanently
#[derive(ClapArgs)]
pub struct DeleteEventArgs {
    /// ID of the event to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteEventArgs> for DeleteEvent {
    fn from(val: DeleteEventArgs) -> Self {
        DeleteEvent {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum EventCommands {
    /// List events
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of an event
    #[command(alias = "s")]
    Show(ShowEventArgs),
    /// Delete an event permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteEventArgs),
}

#[derive(Clone, Copy, ValueEnum)]
pub enum QuoteModeArg {
    Targeted,
    Comprehensive,
}

impl From<QuoteModeArg> for QuoteMode {
    fn from(val: QuoteModeArg) -> Self {
        match val {
            QuoteModeArg::Targeted => QuoteMode::Targeted,
            QuoteModeArg::Comprehensive => QuoteMode::Comprehensive,
        }
    }
}

/// Request quotes
#[derive(ClapArgs)]
pub struct RequestQuoteArgs {
    /// Stored event to pre-fill the request from
    #[arg(long = "event", value_name = "ID")]
    pub event_id: Option<u64>,
    /// Venue as ID:NAME[:TYPE]; repeatable
    #[arg(long = "venue", value_name = "ID:NAME[:TYPE]")]
    pub venues: Vec<ProviderArg>,
    /// Vendor as ID:NAME[:CATEGORY]; repeatable
    #[arg(long = "vendor", value_name = "ID:NAME[:CATEGORY]")]
    pub vendors: Vec<ProviderArg>,
    #[arg(long, value_enum, default_value = "targeted")]
    pub mode: QuoteModeArg,
    /// Also send a targeted request to the wider vendor network
    #[arg(long)]
    pub expand: bool,
    /// Notify the picked vendors through the stored event
    #[arg(long)]
    pub notify: bool,
    #[arg(long)]
    pub client_name: Option<String>,
    #[arg(long)]
    pub client_email: Option<String>,
    #[arg(long)]
    pub client_phone: Option<String>,
    /// Event date as YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
}

impl From<RequestQuoteArgs> for RequestQuote {
    fn from(val: RequestQuoteArgs) -> Self {
        RequestQuote {
            event_id: val.event_id,
            vendors: providers(val.vendors),
            venues: providers(val.venues),
            mode: val.mode.into(),
            expand_to_network: val.expand,
            notify_vendors: val.notify,
            client_name: val.client_name,
            client_email: val.client_email,
            client_phone: val.client_phone,
            event_date: val.date,
            message: val.message,
        }
    }
}

#[derive(Subcommand)]
pub enum QuoteCommands {
    /// Send a quote request
    Request(RequestQuoteArgs),
}

/// Log in
#[derive(ClapArgs)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "SOIREE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl From<LoginArgs> for Login {
    fn from(val: LoginArgs) -> Self {
        Login {
            email: val.email,
            password: val.password,
        }
    }
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Log in and store the tokens locally
    Login(LoginArgs),
    /// Forget the stored tokens
    Logout,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List states
    States,
    /// List cities of a state
    Cities {
        state: String,
    },
    /// List traditions for an event type
    Traditions {
        #[arg(long, default_value = "wedding")]
        event_type: String,
    },
    /// List special requirements for an event category
    Requirements {
        #[arg(long, default_value = "wedding")]
        event_id: String,
    },
}
