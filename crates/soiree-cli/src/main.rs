//! Soiree CLI application.
//!
//! Terminal front end for the event-planning wizard.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use soiree_core::{EventPayload, EventPlannerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        api_url,
        timeout,
        no_color,
        command,
    } = Args::parse();

    if let Schema = command {
        let schema = schemars::schema_for!(EventPayload);
        println!(
            "{}",
            serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?
        );
        return Ok(());
    }

    let planner = EventPlannerBuilder::new()
        .with_database_path(database_file)
        .with_api_url(api_url)
        .with_timeout(Duration::from_secs(timeout))
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(planner, renderer);

    info!("Soiree started");

    let result = match command {
        Steps(args) => cli.show_steps(args.into()),
        Wizard { command } => cli.handle_wizard_command(command).await,
        Event { command } => cli.handle_event_command(command).await,
        Quote { command } => cli.handle_quote_command(command).await,
        Auth { command } => cli.handle_auth_command(command).await,
        Catalog { command } => cli.handle_catalog_command(command).await,
        Schema => Ok(()),
    };
    if let Err(e) = &result {
        cli.suggest_login(e);
    }
    result
}
