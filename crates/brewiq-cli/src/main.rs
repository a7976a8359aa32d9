//! BrewIQ CLI - coffee brew ratio calculator and timer
//!
//! Every screen of the app is reachable as a subcommand; preferences are
//! shared with the other front ends through the same local store.

mod cli;
mod commands;
mod error;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, CustomCommands, NotesCommands, RatioCommands};
use crate::commands::calc::run_calc;
use crate::commands::common::resolve_db_path;
use crate::commands::completions::run_completions;
use crate::commands::custom::{run_custom_add, run_custom_delete, run_custom_list};
use crate::commands::customize::{
    run_notes_clear, run_notes_set, run_notes_show, run_ratio_clear, run_ratio_set, run_theme,
    run_toggle,
};
use crate::commands::methods::{run_methods, run_prefs};
use crate::commands::timer::run_timer;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("brewiq=info,brewiq_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path)?;

    match cli.command {
        Commands::Calc { command } => run_calc(command, &db_path)?,
        Commands::Methods { all, json } => run_methods(all, json, &db_path)?,
        Commands::Toggle { method } => run_toggle(method, &db_path)?,
        Commands::Ratio { command } => match command {
            RatioCommands::Set {
                method,
                mild,
                medium,
                bold,
            } => run_ratio_set(method, &mild, &medium, &bold, &db_path)?,
            RatioCommands::Clear { method } => run_ratio_clear(method, &db_path)?,
        },
        Commands::Notes { command } => match command {
            NotesCommands::Show { method } => run_notes_show(method, &db_path)?,
            NotesCommands::Set { method, text } => run_notes_set(method, &text, &db_path)?,
            NotesCommands::Clear { method } => run_notes_clear(method, &db_path)?,
        },
        Commands::Custom { command } => match command {
            CustomCommands::Add {
                name,
                icon,
                mild,
                medium,
                bold,
            } => {
                let ratios = [mild.as_str(), medium.as_str(), bold.as_str()];
                run_custom_add(&name, &icon, ratios, &db_path)?;
            }
            CustomCommands::Delete { id } => run_custom_delete(&id, &db_path)?,
            CustomCommands::List { json } => run_custom_list(json, &db_path)?,
        },
        Commands::Theme { theme } => run_theme(theme, &db_path)?,
        Commands::Prefs { json } => run_prefs(json, &db_path)?,
        Commands::Timer { method, seconds } => run_timer(method, seconds).await?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
