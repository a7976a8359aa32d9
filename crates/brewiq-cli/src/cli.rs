use std::path::PathBuf;

use brewiq_core::models::{Theme, CUSTOM_ICONS, DEFAULT_CUSTOM_ICON};
use brewiq_core::{BrewMethod, BrewStrength, WaterUnit};
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "brewiq")]
#[command(about = "Coffee brew ratio calculator and timer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the preferences database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate coffee or water amounts
    Calc {
        #[command(subcommand)]
        command: CalcCommands,
    },
    /// List brew methods with their effective ratios
    Methods {
        /// Include methods that are not selected
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select or deselect a built-in method (at most 9 are selected)
    Toggle {
        /// Brew method, e.g. "french-press"
        method: BrewMethod,
    },
    /// Override or reset a method's ratios
    Ratio {
        #[command(subcommand)]
        command: RatioCommands,
    },
    /// Show, override, or reset a method's brew notes
    Notes {
        #[command(subcommand)]
        command: NotesCommands,
    },
    /// Manage user-defined brew methods
    Custom {
        #[command(subcommand)]
        command: CustomCommands,
    },
    /// Show or set the color theme
    Theme {
        /// New theme (light, dark, auto)
        theme: Option<Theme>,
    },
    /// Print the stored preferences record
    Prefs {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a brew countdown
    Timer {
        /// Use this method's suggested brew time
        #[arg(long, conflicts_with = "seconds")]
        method: Option<BrewMethod>,
        /// Countdown length in seconds
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Method/strength/unit selection shared by both calculations
#[derive(clap::Args, Debug, Clone)]
pub struct BrewSelection {
    /// Built-in brew method
    #[arg(long, default_value = "french-press", conflicts_with = "custom")]
    pub method: BrewMethod,
    /// Custom method id, id prefix, or name
    #[arg(long, value_name = "ID")]
    pub custom: Option<String>,
    /// Brew strength (mild, medium, bold)
    #[arg(long, default_value = "medium")]
    pub strength: BrewStrength,
    /// Water unit (ml, oz, cup)
    #[arg(long, default_value = "ml")]
    pub unit: WaterUnit,
}

#[derive(Subcommand)]
pub enum CalcCommands {
    /// Grams of coffee needed for an amount of water
    Coffee {
        /// Water amount in the selected unit
        #[arg(allow_hyphen_values = true)]
        water: String,
        #[command(flatten)]
        selection: BrewSelection,
    },
    /// Water needed for grams of coffee
    Water {
        /// Coffee amount in grams
        #[arg(allow_hyphen_values = true)]
        coffee: String,
        #[command(flatten)]
        selection: BrewSelection,
    },
}

#[derive(Subcommand)]
pub enum RatioCommands {
    /// Override the mild/medium/bold ratios for a method
    Set {
        method: BrewMethod,
        mild: String,
        medium: String,
        bold: String,
    },
    /// Go back to the built-in ratios
    Clear { method: BrewMethod },
}

#[derive(Subcommand)]
pub enum NotesCommands {
    /// Print the effective brew notes
    Show { method: BrewMethod },
    /// Replace the brew notes for a method
    Set {
        method: BrewMethod,
        /// Notes text
        text: Vec<String>,
    },
    /// Go back to the built-in notes
    Clear { method: BrewMethod },
}

#[derive(Subcommand)]
pub enum CustomCommands {
    /// Add a custom method
    Add {
        /// Display name (1 to 15 characters)
        name: String,
        /// Icon name
        #[arg(
            long,
            default_value = DEFAULT_CUSTOM_ICON,
            value_parser = PossibleValuesParser::new(CUSTOM_ICONS)
        )]
        icon: String,
        #[arg(long, default_value = "17.0")]
        mild: String,
        #[arg(long, default_value = "16.0")]
        medium: String,
        #[arg(long, default_value = "15.0")]
        bold: String,
    },
    /// Delete a custom method
    Delete {
        /// Custom method id, id prefix, or name
        id: String,
    },
    /// List custom methods
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
