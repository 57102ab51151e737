//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod config_cmd;
mod entities;
mod highlight;
mod report;
mod stats;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use doclens::Config;

#[derive(Parser)]
#[command(name = "doclens")]
#[command(about = "Text statistics and entity highlighting for analyzed documents")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Document input shared by the entity-aware commands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Document result JSON (`.json`) or plain text file
    pub input: PathBuf,

    /// Entity map JSON to use instead of the document's own entities
    #[arg(short, long)]
    pub entities: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show text statistics and the most frequent words
    Stats {
        /// Document result JSON (`.json`) or plain text file
        input: PathBuf,
        /// Number of top words to show (defaults to config)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the document text with entity spans highlighted
    Highlight {
        #[command(flatten)]
        input: InputArgs,
        /// Only highlight this category
        #[arg(long)]
        category: Option<String>,
        /// Show dark-mode colors in the legend
        #[arg(long)]
        dark: bool,
        /// Output segments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize extracted entities per category
    Entities {
        #[command(flatten)]
        input: InputArgs,
        /// Entries listed per category before "+N more" (defaults to config)
        #[arg(short, long)]
        preview: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the full analysis report as JSON
    Report {
        #[command(flatten)]
        input: InputArgs,
        /// Only highlight this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref()).await;

    match cli.command {
        Commands::Stats { input, limit, json } => {
            stats::cmd_stats(&config, &input, limit, json).await
        }
        Commands::Highlight {
            input,
            category,
            dark,
            json,
        } => highlight::cmd_highlight(&config, &input, category.as_deref(), dark, json).await,
        Commands::Entities {
            input,
            preview,
            json,
        } => entities::cmd_entities(&config, &input, preview, json).await,
        Commands::Report { input, category } => {
            report::cmd_report(&config, &input, category).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&config),
        },
    }
}
