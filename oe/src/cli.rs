//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// OutfitEngine - outfit composition decision engine
#[derive(Parser)]
#[command(
    name = "oe",
    about = "Outfit composition decision engine: styling requests in, mutation plans out",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Run one styling turn through the full pipeline
    Turn {
        /// The styling request
        #[arg(short, long)]
        message: String,

        /// JSON file with the currently worn garments
        #[arg(long)]
        outfit: Option<PathBuf>,

        /// JSON file with resolved candidate garments
        #[arg(long)]
        candidates: Option<PathBuf>,

        /// JSON file with the baseline (original reference) garments
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Conversation id (generated when omitted)
        #[arg(long)]
        conversation: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Interactive styling session
    Repl {
        /// Conversation id (generated when omitted)
        #[arg(long)]
        conversation: Option<String>,
    },

    /// Print the zone classification for category text
    Zone {
        /// Category text, e.g. "denim jacket"
        #[arg(required = true)]
        categories: Vec<String>,
    },
}

/// Output format for turn results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable response text plus a decision summary
    Text,
    /// The full TurnOutcome as JSON
    Json,
}
