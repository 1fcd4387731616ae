//! OutfitEngine CLI entry point

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;
use uuid::Uuid;

use outfitengine::cli::{Cli, Command, OutputFormat};
use outfitengine::composer::{Composer, TurnRequest};
use outfitengine::config::Config;
use outfitengine::domain::{GarmentSpec, zone_for_category};
use outfitengine::llm::AnthropicClient;
use outfitengine::repl::ReplSession;

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Turn {
            message,
            outfit,
            candidates,
            baseline,
            conversation,
            format,
        } => {
            cmd_turn(
                &config,
                &message,
                outfit.as_ref(),
                candidates.as_ref(),
                baseline.as_ref(),
                conversation,
                format,
            )
            .await
        }
        Command::Repl { conversation } => cmd_repl(&config, conversation).await,
        Command::Zone { categories } => {
            cmd_zone(&categories);
            Ok(())
        }
    }
}

/// Load a garment list from a JSON file, or empty when no path is given
fn load_garments(path: Option<&PathBuf>) -> Result<Vec<GarmentSpec>> {
    match path {
        Some(path) => {
            let content =
                fs::read_to_string(path).context(format!("Failed to read garment file {}", path.display()))?;
            serde_json::from_str(&content).context(format!("Failed to parse garment file {}", path.display()))
        }
        None => Ok(Vec::new()),
    }
}

async fn cmd_turn(
    config: &Config,
    message: &str,
    outfit: Option<&PathBuf>,
    candidates: Option<&PathBuf>,
    baseline: Option<&PathBuf>,
    conversation: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    config.validate()?;

    let llm = Arc::new(AnthropicClient::from_config(&config.llm)?);
    let composer = Composer::new(llm)?;

    let request = TurnRequest {
        conversation_id: conversation.unwrap_or_else(|| Uuid::now_v7().to_string()),
        message: message.to_string(),
        current_items: load_garments(outfit)?,
        candidate_items: load_garments(candidates)?,
        baseline_items: match baseline {
            Some(path) => Some(load_garments(Some(path))?),
            None => None,
        },
        history: vec![],
        turn_seq: None,
    };

    info!(conversation_id = %request.conversation_id, "processing turn");
    let outcome = composer.process_turn(request).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        OutputFormat::Text => {
            println!("{}", outcome.response_text.bright_white());
            println!();
            println!("{} {}", "action:".dimmed(), outcome.decision.action);
            if !outcome.decision.items_to_add.is_empty() {
                let names: Vec<_> = outcome.decision.items_to_add.iter().map(|i| i.name.as_str()).collect();
                println!("{} {}", "add:".dimmed(), names.join(", "));
            }
            if !outcome.decision.items_to_remove.is_empty() {
                let names: Vec<_> = outcome
                    .decision
                    .items_to_remove
                    .iter()
                    .map(|i| i.name.as_str())
                    .collect();
                println!("{} {}", "remove:".dimmed(), names.join(", "));
            }
            println!(
                "{} {}",
                "regenerate_from_scratch:".dimmed(),
                outcome.decision.regenerate_from_scratch
            );
        }
    }

    Ok(())
}

async fn cmd_repl(config: &Config, conversation: Option<String>) -> Result<()> {
    config.validate()?;
    let llm = Arc::new(AnthropicClient::from_config(&config.llm)?);
    let mut session = ReplSession::new(llm, conversation)?;
    session.run().await
}

fn cmd_zone(categories: &[String]) {
    for category in categories {
        println!("{} -> {}", category, zone_for_category(category));
    }
}
