//! Interactive styling REPL
//!
//! Drives the composer from a terminal: each line is a styling turn, slash
//! commands poke at the session (undo/redo/state). Product resolution is an
//! external collaborator in production, so the REPL ships a naive local
//! resolver that turns recognizable garment mentions into candidates -
//! enough to exercise every decision path by hand.

use std::sync::Arc;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use uuid::Uuid;

use crate::composer::{Composer, TurnRequest};
use crate::domain::{GarmentItem, GarmentSpec, is_category_keyword};
use crate::llm::LlmClient;

/// Interactive REPL session
pub struct ReplSession {
    composer: Composer,
    conversation_id: String,
    current: Vec<GarmentItem>,
}

impl ReplSession {
    /// Create a new REPL session
    pub fn new(llm: Arc<dyn LlmClient>, conversation_id: Option<String>) -> Result<Self> {
        Ok(Self {
            composer: Composer::new(llm)?,
            conversation_id: conversation_id.unwrap_or_else(|| Uuid::now_v7().to_string()),
            current: Vec::new(),
        })
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));
            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    match input {
                        "/quit" | "/exit" => break,
                        "/help" => self.print_welcome(),
                        "/state" => self.print_state(),
                        "/reset" => {
                            self.current.clear();
                            println!("{}", "Outfit cleared.".yellow());
                        }
                        "/undo" => self.handle_undo().await,
                        "/redo" => self.handle_redo().await,
                        _ => {
                            if let Err(e) = self.process_message(input).await {
                                println!("{} {}", "error:".red(), e);
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    println!("{} {}", "error:".red(), e);
                    break;
                }
            }
        }

        println!("{}", "Bye!".bright_green());
        Ok(())
    }

    async fn process_message(&mut self, message: &str) -> Result<()> {
        let candidates = naive_resolve(message);
        let request = TurnRequest {
            conversation_id: self.conversation_id.clone(),
            message: message.to_string(),
            current_items: self.current.iter().cloned().map(Into::into).collect(),
            candidate_items: candidates,
            baseline_items: None,
            history: vec![],
            turn_seq: None,
        };

        let outcome = self.composer.process_turn(request).await?;
        if !outcome.superseded {
            self.current = outcome.outfit.all_items().into_iter().cloned().collect();
        }
        println!("{}", outcome.response_text.bright_white());
        Ok(())
    }

    async fn handle_undo(&mut self) {
        match self.composer.undo(&self.conversation_id).await {
            Ok(state) => {
                self.current = state.all_items().into_iter().cloned().collect();
                println!("{}", "Restored the previous outfit.".yellow());
                self.print_state();
            }
            Err(e) => println!("{} {}", "undo:".yellow(), e),
        }
    }

    async fn handle_redo(&mut self) {
        match self.composer.redo(&self.conversation_id).await {
            Ok(state) => {
                self.current = state.all_items().into_iter().cloned().collect();
                println!("{}", "Re-applied the undone change.".yellow());
                self.print_state();
            }
            Err(e) => println!("{} {}", "redo:".yellow(), e),
        }
    }

    fn print_state(&self) {
        if self.current.is_empty() {
            println!("{}", "Nothing worn yet.".dimmed());
            return;
        }
        for item in &self.current {
            println!("  {} {}", "-".dimmed(), item.display_label());
        }
    }

    fn print_welcome(&self) {
        println!("{}", "OutfitEngine styling session".bright_green().bold());
        println!("{}", "Describe what you'd like to wear. Commands:".dimmed());
        println!("{}", "  /state  show the current outfit".dimmed());
        println!("{}", "  /undo   step back one change".dimmed());
        println!("{}", "  /redo   re-apply an undone change".dimmed());
        println!("{}", "  /reset  clear the outfit".dimmed());
        println!("{}", "  /quit   leave".dimmed());
    }
}

/// Turn recognizable garment mentions into candidate specs
///
/// Scans trigrams, bigrams, then single words against the category table,
/// consuming matched words so "crop top" doesn't also yield "top".
pub fn naive_resolve(message: &str) -> Vec<GarmentSpec> {
    let cleaned = message.to_lowercase();
    let words: Vec<&str> = cleaned
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .collect();

    let mut used = vec![false; words.len()];
    let mut specs: Vec<GarmentSpec> = Vec::new();

    for size in (1..=3).rev() {
        if words.len() < size {
            continue;
        }
        for start in 0..=(words.len() - size) {
            if used[start..start + size].iter().any(|u| *u) {
                continue;
            }
            let phrase = words[start..start + size].join(" ");
            if is_category_keyword(&phrase) {
                for flag in &mut used[start..start + size] {
                    *flag = true;
                }
                specs.push(GarmentSpec {
                    name: phrase.clone(),
                    category: phrase,
                    ..Default::default()
                });
            }
        }
    }

    specs
}
