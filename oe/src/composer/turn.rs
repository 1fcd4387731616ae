//! Turn types and clarification replay
//!
//! A clarification is a paused decision. When the next message arrives it
//! is first read as an answer to the parked question; the replay logic
//! turns a recognized answer back into engine inputs (or directly into a
//! mutation plan). An unrecognized answer means the user moved on - last
//! request wins and the pending question is dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{RequestClassification, RequestKind};
use crate::compat::CompatReport;
use crate::domain::{GarmentItem, GarmentSpec, OutfitState};
use crate::engine::{ClarificationKind, DecisionResult};

/// External input surface: one conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    pub conversation_id: String,

    /// The user's styling request
    pub message: String,

    /// Authoritative list of currently worn garments
    #[serde(default)]
    pub current_items: Vec<GarmentSpec>,

    /// Newly resolved candidate garments from the product resolver
    #[serde(default)]
    pub candidate_items: Vec<GarmentSpec>,

    /// Garments from the original reference snapshot, for restoration
    #[serde(default)]
    pub baseline_items: Option<Vec<GarmentSpec>>,

    /// Recent conversation turns, oldest first (classifier context)
    #[serde(default)]
    pub history: Vec<String>,

    /// Caller-assigned turn sequence for last-write-wins; allocated
    /// automatically when absent
    #[serde(default)]
    pub turn_seq: Option<u64>,
}

/// Everything the caller gets back from one turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub decision: DecisionResult,
    pub response_text: String,
    /// Outfit snapshot after the turn (unchanged unless the decision executed)
    pub outfit: OutfitState,
    /// Present when the engine paused on a question; the caller persists it
    /// and the engine replays it verbatim on the next turn
    pub clarification: Option<ClarificationContext>,
    pub compat: Vec<CompatReport>,
    /// True when a newer turn was observed first; nothing was mutated
    pub superseded: bool,
}

/// A paused decision, parked in the session until answered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarificationContext {
    pub conversation_id: String,
    pub kind: ClarificationKind,
    pub question: String,
    pub options: Vec<String>,
    /// Candidates retained for replay
    pub pending_add: Vec<GarmentItem>,
    /// Removals retained for replay (approval flows)
    pub pending_remove: Vec<GarmentItem>,
    pub original_message: String,
    pub created_at: DateTime<Utc>,
}

/// What an answered clarification turns into
#[derive(Debug, Clone)]
pub enum Replay {
    /// Re-enter the engine with a synthetic classification and candidates
    Reroute {
        classification: RequestClassification,
        candidates: Vec<GarmentItem>,
    },
    /// The answer fully determines the mutation
    Direct(DecisionResult),
    /// The user declined the pending action; acknowledge without mutating
    Dismissed,
}

/// Affirmations recognized for approval-style questions
const AFFIRMATIVE: &[&str] = &[
    "yes",
    "yeah",
    "yep",
    "sure",
    "go ahead",
    "do it",
    "ok",
    "okay",
    "sounds good",
    "please do",
];

/// Refusals recognized for approval-style questions
const NEGATIVE: &[&str] = &["no", "nah", "nope", "keep", "cancel", "don't", "leave it"];

/// Interpret a message as the answer to a parked question
///
/// Returns None when the message doesn't address the question - the caller
/// treats it as a fresh request and the pending slot is dropped.
pub fn replay_answer(ctx: &ClarificationContext, answer: &str, worn: &[GarmentItem]) -> Option<Replay> {
    debug!(kind = ?ctx.kind, "replay_answer: called");
    match ctx.kind {
        ClarificationKind::Approval | ClarificationKind::ConfirmRemoval => {
            if is_negative(answer) {
                return Some(Replay::Dismissed);
            }
            if is_affirmative(answer) {
                let reasoning = match ctx.kind {
                    ClarificationKind::ConfirmRemoval => "removal confirmed explicitly".to_string(),
                    _ => "suggestion approved".to_string(),
                };
                return Some(Replay::Direct(DecisionResult::execute(
                    ctx.pending_add.clone(),
                    ctx.pending_remove.clone(),
                    reasoning,
                )));
            }
            None
        }

        ClarificationKind::RemovalTarget => {
            let target = resolve_option_item(ctx, answer, worn)?;
            let reasoning = format!("removing {} as chosen", target.name);
            Some(Replay::Direct(DecisionResult::execute(vec![], vec![target], reasoning)))
        }

        ClarificationKind::AttributeTarget => {
            let target = resolve_option_item(ctx, answer, worn)?;
            let reasoning = format!("replacing {} as chosen", target.name);
            Some(Replay::Direct(DecisionResult::execute(
                ctx.pending_add.clone(),
                vec![target],
                reasoning,
            )))
        }

        ClarificationKind::LayerTarget => {
            let idx = match_option(answer, &ctx.options)?;
            let chosen = &ctx.options[idx];
            if chosen.starts_with("add it as a new layer") {
                let reasoning = "adding as a new layer as chosen".to_string();
                return Some(Replay::Direct(DecisionResult::execute(
                    ctx.pending_add.clone(),
                    vec![],
                    reasoning,
                )));
            }
            let target = worn.iter().find(|i| chosen.starts_with(&i.name))?.clone();
            let reasoning = format!("replacing the {} layer as chosen", target.name);
            Some(Replay::Direct(DecisionResult::execute(
                ctx.pending_add.clone(),
                vec![target],
                reasoning,
            )))
        }

        ClarificationKind::BottomPreference => {
            let idx = match_option(answer, &ctx.options)?;
            let bottom = archetype_for(&ctx.options[idx], "jeans");
            let mut candidates = ctx.pending_add.clone();
            candidates.push(bottom);
            Some(Replay::Reroute {
                classification: RequestClassification::synthetic(RequestKind::SingleItem),
                candidates,
            })
        }

        ClarificationKind::TopPreference => {
            let idx = match_option(answer, &ctx.options)?;
            let top = archetype_for(&ctx.options[idx], "t-shirt");
            let mut candidates = ctx.pending_add.clone();
            candidates.push(top);
            Some(Replay::Reroute {
                classification: RequestClassification::synthetic(RequestKind::SingleItem),
                candidates,
            })
        }

        // A vague request stays vague; the next message is a fresh start
        ClarificationKind::Rephrase => None,
    }
}

/// Match an answer against the option list: a 1-based index, substring
/// containment in either direction, or a meaningful word shared with an
/// option ("the hoodie" -> "grey hoodie (top)")
fn match_option(answer: &str, options: &[String]) -> Option<usize> {
    let trimmed = answer.trim().to_lowercase();
    if trimmed.is_empty() {
        return None;
    }

    let numeric = trimmed.trim_end_matches(['.', ')', ':']);
    if let Ok(n) = numeric.parse::<usize>() {
        if (1..=options.len()).contains(&n) {
            return Some(n - 1);
        }
    }

    let whole = options.iter().position(|o| {
        let option = o.to_lowercase();
        option.contains(&trimmed) || trimmed.contains(&option)
    });
    if whole.is_some() {
        return whole;
    }

    options.iter().position(|o| {
        let option = o.to_lowercase();
        trimmed
            .split_whitespace()
            .filter(|w| w.len() >= 3 && !matches!(*w, "the" | "one" | "that" | "please"))
            .any(|w| option.contains(w))
    })
}

/// Resolve a chosen option back to the worn item it labels
fn resolve_option_item(ctx: &ClarificationContext, answer: &str, worn: &[GarmentItem]) -> Option<GarmentItem> {
    let idx = match_option(answer, &ctx.options)?;
    let chosen = &ctx.options[idx];
    worn.iter().find(|i| chosen.starts_with(&i.name)).cloned()
}

/// Turn a curated archetype option ("jeans", "a skirt", "you choose") into
/// a candidate garment; "you choose" takes the stylist default
fn archetype_for(option: &str, default: &str) -> GarmentItem {
    let cleaned = option.trim().trim_start_matches("a ").trim();
    if cleaned.eq_ignore_ascii_case("you choose") || cleaned.is_empty() {
        GarmentItem::new(default, default)
    } else {
        GarmentItem::new(cleaned, cleaned)
    }
}

fn is_affirmative(answer: &str) -> bool {
    let text = answer.trim().to_lowercase();
    AFFIRMATIVE.iter().any(|a| {
        if a.contains(' ') {
            text.contains(a)
        } else {
            text.split(|c: char| !c.is_alphanumeric()).any(|w| w == *a)
        }
    })
}

fn is_negative(answer: &str) -> bool {
    let text = answer.trim().to_lowercase();
    NEGATIVE.iter().any(|n| text == *n || text.starts_with(&format!("{n} ")) || text.starts_with(&format!("{n},")))
}
