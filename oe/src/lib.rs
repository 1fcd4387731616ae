//! OutfitEngine - outfit composition decision engine
//!
//! Turns a free-text styling request, the wearer's current garment state,
//! and newly resolved candidate garments into a concrete mutation plan:
//! add items, remove items, ask a clarifying question, or propose a
//! transformation requiring approval.
//!
//! # Core Concepts
//!
//! - **Zones**: six mutually organizing outfit regions (top, bottom,
//!   one_piece, outerwear, footwear, accessories) drive conflict detection
//!   and layering.
//! - **Fallible oracles, typed fallbacks**: the LLM-backed classifier and
//!   state analyzer degrade to documented defaults; business code never
//!   sees their failures.
//! - **Pure decisions**: the engine and its three decision trees are pure
//!   functions - identical inputs always yield the identical plan.
//! - **One owner of state**: the composer holds the session registry
//!   (undo/redo snapshots plus one pending clarification per conversation);
//!   nothing else mutates.
//!
//! # Modules
//!
//! - [`domain`] - zones, garments, outfit snapshots
//! - [`classify`] - six-type request classification
//! - [`analyze`] - outfit enrichment and state analysis
//! - [`engine`] - decision dispatch and the three trees
//! - [`compat`] - advisory compatibility rules
//! - [`respond`] - deterministic response templating
//! - [`composer`] - per-turn orchestration and session ownership
//! - [`llm`] - language-understanding port
//! - [`repl`] - interactive styling session

pub mod analyze;
pub mod classify;
pub mod cli;
pub mod compat;
pub mod composer;
pub mod config;
pub mod domain;
pub mod engine;
pub mod llm;
pub mod prompts;
pub mod repl;
pub mod respond;

// Re-export commonly used types
pub use analyze::OutfitAnalyzer;
pub use classify::{ExtractedEntities, RequestClassification, RequestClassifier, RequestKind};
pub use compat::{CompatReport, CompatRule};
pub use composer::{ClarificationContext, Composer, TurnOutcome, TurnRequest};
pub use config::{Config, LlmConfig};
pub use domain::{GarmentItem, GarmentSpec, OutfitKind, OutfitState, Zone, zone_for_category};
pub use engine::{
    ClarificationKind, ClarificationPrompt, DecisionAction, DecisionContext, DecisionResult, decide,
};
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError};
pub use respond::ResponseGenerator;
