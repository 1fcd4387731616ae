//! End-to-end scenarios through the composer
//!
//! Each scenario drives the full pipeline (classify -> analyze -> decide ->
//! check -> respond -> session update) with a scripted language backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use outfitengine::composer::{Composer, TurnRequest};
use outfitengine::domain::GarmentSpec;
use outfitengine::engine::{ClarificationKind, DecisionAction};
use outfitengine::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError};

/// Scripted language backend: replays canned replies, then fails
struct ScriptedLlm {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedLlm {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        })
    }

    /// A backend that fails every call
    fn down() -> Arc<Self> {
        Self::new(&[])
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        match self.replies.lock().unwrap().pop_front() {
            Some(text) => Ok(CompletionResponse::text(text)),
            None => Err(LlmError::Malformed("script exhausted".to_string())),
        }
    }
}

fn spec(name: &str, category: &str) -> GarmentSpec {
    GarmentSpec {
        name: name.to_string(),
        category: category.to_string(),
        ..Default::default()
    }
}

fn request(message: &str, current: Vec<GarmentSpec>, candidates: Vec<GarmentSpec>) -> TurnRequest {
    TurnRequest {
        conversation_id: "scenario".to_string(),
        message: message.to_string(),
        current_items: current,
        candidate_items: candidates,
        baseline_items: None,
        history: vec![],
        turn_seq: None,
    }
}

fn classifier_reply(request_type: &str) -> String {
    format!(r#"{{"request_type": "{request_type}", "confidence": 0.9}}"#)
}

// Scenario 1: empty outfit, one candidate -> plain addition, no rebuild
#[tokio::test]
async fn scenario_empty_outfit_adds_candidate() {
    let llm = ScriptedLlm::new(&[&classifier_reply("single_item")]);
    let composer = Composer::new(llm).unwrap();

    let outcome = composer
        .process_turn(request("a white t-shirt", vec![], vec![spec("white t-shirt", "t-shirt")]))
        .await
        .unwrap();

    assert_eq!(outcome.decision.action, DecisionAction::Execute);
    assert_eq!(outcome.decision.items_to_add.len(), 1);
    assert_eq!(outcome.decision.items_to_add[0].name, "white t-shirt");
    assert!(outcome.decision.items_to_remove.is_empty());
    assert!(!outcome.decision.regenerate_from_scratch);
    assert_eq!(outcome.outfit.item_count(), 1);
}

// Scenario 2: separates, top candidate without layering language -> swap
#[tokio::test]
async fn scenario_separates_swaps_top() {
    let llm = ScriptedLlm::new(&[&classifier_reply("single_item")]);
    let composer = Composer::new(llm).unwrap();

    let outcome = composer
        .process_turn(request(
            "a blouse",
            vec![spec("t-shirt", "t-shirt"), spec("jeans", "jeans")],
            vec![spec("blouse", "blouse")],
        ))
        .await
        .unwrap();

    assert_eq!(outcome.decision.action, DecisionAction::Execute);
    assert_eq!(outcome.decision.items_to_remove.len(), 1);
    assert_eq!(outcome.decision.items_to_remove[0].name, "t-shirt");
    assert_eq!(outcome.decision.items_to_add[0].name, "blouse");
    assert!(outcome.decision.regenerate_from_scratch);
}

// Scenario 3: one-piece -> top with a known baseline restores the bottom
#[tokio::test]
async fn scenario_one_piece_to_top_restores_baseline_bottom() {
    let llm = ScriptedLlm::new(&[&classifier_reply("single_item")]);
    let composer = Composer::new(llm).unwrap();

    let mut req = request(
        "a crop top",
        vec![spec("sundress", "sundress")],
        vec![spec("crop top", "crop top")],
    );
    req.baseline_items = Some(vec![spec("white tee", "t-shirt"), spec("black jeans", "jeans")]);

    let outcome = composer.process_turn(req).await.unwrap();

    assert_eq!(outcome.decision.action, DecisionAction::Execute);
    let added: Vec<_> = outcome.decision.items_to_add.iter().map(|i| i.name.as_str()).collect();
    assert!(added.contains(&"crop top"));
    assert!(added.contains(&"black jeans"));
    assert_eq!(outcome.decision.items_to_remove[0].name, "sundress");
    assert!(outcome.decision.regenerate_from_scratch);
    // no question was raised
    assert!(outcome.clarification.is_none());
}

// Scenario 4: three top-equivalent layers, no layering language -> clarify
// with one option per layer plus the add-as-new-layer escape
#[tokio::test]
async fn scenario_layered_ambiguity_offers_four_options() {
    let llm = ScriptedLlm::new(&[&classifier_reply("single_item")]);
    let composer = Composer::new(llm).unwrap();

    let outcome = composer
        .process_turn(request(
            "a leather jacket",
            vec![
                spec("tee", "t-shirt"),
                spec("flannel", "flannel"),
                spec("denim jacket", "denim jacket"),
                spec("jeans", "jeans"),
            ],
            vec![spec("leather jacket", "leather jacket")],
        ))
        .await
        .unwrap();

    assert_eq!(outcome.decision.action, DecisionAction::Clarify);
    let clarification = outcome.clarification.expect("clarification context");
    assert_eq!(clarification.kind, ClarificationKind::LayerTarget);
    assert_eq!(clarification.options.len(), 4);
    // nothing merged into the outfit while the question is open
    assert_eq!(outcome.outfit.item_count(), 4);
}

// Scenario 5: removing the only worn item can never empty the outfit
#[tokio::test]
async fn scenario_unsafe_removal_clarifies() {
    let reply = r#"{"request_type": "removal", "confidence": 0.95, "garments": ["hoodie"], "removal_keywords": ["take off"]}"#;
    let llm = ScriptedLlm::new(&[reply]);
    let composer = Composer::new(llm).unwrap();

    let outcome = composer
        .process_turn(request("take off my hoodie", vec![spec("hoodie", "hoodie")], vec![]))
        .await
        .unwrap();

    assert_eq!(outcome.decision.action, DecisionAction::Clarify);
    let clarification = outcome.clarification.expect("clarification context");
    assert_eq!(clarification.kind, ClarificationKind::ConfirmRemoval);
    // outfit untouched
    assert_eq!(outcome.outfit.item_count(), 1);
}

// Scenario 5 epilogue: the explicit yes executes the confirmed removal
#[tokio::test]
async fn scenario_confirmed_removal_executes() {
    let reply = r#"{"request_type": "removal", "confidence": 0.95, "garments": ["hoodie"], "removal_keywords": ["take off"]}"#;
    let llm = ScriptedLlm::new(&[reply]);
    let composer = Composer::new(llm).unwrap();

    composer
        .process_turn(request("take off my hoodie", vec![spec("hoodie", "hoodie")], vec![]))
        .await
        .unwrap();

    let outcome = composer
        .process_turn(request("yes, remove everything", vec![spec("hoodie", "hoodie")], vec![]))
        .await
        .unwrap();

    assert_eq!(outcome.decision.action, DecisionAction::Execute);
    assert_eq!(outcome.decision.items_to_remove[0].name, "hoodie");
    assert_eq!(outcome.outfit.item_count(), 0);
}

// A dead backend degrades to the fallback classification, which still
// produces a usable (clarifying) response rather than an error
#[tokio::test]
async fn backend_outage_yields_fallback_response() {
    let composer = Composer::new(ScriptedLlm::down()).unwrap();

    let outcome = composer
        .process_turn(request(
            "a blouse",
            vec![spec("tee", "t-shirt"), spec("jeans", "jeans")],
            vec![spec("blouse", "blouse")],
        ))
        .await
        .unwrap();

    // candidates were resolved upstream, so the fallback single_item
    // classification still routes them through the separates tree
    assert_eq!(outcome.decision.action, DecisionAction::Execute);
    assert!(!outcome.response_text.is_empty());
}

// Style-mood requests are never silently executed
#[tokio::test]
async fn style_mood_round_trips_through_approval() {
    let llm = ScriptedLlm::new(&[&classifier_reply("style_mood")]);
    let composer = Composer::new(llm).unwrap();

    let outcome = composer
        .process_turn(request(
            "something breezy",
            vec![spec("tee", "t-shirt"), spec("jeans", "jeans")],
            vec![spec("sundress", "sundress")],
        ))
        .await
        .unwrap();

    assert_eq!(outcome.decision.action, DecisionAction::Suggest);
    assert!(outcome.decision.requires_approval);
    assert!(outcome.decision.regenerate_from_scratch);
    // outfit untouched until approved
    assert_eq!(outcome.outfit.item_count(), 2);

    let outcome = composer
        .process_turn(request(
            "go ahead",
            vec![spec("tee", "t-shirt"), spec("jeans", "jeans")],
            vec![],
        ))
        .await
        .unwrap();

    assert_eq!(outcome.decision.action, DecisionAction::Execute);
    assert_eq!(outcome.decision.items_to_add[0].name, "sundress");
    assert_eq!(outcome.outfit.item_count(), 1);
}
