//! Composer - the per-turn orchestrator
//!
//! Owns the only mutable state in the system (the session registry) and
//! runs the full pipeline for one conversation turn: pending-clarification
//! replay, classifier and state analysis in parallel, the pure decision
//! engine, advisory compatibility checks, response templating, and finally
//! the session update - which happens only on execute, and only when the
//! turn is still the newest one for its conversation.

mod turn;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use eyre::Result;
use tracing::{debug, info, warn};

use sessionstore::{SessionError, SessionRegistry};

use crate::analyze::OutfitAnalyzer;
use crate::classify::{RequestClassifier, RequestKind};
use crate::compat;
use crate::domain::{GarmentItem, OutfitState};
use crate::engine::{self, ClarificationKind, DecisionAction, DecisionContext, DecisionResult};
use crate::llm::LlmClient;
use crate::prompts::PromptRegistry;
use crate::respond::ResponseGenerator;

pub use turn::{ClarificationContext, Replay, TurnOutcome, TurnRequest, replay_answer};

type Sessions = SessionRegistry<OutfitState, ClarificationContext>;

/// The orchestrating module; one per process, shared across conversations
pub struct Composer {
    classifier: RequestClassifier,
    analyzer: OutfitAnalyzer,
    responder: ResponseGenerator,
    /// Session state; short critical sections only
    sessions: Mutex<Sessions>,
    /// Per-conversation turn locks: turns of one conversation serialize,
    /// different conversations run fully concurrently
    turn_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl Composer {
    /// Build a composer around a language-understanding client
    pub fn new(llm: Arc<dyn LlmClient>) -> Result<Self> {
        Ok(Self {
            classifier: RequestClassifier::new(llm.clone(), PromptRegistry::new()?),
            analyzer: OutfitAnalyzer::new(llm, PromptRegistry::new()?),
            responder: ResponseGenerator::new()?,
            sessions: Mutex::new(SessionRegistry::new()),
            turn_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Process one conversation turn end to end
    pub async fn process_turn(&self, request: TurnRequest) -> Result<TurnOutcome> {
        let turn_lock = self.turn_lock(&request.conversation_id);
        let _guard = turn_lock.lock().await;

        let current: Vec<GarmentItem> = request.current_items.iter().cloned().map(Into::into).collect();
        let candidates: Vec<GarmentItem> = request.candidate_items.iter().cloned().map(Into::into).collect();
        let baseline: Option<Vec<GarmentItem>> = request
            .baseline_items
            .as_ref()
            .map(|items| items.iter().cloned().map(Into::into).collect());

        let seq = request.turn_seq.unwrap_or_else(|| {
            self.with_sessions(|s| s.session_mut(&request.conversation_id).next_seq())
        });

        // A turn that is already out of date must not touch the session,
        // not even to consume a parked question
        if self.with_sessions(|s| s.session_mut(&request.conversation_id).is_stale(seq)) {
            warn!(conversation_id = %request.conversation_id, seq, "process_turn: stale turn discarded");
            return Ok(TurnOutcome {
                decision: DecisionResult::execute(vec![], vec![], "superseded by a newer turn"),
                response_text: String::new(),
                outfit: OutfitState::from_items(&current),
                clarification: None,
                compat: vec![],
                superseded: true,
            });
        }

        // A parked question is consumed by this turn either way: answered,
        // or displaced by the new request (last request wins)
        let pending = self.with_sessions(|s| s.session_mut(&request.conversation_id).take_pending());
        let replay = pending.as_ref().and_then(|ctx| replay_answer(ctx, &request.message, &current));
        if pending.is_some() && replay.is_none() {
            debug!(conversation_id = %request.conversation_id, "process_turn: pending clarification displaced");
        }

        let (kind, state, decision) = match replay {
            Some(Replay::Direct(decision)) => {
                let state = self.analyzer.analyze(&current).await;
                (RequestKind::SingleItem, state, decision)
            }
            Some(Replay::Dismissed) => {
                let state = self.analyzer.analyze(&current).await;
                let decision = DecisionResult::execute(vec![], vec![], "keeping the outfit as it is");
                (RequestKind::SingleItem, state, decision)
            }
            Some(Replay::Reroute {
                classification,
                candidates: replayed_candidates,
            }) => {
                let state = self.analyzer.analyze(&current).await;
                let decision = engine::decide(&DecisionContext {
                    classification: &classification,
                    state: &state,
                    candidates: &replayed_candidates,
                    baseline: baseline.as_deref(),
                });
                (classification.kind, state, decision)
            }
            None => {
                // The two external calls run in parallel within the turn
                let (classification, state) = tokio::join!(
                    self.classifier.classify(&request.message, &request.history),
                    self.analyzer.analyze(&current),
                );
                let decision = engine::decide(&DecisionContext {
                    classification: &classification,
                    state: &state,
                    candidates: &candidates,
                    baseline: baseline.as_deref(),
                });
                (classification.kind, state, decision)
            }
        };

        self.finish_turn(&request, seq, kind, state, decision, &current)
    }

    /// Apply the decision to session state and render the outcome
    fn finish_turn(
        &self,
        request: &TurnRequest,
        seq: u64,
        kind: RequestKind,
        state: OutfitState,
        decision: DecisionResult,
        current: &[GarmentItem],
    ) -> Result<TurnOutcome> {
        // Compat checks run over the proposed final list; a paused decision
        // proposes nothing yet
        let previewed = match decision.action {
            DecisionAction::Execute | DecisionAction::Suggest => apply_decision(current, &decision),
            DecisionAction::Clarify => current.to_vec(),
        };
        let compat = compat::check_all(&previewed);

        let new_state = match decision.action {
            DecisionAction::Execute => OutfitState::from_items(&previewed),
            _ => state,
        };

        let clarification = self.build_clarification(request, &decision);
        let changed = !decision.items_to_add.is_empty() || !decision.items_to_remove.is_empty();

        let superseded = self.with_sessions(|sessions| {
            let session = sessions.session_mut(&request.conversation_id);
            if !session.observe_turn(seq) {
                return true;
            }
            match decision.action {
                DecisionAction::Execute if changed => session.commit(new_state.clone()),
                DecisionAction::Execute => {}
                DecisionAction::Clarify | DecisionAction::Suggest => {
                    if let Some(ctx) = clarification.clone() {
                        if session.set_pending(ctx).is_some() {
                            debug!("finish_turn: pending clarification overwritten (last request wins)");
                        }
                    }
                }
            }
            false
        });

        if superseded {
            warn!(conversation_id = %request.conversation_id, seq, "finish_turn: stale turn discarded");
            return Ok(TurnOutcome {
                response_text: String::new(),
                outfit: new_state,
                clarification: None,
                compat,
                decision,
                superseded: true,
            });
        }

        let response_text = self.responder.render(kind, &decision, &new_state, &compat);
        info!(
            conversation_id = %request.conversation_id,
            action = %decision.action,
            added = decision.items_to_add.len(),
            removed = decision.items_to_remove.len(),
            regenerate = decision.regenerate_from_scratch,
            "turn complete"
        );

        Ok(TurnOutcome {
            response_text,
            outfit: new_state,
            clarification,
            compat,
            decision,
            superseded: false,
        })
    }

    /// Step the conversation back to its previous outfit snapshot
    pub async fn undo(&self, conversation_id: &str) -> Result<OutfitState, SessionError> {
        let turn_lock = self.turn_lock(conversation_id);
        let _guard = turn_lock.lock().await;
        self.with_sessions(|s| s.session_mut(conversation_id).undo())
    }

    /// Re-apply the most recently undone snapshot
    pub async fn redo(&self, conversation_id: &str) -> Result<OutfitState, SessionError> {
        let turn_lock = self.turn_lock(conversation_id);
        let _guard = turn_lock.lock().await;
        self.with_sessions(|s| s.session_mut(conversation_id).redo())
    }

    /// Peek at a conversation's parked clarification, if any
    pub fn pending_clarification(&self, conversation_id: &str) -> Option<ClarificationContext> {
        self.with_sessions(|s| s.session_mut(conversation_id).pending().cloned())
    }

    /// Build the context the caller must persist when the engine paused
    fn build_clarification(&self, request: &TurnRequest, decision: &DecisionResult) -> Option<ClarificationContext> {
        match decision.action {
            DecisionAction::Clarify => {
                let prompt = decision.clarification.as_ref()?;
                Some(ClarificationContext {
                    conversation_id: request.conversation_id.clone(),
                    kind: prompt.kind,
                    question: prompt.question.clone(),
                    options: prompt.options.clone(),
                    pending_add: decision.items_to_add.clone(),
                    pending_remove: decision.items_to_remove.clone(),
                    original_message: request.message.clone(),
                    created_at: Utc::now(),
                })
            }
            DecisionAction::Suggest => Some(ClarificationContext {
                conversation_id: request.conversation_id.clone(),
                kind: ClarificationKind::Approval,
                question: "Want me to go ahead?".to_string(),
                options: vec!["yes, go ahead".to_string(), "no, keep my outfit".to_string()],
                pending_add: decision.items_to_add.clone(),
                pending_remove: decision.items_to_remove.clone(),
                original_message: request.message.clone(),
                created_at: Utc::now(),
            }),
            DecisionAction::Execute => None,
        }
    }

    fn with_sessions<T>(&self, f: impl FnOnce(&mut Sessions) -> T) -> T {
        let mut sessions = self.sessions.lock().expect("session registry poisoned");
        f(&mut sessions)
    }

    fn turn_lock(&self, conversation_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.turn_locks.lock().expect("turn lock map poisoned");
        locks.entry(conversation_id.to_string()).or_default().clone()
    }
}

/// current - removed + added, matching removals by (name, zone)
fn apply_decision(current: &[GarmentItem], decision: &DecisionResult) -> Vec<GarmentItem> {
    let mut result: Vec<GarmentItem> = current
        .iter()
        .filter(|item| {
            !decision
                .items_to_remove
                .iter()
                .any(|r| r.name == item.name && r.zone == item.zone)
        })
        .cloned()
        .collect();
    result.extend(decision.items_to_add.iter().cloned());
    result
}
