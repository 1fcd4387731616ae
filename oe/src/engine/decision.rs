//! DecisionResult and clarification types

use serde::{Deserialize, Serialize};

use crate::domain::GarmentItem;

/// What the engine decided to do with this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionAction {
    /// Apply the mutation now
    Execute,
    /// Pause and ask; nothing is merged into the outfit yet
    Clarify,
    /// Propose a transformation that needs explicit approval
    Suggest,
}

impl std::fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionAction::Execute => write!(f, "execute"),
            DecisionAction::Clarify => write!(f, "clarify"),
            DecisionAction::Suggest => write!(f, "suggest"),
        }
    }
}

/// Why a clarification was raised; drives answer replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarificationKind {
    /// Which worn item should come off
    RemovalTarget,
    /// Removal would empty the outfit; needs an explicit yes
    ConfirmRemoval,
    /// Which worn item should be modified
    AttributeTarget,
    /// Which top-equivalent layer should the candidate replace
    LayerTarget,
    /// One-piece swapped for a top; what goes on the bottom
    BottomPreference,
    /// One-piece swapped for a bottom; what goes on top
    TopPreference,
    /// A suggested transformation awaiting approval
    Approval,
    /// Request too vague to act on
    Rephrase,
}

/// The question the engine wants answered before it will act
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarificationPrompt {
    pub kind: ClarificationKind,
    pub question: String,
    /// Multiple-choice options; free-text answers are also matched
    pub options: Vec<String>,
}

/// Concrete mutation plan for one turn
///
/// For `Clarify` and `Suggest`, `items_to_add`/`items_to_remove` are the
/// *pending* plan retained for replay - they are not merged into outfit
/// state until the user answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub action: DecisionAction,
    pub items_to_add: Vec<GarmentItem>,
    pub items_to_remove: Vec<GarmentItem>,
    pub clarification: Option<ClarificationPrompt>,
    pub requires_approval: bool,
    /// Tells the compositing collaborator to rebuild from the original
    /// photo instead of layering onto the prior result
    pub regenerate_from_scratch: bool,
    pub reasoning: String,
}

impl DecisionResult {
    /// An applied mutation
    ///
    /// The regeneration flag is derived, not chosen: any removal (which is
    /// also how same-zone conflicts are resolved) forces a rebuild; pure
    /// additions layer onto the prior composite.
    pub fn execute(
        items_to_add: Vec<GarmentItem>,
        items_to_remove: Vec<GarmentItem>,
        reasoning: impl Into<String>,
    ) -> Self {
        let regenerate_from_scratch = !items_to_remove.is_empty();
        Self {
            action: DecisionAction::Execute,
            items_to_add,
            items_to_remove,
            clarification: None,
            requires_approval: false,
            regenerate_from_scratch,
            reasoning: reasoning.into(),
        }
    }

    /// A paused decision awaiting an answer
    pub fn clarify(
        prompt: ClarificationPrompt,
        pending_add: Vec<GarmentItem>,
        pending_remove: Vec<GarmentItem>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            action: DecisionAction::Clarify,
            items_to_add: pending_add,
            items_to_remove: pending_remove,
            clarification: Some(prompt),
            requires_approval: false,
            regenerate_from_scratch: false,
            reasoning: reasoning.into(),
        }
    }

    /// A proposed transformation requiring explicit approval
    pub fn suggest(
        items_to_add: Vec<GarmentItem>,
        items_to_remove: Vec<GarmentItem>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            action: DecisionAction::Suggest,
            items_to_add,
            items_to_remove,
            clarification: None,
            requires_approval: true,
            regenerate_from_scratch: true,
            reasoning: reasoning.into(),
        }
    }
}
