//! Decision engine
//!
//! Pure routing logic: (classification, outfit state, candidates, baseline)
//! in, mutation plan out. No I/O, no randomness, no shared mutable reads -
//! identical inputs always produce an identical DecisionResult. Business
//! ambiguity never raises; it becomes a `clarify` or `suggest` with a
//! human-readable reasoning string.

pub mod decision;
mod layered;
pub mod matching;
mod one_piece;
mod separates;

use tracing::debug;

pub use decision::{ClarificationKind, ClarificationPrompt, DecisionAction, DecisionResult};

use crate::classify::{RequestClassification, RequestKind};
use crate::domain::{GarmentItem, OutfitKind, OutfitState};

/// Everything a decision is a function of
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub classification: &'a RequestClassification,
    pub state: &'a OutfitState,
    /// Newly resolved candidate garments for this request
    pub candidates: &'a [GarmentItem],
    /// Garments from the original reference snapshot, for restoration
    pub baseline: Option<&'a [GarmentItem]>,
}

/// Decide what to do with this turn
///
/// Priority-ordered dispatch: style_mood, removal, and attribute
/// modification outrank the state trees; everything else routes by the
/// outfit's shape.
pub fn decide(ctx: &DecisionContext) -> DecisionResult {
    debug!(
        kind = %ctx.classification.kind,
        state = %ctx.state.kind,
        candidates = ctx.candidates.len(),
        "decide: called"
    );

    match ctx.classification.kind {
        RequestKind::StyleMood => decide_style_mood(ctx),
        RequestKind::Removal => decide_removal(ctx),
        RequestKind::AttributeModification => decide_attribute(ctx),
        RequestKind::CompleteOutfit => decide_complete_outfit(ctx),
        RequestKind::SingleItem | RequestKind::Layering => dispatch_by_state(ctx),
    }
}

/// style_mood is never silently executed: always a suggestion requiring
/// approval, always a full rebuild
fn decide_style_mood(ctx: &DecisionContext) -> DecisionResult {
    let remove: Vec<GarmentItem> = ctx.state.all_items().into_iter().cloned().collect();
    let reasoning = if ctx.candidates.is_empty() {
        "mood request with no resolved items; proposing a restyle for approval".to_string()
    } else {
        format!(
            "mood request; proposing {} as a fresh look, pending approval",
            names(ctx.candidates)
        )
    };
    DecisionResult::suggest(ctx.candidates.to_vec(), remove, reasoning)
}

/// Removal: match named items, never silently empty the outfit
fn decide_removal(ctx: &DecisionContext) -> DecisionResult {
    let worn = ctx.state.all_items();
    if worn.is_empty() {
        return DecisionResult::clarify(
            ClarificationPrompt {
                kind: ClarificationKind::Rephrase,
                question: "There's nothing to take off right now. What would you like to wear instead?".to_string(),
                options: vec![],
            },
            vec![],
            vec![],
            "removal requested on an empty outfit",
        );
    }

    let matches = matching::find_matches(&worn, &ctx.classification.entities.garments);

    if matches.is_empty() {
        // Removal language present but no target resolved: one option per worn item
        return DecisionResult::clarify(
            ClarificationPrompt {
                kind: ClarificationKind::RemovalTarget,
                question: "Which one should come off?".to_string(),
                options: worn.iter().map(|i| i.display_label()).collect(),
            },
            vec![],
            vec![],
            "removal language with no matching worn item",
        );
    }

    if matches.len() == worn.len() {
        // An outfit can never be emptied by removal alone
        return DecisionResult::clarify(
            ClarificationPrompt {
                kind: ClarificationKind::ConfirmRemoval,
                question: format!(
                    "Taking off {} would leave nothing on. Remove everything anyway?",
                    names(&matches)
                ),
                options: vec!["yes, remove everything".to_string(), "no, keep it".to_string()],
            },
            vec![],
            matches,
            "removal would empty the outfit; asking for explicit confirmation",
        );
    }

    let reasoning = format!("removing {}", names(&matches));
    DecisionResult::execute(vec![], matches, reasoning)
}

/// Attribute modification: resolve exactly one target, then replace it outright
fn decide_attribute(ctx: &DecisionContext) -> DecisionResult {
    let worn = ctx.state.all_items();
    if worn.is_empty() {
        // Nothing to modify; fail open and treat as an addition
        return dispatch_by_state(ctx);
    }
    if ctx.candidates.is_empty() {
        return DecisionResult::clarify(
            ClarificationPrompt {
                kind: ClarificationKind::Rephrase,
                question: "What should it change into?".to_string(),
                options: vec![],
            },
            vec![],
            vec![],
            "attribute change with no resolved replacement",
        );
    }

    let mentions = &ctx.classification.entities.garments;
    if let Some(target) = matching::resolve_unambiguous(&worn, mentions) {
        let reasoning = format!("replacing {} with {}", target.name, names(ctx.candidates));
        return DecisionResult::execute(ctx.candidates.to_vec(), vec![target], reasoning);
    }

    if worn.len() == 1 {
        let target = worn[0].clone();
        let reasoning = format!("only {} is worn; replacing it with {}", target.name, names(ctx.candidates));
        return DecisionResult::execute(ctx.candidates.to_vec(), vec![target], reasoning);
    }

    // Ambiguous reference among several worn items
    if ctx.state.kind == OutfitKind::Layered && references_top_equivalent(ctx) {
        return layered::clarify_layer_reference(ctx);
    }

    DecisionResult::clarify(
        ClarificationPrompt {
            kind: ClarificationKind::AttributeTarget,
            question: "Which piece do you mean?".to_string(),
            options: worn.iter().map(|i| i.display_label()).collect(),
        },
        ctx.candidates.to_vec(),
        vec![],
        "ambiguous modification target among several worn items",
    )
}

/// Whether the ambiguous reference points at the top/outerwear stack
fn references_top_equivalent(ctx: &DecisionContext) -> bool {
    let candidate_hit = ctx.candidates.iter().any(|c| c.zone.is_top_equivalent());
    let mention_hit = ctx
        .classification
        .entities
        .garments
        .iter()
        .any(|m| crate::domain::zone_for_category(m).is_top_equivalent());
    candidate_hit || mention_hit
}

/// complete_outfit: regenerate every zone a candidate covers, keep the rest
fn decide_complete_outfit(ctx: &DecisionContext) -> DecisionResult {
    if ctx.candidates.is_empty() {
        return dispatch_by_state(ctx);
    }

    let mut remove: Vec<GarmentItem> = Vec::new();
    for worn in ctx.state.all_items() {
        let conflicted = ctx.candidates.iter().any(|c| c.zone.conflicts_with(worn.zone));
        if conflicted {
            push_unique(&mut remove, worn.clone());
        }
    }

    let reasoning = if remove.is_empty() {
        format!("building the look from scratch with {}", names(ctx.candidates))
    } else {
        format!(
            "regenerating the look: {} replacing {}",
            names(ctx.candidates),
            names(&remove)
        )
    };
    DecisionResult::execute(ctx.candidates.to_vec(), remove, reasoning)
}

/// Route by outfit shape once the priority intents are out of the way
fn dispatch_by_state(ctx: &DecisionContext) -> DecisionResult {
    if ctx.candidates.is_empty() {
        // The fallback classification is single_item, but removal language
        // caught by the local scan still deserves the removal flow
        if ctx.classification.wants_removal() {
            return decide_removal(ctx);
        }
        return DecisionResult::clarify(
            ClarificationPrompt {
                kind: ClarificationKind::Rephrase,
                question: "I couldn't pin down a garment from that. Could you name what you'd like to wear?"
                    .to_string(),
                options: vec![],
            },
            vec![],
            vec![],
            "no resolved candidates to act on",
        );
    }

    match ctx.state.kind {
        OutfitKind::Empty => {
            let reasoning = format!("outfit is empty; adding {}", names(ctx.candidates));
            DecisionResult::execute(ctx.candidates.to_vec(), vec![], reasoning)
        }
        OutfitKind::Separates => separates::decide(ctx),
        OutfitKind::OnePiece => one_piece::decide(ctx),
        OutfitKind::Layered => layered::decide(ctx),
        OutfitKind::Unknown => {
            // Fail open: an unrecognized state never blocks an addition
            let reasoning = format!("unrecognized outfit state; adding {}", names(ctx.candidates));
            DecisionResult::execute(ctx.candidates.to_vec(), vec![], reasoning)
        }
    }
}

/// Replace-else-add semantics for footwear/accessories/bottom candidates,
/// shared by the separates and layered trees
pub(crate) fn swap_into_zone(
    state: &OutfitState,
    candidate: &GarmentItem,
    add: &mut Vec<GarmentItem>,
    remove: &mut Vec<GarmentItem>,
) {
    for worn in state.zone_items(candidate.zone) {
        push_unique(remove, worn.clone());
    }
    push_unique(add, candidate.clone());
}

/// Push avoiding (name, zone) duplicates
pub(crate) fn push_unique(list: &mut Vec<GarmentItem>, item: GarmentItem) {
    if !list.iter().any(|i| i.name == item.name && i.zone == item.zone) {
        list.push(item);
    }
}

/// Comma-joined item names for reasoning strings
pub(crate) fn names(items: &[GarmentItem]) -> String {
    items.iter().map(|i| i.name.as_str()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::RequestClassification;
    use crate::domain::OutfitState;

    fn item(name: &str, category: &str) -> GarmentItem {
        GarmentItem::new(name, category)
    }

    fn classification(kind: RequestKind) -> RequestClassification {
        RequestClassification::synthetic(kind)
    }

    #[test]
    fn test_empty_state_executes_pure_addition() {
        let state = OutfitState::empty();
        let cls = classification(RequestKind::SingleItem);
        let candidates = vec![item("white t-shirt", "t-shirt")];

        let result = decide(&DecisionContext {
            classification: &cls,
            state: &state,
            candidates: &candidates,
            baseline: None,
        });

        assert_eq!(result.action, DecisionAction::Execute);
        assert_eq!(result.items_to_add.len(), 1);
        assert!(result.items_to_remove.is_empty());
        assert!(!result.regenerate_from_scratch);
    }

    #[test]
    fn test_style_mood_always_suggests() {
        let state = OutfitState::from_items(&[item("tee", "t-shirt"), item("jeans", "jeans")]);
        let cls = classification(RequestKind::StyleMood);
        let candidates = vec![item("slip dress", "slip dress")];

        let result = decide(&DecisionContext {
            classification: &cls,
            state: &state,
            candidates: &candidates,
            baseline: None,
        });

        assert_eq!(result.action, DecisionAction::Suggest);
        assert!(result.requires_approval);
        assert!(result.regenerate_from_scratch);
    }

    #[test]
    fn test_removal_of_named_item_executes() {
        let state = OutfitState::from_items(&[
            item("grey hoodie", "hoodie"),
            item("jeans", "jeans"),
            item("sneakers", "sneakers"),
        ]);
        let mut cls = classification(RequestKind::Removal);
        cls.entities.garments.push("hoodie".to_string());

        let result = decide(&DecisionContext {
            classification: &cls,
            state: &state,
            candidates: &[],
            baseline: None,
        });

        assert_eq!(result.action, DecisionAction::Execute);
        assert_eq!(result.items_to_remove.len(), 1);
        assert_eq!(result.items_to_remove[0].name, "grey hoodie");
        assert!(result.regenerate_from_scratch);
    }

    #[test]
    fn test_removal_that_would_empty_outfit_clarifies() {
        let state = OutfitState::from_items(&[item("hoodie", "hoodie")]);
        let mut cls = classification(RequestKind::Removal);
        cls.entities.garments.push("hoodie".to_string());

        let result = decide(&DecisionContext {
            classification: &cls,
            state: &state,
            candidates: &[],
            baseline: None,
        });

        assert_eq!(result.action, DecisionAction::Clarify);
        let prompt = result.clarification.unwrap();
        assert_eq!(prompt.kind, ClarificationKind::ConfirmRemoval);
    }

    #[test]
    fn test_removal_without_match_offers_worn_items() {
        let state = OutfitState::from_items(&[item("tee", "t-shirt"), item("jeans", "jeans")]);
        let mut cls = classification(RequestKind::Removal);
        cls.entities.garments.push("scarf".to_string());

        let result = decide(&DecisionContext {
            classification: &cls,
            state: &state,
            candidates: &[],
            baseline: None,
        });

        assert_eq!(result.action, DecisionAction::Clarify);
        let prompt = result.clarification.unwrap();
        assert_eq!(prompt.kind, ClarificationKind::RemovalTarget);
        assert_eq!(prompt.options.len(), 2);
    }

    #[test]
    fn test_attribute_modification_single_worn_item_replaces() {
        let state = OutfitState::from_items(&[item("sundress", "sundress")]);
        let cls = classification(RequestKind::AttributeModification);
        let candidates = vec![item("red sundress", "sundress")];

        let result = decide(&DecisionContext {
            classification: &cls,
            state: &state,
            candidates: &candidates,
            baseline: None,
        });

        assert_eq!(result.action, DecisionAction::Execute);
        assert_eq!(result.items_to_remove[0].name, "sundress");
        assert!(result.regenerate_from_scratch);
    }

    #[test]
    fn test_attribute_modification_ambiguous_clarifies() {
        let state = OutfitState::from_items(&[
            item("tee", "t-shirt"),
            item("jeans", "jeans"),
            item("sneakers", "sneakers"),
        ]);
        let cls = classification(RequestKind::AttributeModification);
        let candidates = vec![item("black belt", "belt")];

        let result = decide(&DecisionContext {
            classification: &cls,
            state: &state,
            candidates: &candidates,
            baseline: None,
        });

        assert_eq!(result.action, DecisionAction::Clarify);
        let prompt = result.clarification.unwrap();
        assert_eq!(prompt.kind, ClarificationKind::AttributeTarget);
        assert_eq!(prompt.options.len(), 3);
        // candidate retained for replay
        assert_eq!(result.items_to_add.len(), 1);
    }

    #[test]
    fn test_complete_outfit_replaces_covered_zones_only() {
        let state = OutfitState::from_items(&[
            item("tee", "t-shirt"),
            item("jeans", "jeans"),
            item("sneakers", "sneakers"),
        ]);
        let cls = classification(RequestKind::CompleteOutfit);
        let candidates = vec![item("blouse", "blouse"), item("skirt", "skirt")];

        let result = decide(&DecisionContext {
            classification: &cls,
            state: &state,
            candidates: &candidates,
            baseline: None,
        });

        assert_eq!(result.action, DecisionAction::Execute);
        let removed: Vec<_> = result.items_to_remove.iter().map(|i| i.name.as_str()).collect();
        assert!(removed.contains(&"tee"));
        assert!(removed.contains(&"jeans"));
        assert!(!removed.contains(&"sneakers"));
    }

    #[test]
    fn test_no_candidates_clarifies_instead_of_acting() {
        let state = OutfitState::empty();
        let cls = classification(RequestKind::SingleItem);

        let result = decide(&DecisionContext {
            classification: &cls,
            state: &state,
            candidates: &[],
            baseline: None,
        });

        assert_eq!(result.action, DecisionAction::Clarify);
        assert_eq!(result.clarification.unwrap().kind, ClarificationKind::Rephrase);
    }

    #[test]
    fn test_decision_is_deterministic() {
        let state = OutfitState::from_items(&[item("tee", "t-shirt"), item("jeans", "jeans")]);
        let cls = classification(RequestKind::SingleItem);
        let candidates = vec![item("blouse", "blouse")];
        let ctx = DecisionContext {
            classification: &cls,
            state: &state,
            candidates: &candidates,
            baseline: None,
        };

        let first = decide(&ctx);
        let second = decide(&ctx);
        assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
    }
}
