//! Layered decision tree
//!
//! The wearer has a top/bottom base plus extra layers. Top-equivalent
//! candidates are the hard case: which layer does the new piece replace?
//! The tree narrows by layer count and base-layer vocabulary before it
//! resorts to asking.

use crate::domain::GarmentItem;

use super::{ClarificationKind, ClarificationPrompt, DecisionContext, DecisionResult, names, push_unique, separates};

/// Names that read as base layers and may silently replace the innermost
/// layer in a two-layer stack
const BASE_LAYER_VOCAB: [&str; 5] = ["tank", "tee", "t-shirt", "cami", "undershirt"];

/// Escape option offered alongside per-layer choices
const ADD_AS_NEW_LAYER: &str = "add it as a new layer";

pub(crate) fn decide(ctx: &DecisionContext) -> DecisionResult {
    let top_candidates: Vec<&GarmentItem> = ctx.candidates.iter().filter(|c| c.zone.is_top_equivalent()).collect();

    // Bottoms, footwear, accessories, one-pieces: same rules as the
    // separates tree, layer stack untouched
    if top_candidates.is_empty() {
        return separates::decide(ctx);
    }

    // Explicit layering language: new outermost layer, nothing removed
    if ctx.classification.wants_layering() {
        let reasoning = format!("layering {} on as the new outermost layer", names(ctx.candidates));
        return DecisionResult::execute(ctx.candidates.to_vec(), vec![], reasoning);
    }

    let layers: Vec<GarmentItem> = ctx.state.top_equivalent_layers().into_iter().cloned().collect();

    match layers.len() {
        0 => {
            let reasoning = format!("no top layers worn; adding {}", names(ctx.candidates));
            DecisionResult::execute(ctx.candidates.to_vec(), vec![], reasoning)
        }
        1 => {
            // A single layer is replaced unconditionally
            let (add, mut remove) = merge_rest(ctx);
            push_unique(&mut remove, layers[0].clone());
            let reasoning = format!("swapping {} for {}", layers[0].name, names(ctx.candidates));
            DecisionResult::execute(add, remove, reasoning)
        }
        2 => {
            if top_candidates.iter().any(|c| is_base_layer(c)) {
                // Base-layer vocabulary targets the innermost layer
                let (add, mut remove) = merge_rest(ctx);
                push_unique(&mut remove, layers[0].clone());
                let reasoning = format!(
                    "{} reads as a base layer; replacing the innermost layer {}",
                    names(ctx.candidates),
                    layers[0].name
                );
                DecisionResult::execute(add, remove, reasoning)
            } else {
                clarify_between_layers(ctx, &layers, false)
            }
        }
        _ => clarify_between_layers(ctx, &layers, true),
    }
}

/// Ambiguous "change the top"-style reference: one option per layer,
/// annotated inner/middle/outer, candidate retained for replay
pub(crate) fn clarify_layer_reference(ctx: &DecisionContext) -> DecisionResult {
    let layers: Vec<GarmentItem> = ctx.state.top_equivalent_layers().into_iter().cloned().collect();
    DecisionResult::clarify(
        ClarificationPrompt {
            kind: ClarificationKind::LayerTarget,
            question: "You're wearing a few layers: which one do you mean?".to_string(),
            options: annotate_layers(&layers),
        },
        ctx.candidates.to_vec(),
        vec![],
        "ambiguous layer reference",
    )
}

/// Ask which layer the candidate should replace
fn clarify_between_layers(ctx: &DecisionContext, layers: &[GarmentItem], with_escape: bool) -> DecisionResult {
    let mut options = annotate_layers(layers);
    if with_escape {
        options.push(ADD_AS_NEW_LAYER.to_string());
    }
    DecisionResult::clarify(
        ClarificationPrompt {
            kind: ClarificationKind::LayerTarget,
            question: format!("Which layer should {} replace?", names(ctx.candidates)),
            options,
        },
        ctx.candidates.to_vec(),
        vec![],
        format!("{} top layers worn; replacement target is ambiguous", layers.len()),
    )
}

/// Label each layer by its position in the stack
fn annotate_layers(layers: &[GarmentItem]) -> Vec<String> {
    let last = layers.len().saturating_sub(1);
    layers
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let position = if i == 0 {
                "inner"
            } else if i == last {
                "outer"
            } else {
                "middle"
            };
            format!("{} ({} layer)", layer.name, position)
        })
        .collect()
}

/// Same-zone merge for the non-top candidates riding along
fn merge_rest(ctx: &DecisionContext) -> (Vec<GarmentItem>, Vec<GarmentItem>) {
    let mut add: Vec<GarmentItem> = Vec::new();
    let mut remove: Vec<GarmentItem> = Vec::new();
    for candidate in ctx.candidates {
        if candidate.zone.is_top_equivalent() {
            push_unique(&mut add, candidate.clone());
        } else {
            super::swap_into_zone(ctx.state, candidate, &mut add, &mut remove);
        }
    }
    (add, remove)
}

/// Whether a candidate's name/category belongs to the base-layer vocabulary
fn is_base_layer(item: &GarmentItem) -> bool {
    let text = item.match_text();
    BASE_LAYER_VOCAB.iter().any(|kw| text.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::super::{DecisionAction, decide as engine_decide};
    use super::*;
    use crate::classify::{RequestClassification, RequestKind};
    use crate::domain::OutfitState;

    fn item(name: &str, category: &str) -> GarmentItem {
        GarmentItem::new(name, category)
    }

    /// tee (top, z1) / flannel (top, z2) / denim jacket (outerwear)
    fn three_layer_state() -> OutfitState {
        OutfitState::from_items(&[
            item("tee", "t-shirt"),
            item("flannel", "flannel"),
            item("denim jacket", "denim jacket"),
            item("jeans", "jeans"),
        ])
    }

    fn two_layer_state() -> OutfitState {
        OutfitState::from_items(&[
            item("tee", "t-shirt"),
            item("flannel", "flannel"),
            item("jeans", "jeans"),
        ])
    }

    fn run(cls: &RequestClassification, state: &OutfitState, candidates: &[GarmentItem]) -> DecisionResult {
        engine_decide(&DecisionContext {
            classification: cls,
            state,
            candidates,
            baseline: None,
        })
    }

    #[test]
    fn test_three_layers_clarify_with_escape_option() {
        let state = three_layer_state();
        let cls = RequestClassification::synthetic(RequestKind::SingleItem);
        let result = run(&cls, &state, &[item("leather jacket", "leather jacket")]);

        assert_eq!(result.action, DecisionAction::Clarify);
        let prompt = result.clarification.unwrap();
        assert_eq!(prompt.kind, ClarificationKind::LayerTarget);
        assert_eq!(prompt.options.len(), 4);
        assert!(prompt.options[0].contains("inner"));
        assert!(prompt.options[1].contains("middle"));
        assert!(prompt.options[2].contains("outer"));
        assert_eq!(prompt.options[3], ADD_AS_NEW_LAYER);
    }

    #[test]
    fn test_layering_keyword_adds_outermost() {
        let state = three_layer_state();
        let mut cls = RequestClassification::synthetic(RequestKind::Layering);
        cls.entities.layering_keywords.push("on top".to_string());
        let result = run(&cls, &state, &[item("leather jacket", "leather jacket")]);

        assert_eq!(result.action, DecisionAction::Execute);
        assert!(result.items_to_remove.is_empty());
        assert!(!result.regenerate_from_scratch);
    }

    #[test]
    fn test_two_layers_base_vocab_replaces_innermost() {
        let state = two_layer_state();
        let cls = RequestClassification::synthetic(RequestKind::SingleItem);
        let result = run(&cls, &state, &[item("ribbed tank top", "tank top")]);

        assert_eq!(result.action, DecisionAction::Execute);
        assert_eq!(result.items_to_remove[0].name, "tee");
        assert!(result.regenerate_from_scratch);
    }

    #[test]
    fn test_two_layers_non_base_clarifies_between_them() {
        let state = two_layer_state();
        let cls = RequestClassification::synthetic(RequestKind::SingleItem);
        let result = run(&cls, &state, &[item("sweater", "sweater")]);

        assert_eq!(result.action, DecisionAction::Clarify);
        let prompt = result.clarification.unwrap();
        assert_eq!(prompt.options.len(), 2);
        assert!(prompt.options[0].contains("inner"));
        assert!(prompt.options[1].contains("outer"));
    }

    #[test]
    fn test_single_layer_replaced_unconditionally() {
        // One top + accessories pushes the state to layered with one layer
        let state = OutfitState::from_items(&[
            item("tee", "t-shirt"),
            item("jeans", "jeans"),
            item("silver necklace", "necklace"),
        ]);
        let cls = RequestClassification::synthetic(RequestKind::SingleItem);
        let result = run(&cls, &state, &[item("blouse", "blouse")]);

        assert_eq!(result.action, DecisionAction::Execute);
        assert_eq!(result.items_to_remove[0].name, "tee");
    }

    #[test]
    fn test_non_top_candidate_routes_to_separates_rules() {
        let state = three_layer_state();
        let cls = RequestClassification::synthetic(RequestKind::SingleItem);
        let result = run(&cls, &state, &[item("pleated skirt", "skirt")]);

        assert_eq!(result.action, DecisionAction::Execute);
        assert_eq!(result.items_to_remove[0].name, "jeans");
        assert_eq!(result.items_to_add[0].name, "pleated skirt");
    }

    #[test]
    fn test_ambiguous_attribute_reference_annotates_layers() {
        let state = three_layer_state();
        let mut cls = RequestClassification::synthetic(RequestKind::AttributeModification);
        cls.entities.garments.push("top".to_string());
        let result = run(&cls, &state, &[item("henley", "henley")]);

        assert_eq!(result.action, DecisionAction::Clarify);
        let prompt = result.clarification.unwrap();
        assert_eq!(prompt.kind, ClarificationKind::LayerTarget);
        assert_eq!(prompt.options.len(), 3);
        assert!(prompt.options.iter().any(|o| o.contains("denim jacket (outer layer)")));
        // candidate retained for replay
        assert_eq!(result.items_to_add[0].name, "henley");
    }
}
