//! One-piece decision tree
//!
//! The wearer is in a dress/jumpsuit. The interesting paths are the partial
//! swaps: a top candidate leaves the bottom ambiguous and a bottom candidate
//! leaves the top ambiguous. The two are deliberately asymmetric - the top
//! path auto-restores a baseline bottom when one is known, the bottom path
//! always asks. That asymmetry is preserved from the shipped behavior; see
//! DESIGN.md before unifying it.

use tracing::debug;

use crate::domain::{GarmentItem, Zone};

use super::{
    ClarificationKind, ClarificationPrompt, DecisionContext, DecisionResult, names, push_unique, swap_into_zone,
};

/// Curated bottom archetypes offered when no baseline bottom is known
const BOTTOM_ARCHETYPES: [&str; 4] = ["jeans", "a skirt", "shorts", "you choose"];

/// Curated top archetypes for the bottom-only path
const TOP_ARCHETYPES: [&str; 4] = ["a t-shirt", "a blouse", "a sweater", "you choose"];

pub(crate) fn decide(ctx: &DecisionContext) -> DecisionResult {
    let worn_one_piece: Vec<GarmentItem> = ctx.state.zone_items(Zone::OnePiece).to_vec();
    let has_zone = |zone: Zone| ctx.candidates.iter().any(|c| c.zone == zone);

    // Direct swap: a new one-piece takes the old one's place
    if has_zone(Zone::OnePiece) {
        let mut add: Vec<GarmentItem> = Vec::new();
        let mut remove = worn_one_piece;
        for candidate in ctx.candidates {
            match candidate.zone {
                Zone::Footwear | Zone::Accessories => swap_into_zone(ctx.state, candidate, &mut add, &mut remove),
                _ => push_unique(&mut add, candidate.clone()),
            }
        }
        let reasoning = format!("swapping the one-piece for {}", names(&add));
        return DecisionResult::execute(add, remove, reasoning);
    }

    // The user fully specified the new look: top + bottom replace the one-piece
    if has_zone(Zone::Top) && has_zone(Zone::Bottom) {
        let reasoning = format!("replacing the one-piece with {}", names(ctx.candidates));
        return DecisionResult::execute(ctx.candidates.to_vec(), worn_one_piece, reasoning);
    }

    // Top only: the bottom half is now ambiguous
    if has_zone(Zone::Top) {
        if let Some(restored) = baseline_bottom(ctx) {
            debug!(restored = %restored.name, "one_piece tree: auto-restoring baseline bottom");
            let mut add = ctx.candidates.to_vec();
            let restored_name = restored.name.clone();
            push_unique(&mut add, restored);
            let reasoning = format!(
                "swapping the one-piece for {}; restoring {} from the original outfit",
                names(ctx.candidates),
                restored_name
            );
            return DecisionResult::execute(add, worn_one_piece, reasoning);
        }

        return DecisionResult::clarify(
            ClarificationPrompt {
                kind: ClarificationKind::BottomPreference,
                question: "That replaces your one-piece, so you'll need something on the bottom. What would you like?"
                    .to_string(),
                options: BOTTOM_ARCHETYPES.iter().map(|s| s.to_string()).collect(),
            },
            ctx.candidates.to_vec(),
            worn_one_piece,
            "top candidate leaves the bottom ambiguous and no baseline bottom is known",
        );
    }

    // Bottom only: always ask about the top. No restoration heuristic here.
    if has_zone(Zone::Bottom) {
        return DecisionResult::clarify(
            ClarificationPrompt {
                kind: ClarificationKind::TopPreference,
                question: "That replaces your one-piece, so you'll need a top. What would you like?".to_string(),
                options: TOP_ARCHETYPES.iter().map(|s| s.to_string()).collect(),
            },
            ctx.candidates.to_vec(),
            worn_one_piece,
            "bottom candidate leaves the top ambiguous",
        );
    }

    // Outerwear layers over the one-piece; footwear/accessories replace-else-add
    let mut add: Vec<GarmentItem> = Vec::new();
    let mut remove: Vec<GarmentItem> = Vec::new();
    for candidate in ctx.candidates {
        match candidate.zone {
            Zone::Outerwear => push_unique(&mut add, candidate.clone()),
            Zone::Footwear | Zone::Accessories => swap_into_zone(ctx.state, candidate, &mut add, &mut remove),
            Zone::Top | Zone::Bottom | Zone::OnePiece => unreachable!("handled above"),
        }
    }
    let reasoning = format!("adding {} around the one-piece", names(&add));
    DecisionResult::execute(add, remove, reasoning)
}

/// First bottom-zone garment in the baseline outfit, if any
fn baseline_bottom(ctx: &DecisionContext) -> Option<GarmentItem> {
    ctx.baseline?
        .iter()
        .find(|i| i.zone == Zone::Bottom)
        .map(|i| {
            let mut restored = i.clone();
            restored.z_index = 0;
            restored
        })
}
