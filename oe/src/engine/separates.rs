//! Separates decision tree
//!
//! The wearer has a plain top + bottom (or a partial outfit that reads the
//! same way). Per-zone rules, applied candidate by candidate:
//!
//! - top: layering language adds without removing, otherwise swap
//! - bottom: unconditional swap (bottoms never layer)
//! - one_piece: a suggestion, not a swap - structurally bigger change
//! - outerwear: layers by default, swaps only on explicit replace language
//! - footwear/accessories: replace same-zone items if any, else add

use crate::domain::{GarmentItem, Zone};

use super::{DecisionContext, DecisionResult, names, push_unique, swap_into_zone};

pub(crate) fn decide(ctx: &DecisionContext) -> DecisionResult {
    // A one-piece candidate restructures the outfit; never silently swap it in
    if ctx.candidates.iter().any(|c| c.zone == Zone::OnePiece) {
        let mut remove: Vec<GarmentItem> = Vec::new();
        for worn in ctx.state.zone_items(Zone::Top) {
            push_unique(&mut remove, worn.clone());
        }
        for worn in ctx.state.zone_items(Zone::Bottom) {
            push_unique(&mut remove, worn.clone());
        }
        let reasoning = format!(
            "a one-piece would replace the whole top/bottom pairing; proposing {} for approval",
            names(ctx.candidates)
        );
        return DecisionResult::suggest(ctx.candidates.to_vec(), remove, reasoning);
    }

    let mut add: Vec<GarmentItem> = Vec::new();
    let mut remove: Vec<GarmentItem> = Vec::new();
    let mut notes: Vec<String> = Vec::new();

    for candidate in ctx.candidates {
        match candidate.zone {
            Zone::Top => {
                if ctx.classification.wants_layering() {
                    push_unique(&mut add, candidate.clone());
                    notes.push(format!("layering {} over the current top", candidate.name));
                } else {
                    swap_into_zone(ctx.state, candidate, &mut add, &mut remove);
                    notes.push(format!("swapping the top for {}", candidate.name));
                }
            }
            Zone::Bottom => {
                swap_into_zone(ctx.state, candidate, &mut add, &mut remove);
                notes.push(format!("swapping the bottom for {}", candidate.name));
            }
            Zone::Outerwear => {
                if ctx.classification.wants_replacement() {
                    swap_into_zone(ctx.state, candidate, &mut add, &mut remove);
                    notes.push(format!("replacing the outer layer with {}", candidate.name));
                } else {
                    push_unique(&mut add, candidate.clone());
                    notes.push(format!("adding {} as an outer layer", candidate.name));
                }
            }
            Zone::Footwear | Zone::Accessories => {
                swap_into_zone(ctx.state, candidate, &mut add, &mut remove);
                notes.push(format!("putting on {}", candidate.name));
            }
            Zone::OnePiece => unreachable!("one_piece candidates handled above"),
        }
    }

    DecisionResult::execute(add, remove, notes.join("; "))
}
