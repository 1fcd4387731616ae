//! OutfitState - the zone-organized snapshot of what is currently worn
//!
//! A snapshot is recomputed fresh from the authoritative item list every
//! turn and never mutated in place. Decision trees dispatch on its `kind`
//! tag, so that enum stays closed and every match over it is exhaustive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::garment::GarmentItem;
use super::zone::Zone;

/// Overall outfit shape, the engine's primary dispatch tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutfitKind {
    /// Nothing worn
    #[default]
    Empty,
    /// A single one-piece garment covers top and bottom
    OnePiece,
    /// One top, one bottom, no extra layering
    Separates,
    /// Top and bottom present with additional layers
    Layered,
    /// Unrecognized state from an external snapshot; the engine fails open
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for OutfitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutfitKind::Empty => write!(f, "empty"),
            OutfitKind::OnePiece => write!(f, "one_piece"),
            OutfitKind::Separates => write!(f, "separates"),
            OutfitKind::Layered => write!(f, "layered"),
            OutfitKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Zone-organized outfit snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitState {
    pub kind: OutfitKind,

    /// Items per zone, innermost first; z_index is assigned 1-based here
    pub zones: BTreeMap<Zone, Vec<GarmentItem>>,

    /// Whether the outfit covers body and feet
    pub is_complete: bool,

    /// Canonical zones still missing for a complete outfit
    pub missing_zones: Vec<Zone>,
}

impl OutfitState {
    /// The empty snapshot: nothing worn, every canonical zone missing
    pub fn empty() -> Self {
        Self {
            kind: OutfitKind::Empty,
            zones: BTreeMap::new(),
            is_complete: false,
            missing_zones: vec![Zone::Top, Zone::Bottom, Zone::Footwear],
        }
    }

    /// Build a snapshot from the authoritative item list
    ///
    /// Assigns 1-based z-indexes per zone in input order and enforces the
    /// zone-exclusivity invariant: a one_piece never co-exists with a top or
    /// bottom in the same snapshot. When the input violates it, the
    /// one_piece is reread as a long top layer (a dress worn over pants).
    pub fn from_items(items: &[GarmentItem]) -> Self {
        let has_separates = items
            .iter()
            .any(|i| matches!(i.zone, Zone::Top | Zone::Bottom));

        let mut zones: BTreeMap<Zone, Vec<GarmentItem>> = BTreeMap::new();
        for item in items {
            let mut item = item.clone();
            if item.zone == Zone::OnePiece && has_separates {
                debug!(name = %item.name, "from_items: one_piece demoted to top layer");
                item.zone = Zone::Top;
            }
            let slot = zones.entry(item.zone).or_default();
            item.z_index = slot.len() as u32 + 1;
            slot.push(item);
        }

        let kind = classify_zones(&zones);
        let missing_zones = missing_zones(&zones);
        let is_complete = missing_zones.is_empty();

        Self {
            kind,
            zones,
            is_complete,
            missing_zones,
        }
    }

    /// Items in one zone, innermost first
    pub fn zone_items(&self, zone: Zone) -> &[GarmentItem] {
        self.zones.get(&zone).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every worn item, flattened in stacking-priority order:
    /// accessories, footwear, bottom, one_piece, top, outerwear
    pub fn all_items(&self) -> Vec<&GarmentItem> {
        Zone::all()
            .iter()
            .flat_map(|z| self.zone_items(*z).iter())
            .collect()
    }

    /// Total item count across all zones
    pub fn item_count(&self) -> usize {
        self.zones.values().map(Vec::len).sum()
    }

    /// Top-equivalent layers (top + outerwear zones), innermost first
    ///
    /// Tops come before outerwear: an overshirt always sits outside a tee
    /// regardless of insertion order.
    pub fn top_equivalent_layers(&self) -> Vec<&GarmentItem> {
        let mut layers: Vec<&GarmentItem> = self.zone_items(Zone::Top).iter().collect();
        layers.extend(self.zone_items(Zone::Outerwear).iter());
        layers
    }
}

/// Classify the overall outfit shape from the populated zones
///
/// - 0 items -> empty
/// - one_piece worn, no top/bottom -> one_piece
/// - top and bottom present with extra layers (>1 in either, or
///   outerwear/accessories worn) -> layered
/// - exactly one top + one bottom and nothing else layered -> separates
/// - partial outfits (top only, bottom only, footwear only) read as
///   separates so the separates tree's per-zone rules apply
fn classify_zones(zones: &BTreeMap<Zone, Vec<GarmentItem>>) -> OutfitKind {
    let count = |z: Zone| zones.get(&z).map(Vec::len).unwrap_or(0);
    let total: usize = zones.values().map(Vec::len).sum();

    if total == 0 {
        return OutfitKind::Empty;
    }

    let tops = count(Zone::Top);
    let bottoms = count(Zone::Bottom);
    let one_pieces = count(Zone::OnePiece);
    let outer = count(Zone::Outerwear);
    let accessories = count(Zone::Accessories);

    if one_pieces > 0 && tops == 0 && bottoms == 0 {
        return OutfitKind::OnePiece;
    }

    if tops > 0 && bottoms > 0 {
        let extra_layers = tops > 1 || bottoms > 1 || outer > 0 || accessories > 0;
        if extra_layers {
            return OutfitKind::Layered;
        }
        return OutfitKind::Separates;
    }

    OutfitKind::Separates
}

/// Canonical zones still missing: body coverage (one_piece or top+bottom)
/// plus footwear
fn missing_zones(zones: &BTreeMap<Zone, Vec<GarmentItem>>) -> Vec<Zone> {
    let has = |z: Zone| zones.get(&z).is_some_and(|v| !v.is_empty());
    let mut missing = Vec::new();

    if !has(Zone::OnePiece) {
        if !has(Zone::Top) {
            missing.push(Zone::Top);
        }
        if !has(Zone::Bottom) {
            missing.push(Zone::Bottom);
        }
    }
    if !has(Zone::Footwear) {
        missing.push(Zone::Footwear);
    }

    missing
}
