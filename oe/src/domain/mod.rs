//! Garment and outfit domain types
//!
//! Pure data model: zones, garments, and the zone-organized outfit
//! snapshot. Nothing here performs I/O; the snapshot is recomputed from the
//! authoritative item list every turn.

mod garment;
mod outfit;
mod zone;

pub use garment::{GarmentItem, GarmentSpec};
pub use outfit::{OutfitKind, OutfitState};
pub use zone::{Zone, is_category_keyword, known_category, zone_for_category};
