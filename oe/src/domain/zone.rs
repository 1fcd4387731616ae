//! Garment zones and the category -> zone keyword table
//!
//! Zones are the six mutually organizing regions of an outfit. Everything
//! downstream (conflict detection, layering, clarification wording) keys off
//! this enum, so it stays closed and every dispatch over it is exhaustive.

use serde::{Deserialize, Serialize};

/// The six garment zones, in render stacking order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Top,
    Bottom,
    OnePiece,
    Outerwear,
    Footwear,
    Accessories,
}

impl Zone {
    /// All zones, iteration order is stacking priority (innermost first)
    pub fn all() -> [Zone; 6] {
        [
            Zone::Accessories,
            Zone::Footwear,
            Zone::Bottom,
            Zone::OnePiece,
            Zone::Top,
            Zone::Outerwear,
        ]
    }

    /// Fixed cross-zone stacking priority: outerwear > top > one_piece >
    /// bottom > footwear > accessories
    pub fn stack_priority(&self) -> u8 {
        match self {
            Zone::Accessories => 0,
            Zone::Footwear => 1,
            Zone::Bottom => 2,
            Zone::OnePiece => 3,
            Zone::Top => 4,
            Zone::Outerwear => 5,
        }
    }

    /// Whether this zone covers the torso/legs the way a top or bottom does
    ///
    /// A one_piece occupies both; used for conflict detection.
    pub fn conflicts_with(&self, other: Zone) -> bool {
        if *self == other {
            return true;
        }
        matches!(
            (self, other),
            (Zone::OnePiece, Zone::Top)
                | (Zone::OnePiece, Zone::Bottom)
                | (Zone::Top, Zone::OnePiece)
                | (Zone::Bottom, Zone::OnePiece)
        )
    }

    /// Whether items in this zone participate in top-equivalent layering
    pub fn is_top_equivalent(&self) -> bool {
        matches!(self, Zone::Top | Zone::Outerwear)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Top => write!(f, "top"),
            Zone::Bottom => write!(f, "bottom"),
            Zone::OnePiece => write!(f, "one_piece"),
            Zone::Outerwear => write!(f, "outerwear"),
            Zone::Footwear => write!(f, "footwear"),
            Zone::Accessories => write!(f, "accessories"),
        }
    }
}

/// Category keyword table
///
/// Matching picks the longest keyword contained in the category text, so
/// "shirt dress" lands in one_piece before "shirt" can pull it into top.
/// Unmapped text defaults to accessories as the least disruptive zone.
const KEYWORD_TABLE: &[(&str, Zone)] = &[
    // one-piece garments
    ("shirt dress", Zone::OnePiece),
    ("shift dress", Zone::OnePiece),
    ("maxi dress", Zone::OnePiece),
    ("mini dress", Zone::OnePiece),
    ("slip dress", Zone::OnePiece),
    ("sundress", Zone::OnePiece),
    ("dress", Zone::OnePiece),
    ("jumpsuit", Zone::OnePiece),
    ("romper", Zone::OnePiece),
    ("overalls", Zone::OnePiece),
    ("gown", Zone::OnePiece),
    ("kaftan", Zone::OnePiece),
    // outerwear
    ("denim jacket", Zone::Outerwear),
    ("leather jacket", Zone::Outerwear),
    ("bomber jacket", Zone::Outerwear),
    ("puffer", Zone::Outerwear),
    ("jacket", Zone::Outerwear),
    ("blazer", Zone::Outerwear),
    ("trench coat", Zone::Outerwear),
    ("coat", Zone::Outerwear),
    ("trench", Zone::Outerwear),
    ("parka", Zone::Outerwear),
    ("windbreaker", Zone::Outerwear),
    ("cardigan", Zone::Outerwear),
    ("overshirt", Zone::Outerwear),
    ("shacket", Zone::Outerwear),
    ("vest", Zone::Outerwear),
    // tops
    ("dress shirt", Zone::Top),
    ("crop top", Zone::Top),
    ("tank top", Zone::Top),
    ("tube top", Zone::Top),
    ("t-shirt", Zone::Top),
    ("tshirt", Zone::Top),
    ("tee", Zone::Top),
    ("tank", Zone::Top),
    ("camisole", Zone::Top),
    ("cami", Zone::Top),
    ("blouse", Zone::Top),
    ("sweatshirt", Zone::Top),
    ("shirt", Zone::Top),
    ("sweater", Zone::Top),
    ("hoodie", Zone::Top),
    ("jumper", Zone::Top),
    ("pullover", Zone::Top),
    ("flannel", Zone::Top),
    ("henley", Zone::Top),
    ("polo", Zone::Top),
    ("bodysuit", Zone::Top),
    ("turtleneck", Zone::Top),
    ("undershirt", Zone::Top),
    ("top", Zone::Top),
    // bottoms
    ("sweatpants", Zone::Bottom),
    ("jeans", Zone::Bottom),
    ("pants", Zone::Bottom),
    ("trousers", Zone::Bottom),
    ("chinos", Zone::Bottom),
    ("skirt", Zone::Bottom),
    ("shorts", Zone::Bottom),
    ("leggings", Zone::Bottom),
    ("joggers", Zone::Bottom),
    ("culottes", Zone::Bottom),
    ("cargos", Zone::Bottom),
    ("slacks", Zone::Bottom),
    // footwear
    ("dress shoes", Zone::Footwear),
    ("flip flops", Zone::Footwear),
    ("sneakers", Zone::Footwear),
    ("trainers", Zone::Footwear),
    ("boots", Zone::Footwear),
    ("heels", Zone::Footwear),
    ("sandals", Zone::Footwear),
    ("loafers", Zone::Footwear),
    ("flats", Zone::Footwear),
    ("mules", Zone::Footwear),
    ("oxfords", Zone::Footwear),
    ("pumps", Zone::Footwear),
    ("slides", Zone::Footwear),
    ("clogs", Zone::Footwear),
    ("shoes", Zone::Footwear),
    // accessories
    ("sunglasses", Zone::Accessories),
    ("glasses", Zone::Accessories),
    ("necklace", Zone::Accessories),
    ("earrings", Zone::Accessories),
    ("bracelet", Zone::Accessories),
    ("beanie", Zone::Accessories),
    ("scarf", Zone::Accessories),
    ("watch", Zone::Accessories),
    ("belt", Zone::Accessories),
    ("purse", Zone::Accessories),
    ("tote", Zone::Accessories),
    ("bag", Zone::Accessories),
    ("hat", Zone::Accessories),
    ("cap", Zone::Accessories),
    ("tights", Zone::Accessories),
    ("socks", Zone::Accessories),
    ("gloves", Zone::Accessories),
];

/// The zone a category text maps to, or None when no keyword matches
///
/// Longest contained keyword wins; ties go to the earlier table entry.
pub fn known_category(category: &str) -> Option<Zone> {
    let text = category.to_lowercase();
    let mut best: Option<(&str, Zone)> = None;

    for (keyword, zone) in KEYWORD_TABLE {
        if text.contains(keyword) {
            match best {
                Some((best_kw, _)) if best_kw.len() >= keyword.len() => {}
                _ => best = Some((keyword, *zone)),
            }
        }
    }

    best.map(|(_, zone)| zone)
}

/// Map free-text category (or garment name) to a zone
///
/// Unmapped text defaults to `accessories` - the engine never fails on an
/// unknown category.
pub fn zone_for_category(category: &str) -> Zone {
    known_category(category).unwrap_or(Zone::Accessories)
}

/// Whether the text is exactly one of the table's keywords
pub fn is_category_keyword(text: &str) -> bool {
    let text = text.to_lowercase();
    KEYWORD_TABLE.iter().any(|(keyword, _)| *keyword == text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_category_mapping() {
        assert_eq!(zone_for_category("t-shirt"), Zone::Top);
        assert_eq!(zone_for_category("jeans"), Zone::Bottom);
        assert_eq!(zone_for_category("sundress"), Zone::OnePiece);
        assert_eq!(zone_for_category("denim jacket"), Zone::Outerwear);
        assert_eq!(zone_for_category("sneakers"), Zone::Footwear);
        assert_eq!(zone_for_category("belt"), Zone::Accessories);
    }

    #[test]
    fn test_longest_keyword_wins() {
        // "shirt dress" contains both "shirt" (top) and "dress" (one_piece);
        // the longer compound keyword decides
        assert_eq!(zone_for_category("shirt dress"), Zone::OnePiece);
        assert_eq!(zone_for_category("dress shirt"), Zone::Top);
        assert_eq!(zone_for_category("dress shoes"), Zone::Footwear);
        assert_eq!(zone_for_category("crop top"), Zone::Top);
    }

    #[test]
    fn test_case_insensitive_and_embedded() {
        assert_eq!(zone_for_category("Vintage Leather Jacket"), Zone::Outerwear);
        assert_eq!(zone_for_category("HIGH-WAISTED JEANS"), Zone::Bottom);
    }

    #[test]
    fn test_unmapped_defaults_to_accessories() {
        assert_eq!(zone_for_category("thingamajig"), Zone::Accessories);
        assert_eq!(zone_for_category(""), Zone::Accessories);
    }

    #[test]
    fn test_known_category_distinguishes_real_accessories() {
        // "belt" is a mapped accessory; "thingamajig" only defaults to one
        assert_eq!(known_category("belt"), Some(Zone::Accessories));
        assert_eq!(known_category("thingamajig"), None);
    }

    #[test]
    fn test_hoodie_and_flannel_are_tops() {
        // Layering pieces that still read as tops, not outerwear
        assert_eq!(zone_for_category("hoodie"), Zone::Top);
        assert_eq!(zone_for_category("flannel"), Zone::Top);
        assert_eq!(zone_for_category("sweatshirt"), Zone::Top);
    }

    #[test]
    fn test_stack_priority_ordering() {
        assert!(Zone::Outerwear.stack_priority() > Zone::Top.stack_priority());
        assert!(Zone::Top.stack_priority() > Zone::OnePiece.stack_priority());
        assert!(Zone::OnePiece.stack_priority() > Zone::Bottom.stack_priority());
        assert!(Zone::Bottom.stack_priority() > Zone::Footwear.stack_priority());
        assert!(Zone::Footwear.stack_priority() > Zone::Accessories.stack_priority());
    }

    #[test]
    fn test_one_piece_conflicts_with_top_and_bottom() {
        assert!(Zone::OnePiece.conflicts_with(Zone::Top));
        assert!(Zone::OnePiece.conflicts_with(Zone::Bottom));
        assert!(Zone::Top.conflicts_with(Zone::OnePiece));
        assert!(Zone::Top.conflicts_with(Zone::Top));
        assert!(!Zone::Top.conflicts_with(Zone::Bottom));
        assert!(!Zone::Outerwear.conflicts_with(Zone::Top));
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Zone::OnePiece).unwrap(), "\"one_piece\"");
        let zone: Zone = serde_json::from_str("\"outerwear\"").unwrap();
        assert_eq!(zone, Zone::Outerwear);
    }
}
