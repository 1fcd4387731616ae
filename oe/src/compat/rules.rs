//! The four compatibility rules
//!
//! Each rule is a pure function over the proposed final item list. Scores
//! and signal tables are keyword-driven: garments are duck-typed free text
//! all the way down, so this is heuristic by design. Advisory only.

use std::collections::BTreeSet;

use crate::domain::GarmentItem;

use super::{CompatReport, CompatRule};

/// Formality keywords, most formal first; first hit wins
const FORMALITY_TABLE: &[(&str, u8)] = &[
    ("tuxedo", 5),
    ("gown", 5),
    ("suit", 5),
    ("oxfords", 4),
    ("pumps", 4),
    ("heels", 4),
    ("blazer", 4),
    ("dress shirt", 4),
    ("slacks", 4),
    ("trousers", 4),
    ("loafers", 4),
    ("trench", 4),
    ("blouse", 3),
    ("flip flops", 1),
    ("sweatpants", 1),
    ("joggers", 1),
    ("hoodie", 1),
    ("sweatshirt", 1),
    ("sneakers", 2),
    ("trainers", 2),
    ("jeans", 2),
    ("t-shirt", 2),
    ("tee", 2),
    ("tank", 2),
    ("shorts", 2),
];

/// Recognized color words, scanned from colors and names
const COLOR_WORDS: &[&str] = &[
    "black", "white", "red", "blue", "navy", "green", "pink", "orange", "brown", "grey", "gray", "purple", "yellow",
    "beige", "cream", "tan", "burgundy", "olive", "teal",
];

/// Color pairs that read as clashing
const CLASH_PAIRS: &[(&str, &str)] = &[
    ("red", "pink"),
    ("red", "orange"),
    ("orange", "pink"),
    ("brown", "black"),
    ("navy", "black"),
    ("green", "orange"),
];

/// Distinct colors beyond this count read as busy
const MAX_DISTINCT_COLORS: usize = 3;

/// Loud patterns; two distinct ones clash
const LOUD_PATTERNS: &[&str] = &[
    "stripe", "plaid", "floral", "polka", "leopard", "zebra", "animal", "check", "paisley", "camo",
];

/// Cold-weather signals
const WINTER_SIGNALS: &[&str] = &["wool", "fleece", "puffer", "parka", "beanie", "gloves", "thermal", "shearling"];

/// Warm-weather signals
const SUMMER_SIGNALS: &[&str] = &["linen", "flip flop", "sandal", "tank", "shorts", "sundress"];

fn item_text(item: &GarmentItem) -> String {
    let mut text = item.match_text();
    for color in &item.colors {
        text.push(' ');
        text.push_str(&color.to_lowercase());
    }
    if let Some(pattern) = &item.pattern {
        text.push(' ');
        text.push_str(&pattern.to_lowercase());
    }
    text
}

fn formality_score(item: &GarmentItem) -> u8 {
    let text = item.match_text();
    FORMALITY_TABLE
        .iter()
        .find(|(kw, _)| text.contains(kw))
        .map(|(_, score)| *score)
        .unwrap_or(3)
}

/// Formality spread: the most and least formal pieces must be within two
/// levels of each other
pub fn check_formality(items: &[GarmentItem]) -> CompatReport {
    let scores: Vec<(u8, &GarmentItem)> = items.iter().map(|i| (formality_score(i), i)).collect();
    let high = scores.iter().max_by_key(|(s, _)| *s);
    let low = scores.iter().min_by_key(|(s, _)| *s);

    if let (Some((hi, hi_item)), Some((lo, lo_item))) = (high, low) {
        if hi - lo >= 3 {
            return CompatReport {
                rule: CompatRule::Formality,
                passed: false,
                message: format!(
                    "{} is much dressier than {}; the formality gap may look unintentional",
                    hi_item.name, lo_item.name
                ),
            };
        }
    }

    CompatReport {
        rule: CompatRule::Formality,
        passed: true,
        message: "formality levels are consistent".to_string(),
    }
}

fn colors_of(item: &GarmentItem) -> BTreeSet<&'static str> {
    let text = item_text(item);
    COLOR_WORDS.iter().filter(|c| text.contains(*c)).copied().collect()
}

/// Color harmony: no known clashing pair, and not too many distinct colors
pub fn check_color_harmony(items: &[GarmentItem]) -> CompatReport {
    let mut palette: BTreeSet<&'static str> = BTreeSet::new();
    for item in items {
        palette.extend(colors_of(item));
    }
    // grey/gray are the same color, not two
    if palette.contains("gray") && palette.contains("grey") {
        palette.remove("gray");
    }

    for (a, b) in CLASH_PAIRS {
        if palette.contains(a) && palette.contains(b) {
            return CompatReport {
                rule: CompatRule::ColorHarmony,
                passed: false,
                message: format!("{a} and {b} tend to clash"),
            };
        }
    }

    if palette.len() > MAX_DISTINCT_COLORS {
        return CompatReport {
            rule: CompatRule::ColorHarmony,
            passed: false,
            message: format!("{} distinct colors may read as busy", palette.len()),
        };
    }

    CompatReport {
        rule: CompatRule::ColorHarmony,
        passed: true,
        message: "colors work together".to_string(),
    }
}

/// Pattern clash: at most one loud pattern per outfit
pub fn check_pattern_clash(items: &[GarmentItem]) -> CompatReport {
    let mut loud: BTreeSet<&'static str> = BTreeSet::new();
    for item in items {
        let text = item_text(item);
        loud.extend(LOUD_PATTERNS.iter().filter(|p| text.contains(*p)).copied());
    }

    if loud.len() >= 2 {
        let list: Vec<&str> = loud.into_iter().collect();
        return CompatReport {
            rule: CompatRule::PatternClash,
            passed: false,
            message: format!("{} together compete for attention", list.join(" and ")),
        };
    }

    CompatReport {
        rule: CompatRule::PatternClash,
        passed: true,
        message: "patterns don't compete".to_string(),
    }
}

/// Seasonal fit: cold-weather and warm-weather pieces shouldn't mix
pub fn check_seasonal_fit(items: &[GarmentItem]) -> CompatReport {
    let mut winter: Option<&GarmentItem> = None;
    let mut summer: Option<&GarmentItem> = None;

    for item in items {
        let text = item_text(item);
        if winter.is_none() && WINTER_SIGNALS.iter().any(|s| text.contains(s)) {
            winter = Some(item);
        }
        if summer.is_none() && SUMMER_SIGNALS.iter().any(|s| text.contains(s)) {
            summer = Some(item);
        }
    }

    if let (Some(w), Some(s)) = (winter, summer) {
        return CompatReport {
            rule: CompatRule::SeasonalFit,
            passed: false,
            message: format!("{} and {} belong to different seasons", w.name, s.name),
        };
    }

    CompatReport {
        rule: CompatRule::SeasonalFit,
        passed: true,
        message: "seasonally consistent".to_string(),
    }
}
