//! Deterministic keyword scans for layering/removal/replacement language
//!
//! The backend is asked to extract these phrases, but the decision trees
//! depend on them, so a local scan backstops the oracle: whatever it misses
//! is merged in here before the classification reaches the engine.

/// Phrases signaling "add without removing anything"
const LAYERING_KEYWORDS: &[&str] = &[
    "layer",
    "layering",
    "layered",
    "on top of",
    "on top",
    "over it",
    "over my",
    "over the",
    "over this",
    "underneath",
    "under my",
    "under the",
    "without removing",
    "without taking",
    "keep the",
    "keep my",
    "keep everything",
    "as well",
    "also wear",
    "add another",
];

/// Phrases signaling removal
const REMOVAL_KEYWORDS: &[&str] = &[
    "remove",
    "take off",
    "take it off",
    "take that off",
    "get rid of",
    "lose the",
    "lose my",
    "ditch the",
    "ditch my",
    "drop the",
    "no more",
];

/// Phrases signaling an explicit replace/swap
const REPLACEMENT_KEYWORDS: &[&str] = &[
    "instead of",
    "instead",
    "replace",
    "replacing",
    "swap",
    "switch",
    "rather than",
    "in place of",
    "change the",
    "change my",
];

fn scan(message: &str, table: &[&'static str]) -> Vec<String> {
    let text = message.to_lowercase();
    table
        .iter()
        .filter(|kw| text.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}

/// Layering phrases present in the message
pub fn scan_layering(message: &str) -> Vec<String> {
    scan(message, LAYERING_KEYWORDS)
}

/// Removal phrases present in the message
pub fn scan_removal(message: &str) -> Vec<String> {
    scan(message, REMOVAL_KEYWORDS)
}

/// Replace/swap phrases present in the message
pub fn scan_replacement(message: &str) -> Vec<String> {
    scan(message, REPLACEMENT_KEYWORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layering_scan() {
        let hits = scan_layering("add a cardigan over it, keep my tee");
        assert!(hits.contains(&"over it".to_string()));
        assert!(hits.contains(&"keep my".to_string()));
        assert!(scan_layering("a blouse").is_empty());
    }

    #[test]
    fn test_removal_scan() {
        assert!(!scan_removal("take off my hoodie").is_empty());
        assert!(!scan_removal("get rid of the scarf").is_empty());
        assert!(scan_removal("a leather jacket").is_empty());
    }

    #[test]
    fn test_replacement_scan() {
        assert!(!scan_replacement("a parka instead of the denim jacket").is_empty());
        assert!(!scan_replacement("swap the blazer for something casual").is_empty());
        assert!(scan_replacement("a parka").is_empty());
    }

    #[test]
    fn test_scans_are_case_insensitive() {
        assert!(!scan_removal("TAKE OFF the hat").is_empty());
        assert!(!scan_layering("LAYER this").is_empty());
    }
}
