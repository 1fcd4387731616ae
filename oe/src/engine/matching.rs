//! Mention -> worn-item matching
//!
//! Plain case-insensitive substring containment on name and category, in
//! both directions ("hoodie" finds "grey hoodie"; "my black leather jacket"
//! finds "leather jacket"). Deliberately simple and centralized here so a
//! scored matcher can replace it in one place; its over- and under-matching
//! behavior is pinned by tests.

use crate::domain::GarmentItem;

/// Minimum mention length considered meaningful
const MIN_MENTION_LEN: usize = 2;

/// Whether a free-text mention refers to this item
pub fn matches_mention(item: &GarmentItem, mention: &str) -> bool {
    let mention = mention.trim().to_lowercase();
    if mention.len() < MIN_MENTION_LEN {
        return false;
    }

    let name = item.name.trim().to_lowercase();
    let category = item.category.trim().to_lowercase();

    if name.contains(&mention) || (!category.is_empty() && category.contains(&mention)) {
        return true;
    }
    if name.len() >= 3 && mention.contains(&name) {
        return true;
    }
    if category.len() >= 3 && mention.contains(&category) {
        return true;
    }

    false
}

/// All worn items referred to by any of the mentions, deduplicated,
/// preserving worn order
pub fn find_matches(items: &[&GarmentItem], mentions: &[String]) -> Vec<GarmentItem> {
    let mut found: Vec<GarmentItem> = Vec::new();
    for item in items {
        let hit = mentions.iter().any(|m| matches_mention(item, m));
        if hit && !found.iter().any(|f| f.name == item.name && f.zone == item.zone) {
            found.push((*item).clone());
        }
    }
    found
}

/// The single item the mentions refer to, or None when zero or several match
pub fn resolve_unambiguous(items: &[&GarmentItem], mentions: &[String]) -> Option<GarmentItem> {
    let matches = find_matches(items, mentions);
    if matches.len() == 1 {
        matches.into_iter().next()
    } else {
        None
    }
}
