//! Helpers for digging strict JSON out of model replies
//!
//! Backends are asked for raw JSON but routinely wrap it in markdown fences
//! or conversational filler. Extraction here is deliberately forgiving; the
//! serde parse that follows is the strict part.

use regex::Regex;
use std::sync::OnceLock;

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("static regex"))
}

/// Extract the JSON object from a model reply
///
/// Tries, in order: a fenced ```json block, then the outermost `{...}`
/// span, then the trimmed text as-is. Returns None only for empty input.
pub fn extract_json_block(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = fence_re().captures(trimmed) {
        if let Some(inner) = caps.get(1) {
            return Some(inner.as_str());
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return Some(&trimmed[start..=end]);
        }
    }

    Some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_json_passes_through() {
        let text = r#"{"kind": "single_item"}"#;
        assert_eq!(extract_json_block(text), Some(text));
    }

    #[test]
    fn test_strips_json_fence() {
        let text = "```json\n{\"kind\": \"removal\"}\n```";
        assert_eq!(extract_json_block(text), Some("{\"kind\": \"removal\"}"));
    }

    #[test]
    fn test_strips_anonymous_fence() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_block(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_finds_object_inside_chatter() {
        let text = "Sure! Here is the classification: {\"kind\": \"layering\"} Hope that helps.";
        assert_eq!(extract_json_block(text), Some("{\"kind\": \"layering\"}"));
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert_eq!(extract_json_block("   "), None);
    }
}
