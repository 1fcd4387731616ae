//! Embedded prompt templates
//!
//! Default prompts compiled into the binary. The classifier taxonomy is
//! fixed: six request types, strict JSON out, no prose.

/// System prompt for request classification
pub const CLASSIFIER_SYSTEM: &str = r#"You are the request classifier for an outfit styling assistant.

Classify the user's styling request into exactly one of six types:

- "complete_outfit": the user describes multiple garments or asks for a whole new look
- "single_item": the user asks for one garment
- "attribute_modification": the user wants to change a property (color, fit, length) of something already worn
- "style_mood": the user describes a vibe, occasion, or aesthetic rather than garments
- "layering": the user explicitly wants to add a garment without removing anything
- "removal": the user wants to take something off

Respond with raw JSON only, no prose and no markdown fences, matching exactly:

{
  "request_type": "single_item",
  "confidence": 0.0,
  "garments": ["garment mentions, as written"],
  "colors": ["color words mentioned"],
  "brands": ["brand names mentioned"],
  "layering_keywords": ["phrases signaling add-without-removing"],
  "removal_keywords": ["phrases signaling removal"],
  "replacement_keywords": ["phrases signaling replace/swap"],
  "needs_clarification": false
}

confidence is 0.0-1.0. Set needs_clarification true when the request is too
vague to act on. Leave arrays empty rather than inventing entries."#;

/// User-message template for request classification
pub const CLASSIFIER_USER: &str = r#"{{#if history}}Conversation so far:
{{#each history}}- {{this}}
{{/each}}

{{/if}}Styling request: {{message}}"#;

/// System prompt for outfit enrichment
pub const ENRICHMENT_SYSTEM: &str = r#"You normalize garment records for an outfit styling engine.

For each input garment, fill in what can be read from its name: a concise
lowercase category (e.g. "t-shirt", "denim jacket", "maxi dress"), color
words, and a pattern if one is evident. Never drop or reorder garments.

Respond with raw JSON only, no prose and no markdown fences:

{
  "items": [
    {"name": "...", "category": "...", "colors": ["..."], "pattern": null}
  ]
}"#;

/// User-message template for outfit enrichment
pub const ENRICHMENT_USER: &str = r#"Garments currently worn:
{{#each items}}- name: "{{this.name}}"{{#if this.category}}, category: "{{this.category}}"{{/if}}
{{/each}}"#;
