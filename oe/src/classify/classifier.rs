//! RequestClassifier - LLM-backed intent classification with typed fallback
//!
//! One completion call with the fixed six-type taxonomy prompt, strict JSON
//! parsed out of the reply. Every failure mode (transport, fences, bad type
//! string, truncated JSON) collapses to the same documented default:
//! `single_item`, confidence 0, needs_clarification. This function never
//! returns an error.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::llm::{CompletionRequest, LlmClient, LlmError, extract_json_block};
use crate::prompts::{PromptRegistry, embedded};

use super::keywords;
use super::types::{ExtractedEntities, RequestClassification, RequestKind};

/// Max tokens for a classification reply; the JSON is small
const CLASSIFY_MAX_TOKENS: u32 = 1024;

/// Wire shape of the backend's classification JSON
#[derive(Debug, Deserialize)]
struct ClassificationOutput {
    request_type: String,
    #[serde(default)]
    confidence: f32,
    #[serde(default)]
    garments: Vec<String>,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    brands: Vec<String>,
    #[serde(default)]
    layering_keywords: Vec<String>,
    #[serde(default)]
    removal_keywords: Vec<String>,
    #[serde(default)]
    replacement_keywords: Vec<String>,
    #[serde(default)]
    needs_clarification: bool,
}

impl ClassificationOutput {
    fn into_classification(self) -> Result<RequestClassification, LlmError> {
        let kind = match self.request_type.as_str() {
            "complete_outfit" => RequestKind::CompleteOutfit,
            "single_item" => RequestKind::SingleItem,
            "attribute_modification" => RequestKind::AttributeModification,
            "style_mood" => RequestKind::StyleMood,
            "layering" => RequestKind::Layering,
            "removal" => RequestKind::Removal,
            other => {
                return Err(LlmError::Malformed(format!("unknown request_type: {other}")));
            }
        };

        Ok(RequestClassification {
            kind,
            confidence: self.confidence.clamp(0.0, 1.0),
            entities: ExtractedEntities {
                garments: self.garments,
                colors: self.colors,
                brands: self.brands,
                layering_keywords: self.layering_keywords,
                removal_keywords: self.removal_keywords,
                replacement_keywords: self.replacement_keywords,
            },
            needs_clarification: self.needs_clarification,
        })
    }
}

/// LLM-backed request classifier
pub struct RequestClassifier {
    llm: Arc<dyn LlmClient>,
    prompts: PromptRegistry,
}

impl RequestClassifier {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptRegistry) -> Self {
        Self { llm, prompts }
    }

    /// Classify a styling request
    ///
    /// Infallible by contract: backend or parse failure degrades to
    /// [`RequestClassification::fallback`]. The local keyword scans are
    /// merged into the entities on both paths.
    pub async fn classify(&self, message: &str, history: &[String]) -> RequestClassification {
        let mut classification = match self.try_classify(message, history).await {
            Ok(c) => {
                debug!(kind = %c.kind, confidence = c.confidence, "classify: backend result");
                c
            }
            Err(e) => {
                warn!(error = %e, "classify: degrading to fallback classification");
                RequestClassification::fallback()
            }
        };

        merge_keywords(&mut classification.entities.layering_keywords, keywords::scan_layering(message));
        merge_keywords(&mut classification.entities.removal_keywords, keywords::scan_removal(message));
        merge_keywords(
            &mut classification.entities.replacement_keywords,
            keywords::scan_replacement(message),
        );

        classification
    }

    async fn try_classify(&self, message: &str, history: &[String]) -> Result<RequestClassification, LlmError> {
        let user = self
            .prompts
            .render_classifier_user(message, history)
            .map_err(|e| LlmError::Malformed(e.to_string()))?;

        let request = CompletionRequest::single(embedded::CLASSIFIER_SYSTEM, user, CLASSIFY_MAX_TOKENS);
        let response = self.llm.complete(request).await?;

        let text = response
            .content
            .ok_or_else(|| LlmError::Malformed("empty classification reply".to_string()))?;
        let json = extract_json_block(&text)
            .ok_or_else(|| LlmError::Malformed("no JSON in classification reply".to_string()))?;

        let output: ClassificationOutput = serde_json::from_str(json)?;
        output.into_classification()
    }
}

/// Union new keyword hits into the existing list, preserving order
fn merge_keywords(existing: &mut Vec<String>, scanned: Vec<String>) {
    for kw in scanned {
        if !existing.contains(&kw) {
            existing.push(kw);
        }
    }
}
