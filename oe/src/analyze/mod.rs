//! Outfit state analysis
//!
//! The state model's fallible half: one enrichment call that normalizes
//! duck-typed garment records (category, colors, pattern) before the pure
//! snapshot build. When every item already carries a category the call is
//! skipped; when the call is made and fails, the analyzer degrades to the
//! empty state with all canonical zones missing rather than erroring.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{GarmentItem, OutfitState};
use crate::llm::{CompletionRequest, LlmClient, LlmError, extract_json_block};
use crate::prompts::{PromptRegistry, embedded};

/// Max tokens for an enrichment reply
const ENRICH_MAX_TOKENS: u32 = 1024;

/// Wire shape of the backend's enrichment JSON
#[derive(Debug, Deserialize)]
struct EnrichmentOutput {
    items: Vec<EnrichedItem>,
}

#[derive(Debug, Deserialize)]
struct EnrichedItem {
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    pattern: Option<String>,
}

/// LLM-backed outfit analyzer
pub struct OutfitAnalyzer {
    llm: Arc<dyn LlmClient>,
    prompts: PromptRegistry,
}

impl OutfitAnalyzer {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptRegistry) -> Self {
        Self { llm, prompts }
    }

    /// Build the outfit snapshot for the worn items
    ///
    /// Infallible by contract: enrichment failure degrades to
    /// [`OutfitState::empty`], never an error.
    pub async fn analyze(&self, items: &[GarmentItem]) -> OutfitState {
        if items.is_empty() {
            return OutfitState::empty();
        }

        if items.iter().all(|i| !i.category.trim().is_empty()) {
            debug!(count = items.len(), "analyze: all categories present, pure path");
            return OutfitState::from_items(items);
        }

        match self.enrich(items).await {
            Ok(enriched) => OutfitState::from_items(&enriched),
            Err(e) => {
                warn!(error = %e, "analyze: enrichment failed, degrading to empty state");
                OutfitState::empty()
            }
        }
    }

    /// One enrichment call; merges the backend's normalization into copies
    /// of the input items, matched by position (the prompt forbids
    /// dropping or reordering)
    async fn enrich(&self, items: &[GarmentItem]) -> Result<Vec<GarmentItem>, LlmError> {
        let user = self
            .prompts
            .render_enrichment_user(items)
            .map_err(|e| LlmError::Malformed(e.to_string()))?;

        let request = CompletionRequest::single(embedded::ENRICHMENT_SYSTEM, user, ENRICH_MAX_TOKENS);
        let response = self.llm.complete(request).await?;

        let text = response
            .content
            .ok_or_else(|| LlmError::Malformed("empty enrichment reply".to_string()))?;
        let json = extract_json_block(&text)
            .ok_or_else(|| LlmError::Malformed("no JSON in enrichment reply".to_string()))?;
        let output: EnrichmentOutput = serde_json::from_str(json)?;

        if output.items.len() != items.len() {
            return Err(LlmError::Malformed(format!(
                "enrichment returned {} items for {} garments",
                output.items.len(),
                items.len()
            )));
        }

        let merged = items
            .iter()
            .zip(output.items)
            .map(|(item, enriched)| merge_item(item, enriched))
            .collect();
        Ok(merged)
    }
}

/// Fill gaps in a garment record from its enriched counterpart
///
/// Existing caller-supplied fields always win; enrichment only fills what
/// was missing. The zone is rederived when the category changed.
fn merge_item(item: &GarmentItem, enriched: EnrichedItem) -> GarmentItem {
    let mut merged = item.clone();

    if merged.category.trim().is_empty() && !enriched.category.trim().is_empty() {
        let name = if merged.name.trim().is_empty() {
            enriched.name.clone()
        } else {
            merged.name.clone()
        };
        merged = GarmentItem::new(name, enriched.category);
        merged.colors = item.colors.clone();
        merged.pattern = item.pattern.clone();
        merged.brand = item.brand.clone();
        merged.image_url = item.image_url.clone();
        merged.product_url = item.product_url.clone();
    }
    if merged.colors.is_empty() {
        merged.colors = enriched.colors;
    }
    if merged.pattern.is_none() {
        merged.pattern = enriched.pattern;
    }

    merged
}
