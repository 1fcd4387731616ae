//! Prompt rendering
//!
//! Handlebars registry over the embedded templates, with one typed render
//! function per call site so template data never drifts from its schema.

pub mod embedded;

use eyre::{Context, Result};
use handlebars::Handlebars;
use serde_json::json;

use crate::domain::GarmentItem;

/// Registry of compiled prompt templates
pub struct PromptRegistry {
    handlebars: Handlebars<'static>,
}

impl PromptRegistry {
    /// Compile the embedded templates
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        // prompts are plain text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string("classifier-user", embedded::CLASSIFIER_USER)
            .context("Failed to compile classifier-user template")?;
        handlebars
            .register_template_string("enrichment-user", embedded::ENRICHMENT_USER)
            .context("Failed to compile enrichment-user template")?;

        Ok(Self { handlebars })
    }

    /// Render the classifier user message
    pub fn render_classifier_user(&self, message: &str, history: &[String]) -> Result<String> {
        self.handlebars
            .render("classifier-user", &json!({ "message": message, "history": history }))
            .context("Failed to render classifier-user template")
    }

    /// Render the enrichment user message
    pub fn render_enrichment_user(&self, items: &[GarmentItem]) -> Result<String> {
        let items: Vec<_> = items
            .iter()
            .map(|i| json!({ "name": i.name, "category": i.category }))
            .collect();
        self.handlebars
            .render("enrichment-user", &json!({ "items": items }))
            .context("Failed to render enrichment-user template")
    }
}
