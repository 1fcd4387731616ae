//! Response generator
//!
//! Deterministic templating of a decision into user-facing text. Pure
//! function of its inputs: the phrase pool is indexed by a seeded hash of
//! the decision, never by entropy, so fixed inputs always produce the same
//! sentence and tests can pin exact strings.

use eyre::{Context, Result};
use handlebars::Handlebars;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::hash::{DefaultHasher, Hash, Hasher};
use tracing::warn;

use crate::classify::RequestKind;
use crate::compat::CompatReport;
use crate::domain::OutfitState;
use crate::engine::{DecisionAction, DecisionResult};

/// Openers for applied mutations
const EXECUTE_OPENERS: [&str; 3] = ["Done!", "All set.", "You got it."];

/// Openers for suggestions awaiting approval
const SUGGEST_OPENERS: [&str; 3] = ["Here's a thought:", "How about this:", "One idea:"];

const EXECUTED_TEMPLATE: &str = "{{opener}}{{#if added}} Added {{added}}.{{/if}}{{#if removed}} Removed {{removed}}.{{/if}}{{#if missing}} Your outfit still needs: {{missing}}.{{/if}}{{#each advisories}} Style note: {{this}}.{{/each}}";

const CLARIFY_TEMPLATE: &str = "{{question}}{{#if options}}\n{{#each options}}{{indexed}}\n{{/each}}{{/if}}";

const SUGGEST_TEMPLATE: &str =
    "{{opener}} {{#if added}}{{added}}{{else}}a fresh look{{/if}}{{#if removed}} in place of {{removed}}{{/if}}. Want me to go ahead?{{#each advisories}} Style note: {{this}}.{{/each}}";

/// Deterministic response templating
pub struct ResponseGenerator {
    handlebars: Handlebars<'static>,
    seed: u64,
}

impl ResponseGenerator {
    /// Generator with the default seed
    pub fn new() -> Result<Self> {
        Self::with_seed(0)
    }

    /// Generator with an explicit phrase-pool seed (tests pin this)
    pub fn with_seed(seed: u64) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        // plain text output, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string("executed", EXECUTED_TEMPLATE)
            .context("Failed to compile executed template")?;
        handlebars
            .register_template_string("clarify", CLARIFY_TEMPLATE)
            .context("Failed to compile clarify template")?;
        handlebars
            .register_template_string("suggest", SUGGEST_TEMPLATE)
            .context("Failed to compile suggest template")?;

        Ok(Self { handlebars, seed })
    }

    /// Render the decision into user-facing text
    ///
    /// Infallible by contract: a template failure degrades to the
    /// decision's reasoning string rather than erroring at the user.
    pub fn render(
        &self,
        kind: RequestKind,
        decision: &DecisionResult,
        state: &OutfitState,
        compat: &[CompatReport],
    ) -> String {
        match self.try_render(kind, decision, state, compat) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "render: template failure, falling back to reasoning");
                decision.reasoning.clone()
            }
        }
    }

    fn try_render(
        &self,
        kind: RequestKind,
        decision: &DecisionResult,
        state: &OutfitState,
        compat: &[CompatReport],
    ) -> Result<String> {
        let added = join_names(decision.items_to_add.iter().map(|i| i.name.as_str()));
        let removed = join_names(decision.items_to_remove.iter().map(|i| i.name.as_str()));
        let advisories: Vec<&str> = compat.iter().filter(|r| !r.passed).map(|r| r.message.as_str()).collect();

        let text = match decision.action {
            DecisionAction::Execute => {
                let missing = join_names(state.missing_zones.iter().map(|z| match z {
                    crate::domain::Zone::Top => "a top",
                    crate::domain::Zone::Bottom => "a bottom",
                    crate::domain::Zone::Footwear => "footwear",
                    _ => "an accessory",
                }));
                self.handlebars.render(
                    "executed",
                    &json!({
                        "opener": self.pick(&EXECUTE_OPENERS, kind, decision),
                        "added": added,
                        "removed": removed,
                        "missing": missing,
                        "advisories": advisories,
                    }),
                )?
            }
            DecisionAction::Clarify => {
                let prompt = decision
                    .clarification
                    .as_ref()
                    .ok_or_else(|| eyre::eyre!("clarify decision without a prompt"))?;
                let options: Vec<_> = prompt
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, o)| json!({ "indexed": format!("{}) {}", i + 1, o) }))
                    .collect();
                self.handlebars.render(
                    "clarify",
                    &json!({
                        "question": prompt.question,
                        "options": options,
                    }),
                )?
            }
            DecisionAction::Suggest => self.handlebars.render(
                "suggest",
                &json!({
                    "opener": self.pick(&SUGGEST_OPENERS, kind, decision),
                    "added": added,
                    "removed": removed,
                    "advisories": advisories,
                }),
            )?,
        };

        Ok(text.trim().to_string())
    }

    /// Seeded pick from a phrase pool; a pure function of (seed, inputs)
    fn pick<'a>(&self, pool: &[&'a str], kind: RequestKind, decision: &DecisionResult) -> &'a str {
        let mut hasher = DefaultHasher::new();
        kind.to_string().hash(&mut hasher);
        for item in &decision.items_to_add {
            item.name.hash(&mut hasher);
        }
        for item in &decision.items_to_remove {
            item.name.hash(&mut hasher);
        }
        let mut rng = StdRng::seed_from_u64(self.seed ^ hasher.finish());
        pool[rng.random_range(0..pool.len())]
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let collected: Vec<&str> = names.collect();
    match collected.len() {
        0 => String::new(),
        1 => collected[0].to_string(),
        _ => {
            let (last, rest) = collected.split_last().expect("len checked above");
            format!("{} and {}", rest.join(", "), last)
        }
    }
}
