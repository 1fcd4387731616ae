//! Compatibility checker
//!
//! Advisory post-decision checks over the proposed final item list. Four
//! independent rules, each yielding a pass/fail verdict with a message.
//! Never blocks an execute: the verdicts feed the response text and the
//! logs, nothing else.

mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::GarmentItem;

pub use rules::{check_color_harmony, check_formality, check_pattern_clash, check_seasonal_fit};

/// The four compatibility rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatRule {
    Formality,
    ColorHarmony,
    PatternClash,
    SeasonalFit,
}

impl std::fmt::Display for CompatRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompatRule::Formality => write!(f, "formality"),
            CompatRule::ColorHarmony => write!(f, "color_harmony"),
            CompatRule::PatternClash => write!(f, "pattern_clash"),
            CompatRule::SeasonalFit => write!(f, "seasonal_fit"),
        }
    }
}

/// One rule's verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatReport {
    pub rule: CompatRule,
    pub passed: bool,
    pub message: String,
}

/// Run all four rules over the proposed final item list
pub fn check_all(items: &[GarmentItem]) -> Vec<CompatReport> {
    let reports = vec![
        check_formality(items),
        check_color_harmony(items),
        check_pattern_clash(items),
        check_seasonal_fit(items),
    ];

    for report in &reports {
        if !report.passed {
            debug!(rule = %report.rule, message = %report.message, "check_all: advisory flag");
        }
    }

    reports
}
