//! Request classification types

use serde::{Deserialize, Serialize};

/// The six request types the engine routes on
///
/// Closed taxonomy: adding a variant is a compile-time obligation at every
/// dispatch site, which is exactly the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Multiple garments, full look regeneration
    CompleteOutfit,
    /// One garment
    SingleItem,
    /// Change a property of something already worn
    AttributeModification,
    /// Vibe or occasion; always routed to a suggestion, never silently executed
    StyleMood,
    /// Explicit add-without-removing
    Layering,
    /// Take something off
    Removal,
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKind::CompleteOutfit => write!(f, "complete_outfit"),
            RequestKind::SingleItem => write!(f, "single_item"),
            RequestKind::AttributeModification => write!(f, "attribute_modification"),
            RequestKind::StyleMood => write!(f, "style_mood"),
            RequestKind::Layering => write!(f, "layering"),
            RequestKind::Removal => write!(f, "removal"),
        }
    }
}

/// Entities pulled out of the request text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedEntities {
    /// Garment mentions, as written
    pub garments: Vec<String>,
    pub colors: Vec<String>,
    pub brands: Vec<String>,
    /// Phrases signaling add-without-removing
    pub layering_keywords: Vec<String>,
    /// Phrases signaling removal
    pub removal_keywords: Vec<String>,
    /// Phrases signaling explicit replace/swap
    pub replacement_keywords: Vec<String>,
}

/// Classified styling request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestClassification {
    pub kind: RequestKind,

    /// Backend confidence, 0.0 on the fallback path
    pub confidence: f32,

    pub entities: ExtractedEntities,

    /// Request too vague to act on without asking
    pub needs_clarification: bool,
}

impl RequestClassification {
    /// The documented default when the backend fails or returns garbage
    pub fn fallback() -> Self {
        Self {
            kind: RequestKind::SingleItem,
            confidence: 0.0,
            entities: ExtractedEntities::default(),
            needs_clarification: true,
        }
    }

    /// Synthetic high-confidence classification, used when replaying an
    /// answered clarification through the engine
    pub fn synthetic(kind: RequestKind) -> Self {
        Self {
            kind,
            confidence: 1.0,
            entities: ExtractedEntities::default(),
            needs_clarification: false,
        }
    }

    /// Whether the request carries add-without-removing language
    pub fn wants_layering(&self) -> bool {
        self.kind == RequestKind::Layering || !self.entities.layering_keywords.is_empty()
    }

    /// Whether the request carries removal language
    pub fn wants_removal(&self) -> bool {
        self.kind == RequestKind::Removal || !self.entities.removal_keywords.is_empty()
    }

    /// Whether the request carries explicit replace/swap language
    pub fn wants_replacement(&self) -> bool {
        !self.entities.replacement_keywords.is_empty()
    }
}
