//! Request classification
//!
//! Maps a free-text styling request to one of six intent types plus
//! extracted entities, via a fallible language-understanding call with a
//! typed fallback. Business code downstream never sees a classification
//! error; it sees the documented default.

mod classifier;
pub mod keywords;
mod types;

pub use classifier::RequestClassifier;
pub use types::{ExtractedEntities, RequestClassification, RequestKind};
