//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless language-understanding client - each call is independent
///
/// The classifier and the outfit analyzer each make exactly one call per
/// turn through this trait. No conversation state lives behind it; the
/// orchestrator owns all state. Implementations may retry transient
/// transport failures internally but must surface everything else so the
/// call site can fall back to its documented default.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
