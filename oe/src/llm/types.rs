//! LLM request/response types
//!
//! Modeled on the Anthropic Messages API but provider-agnostic: one system
//! prompt, a short message history, and a plain-text reply. The engine never
//! streams and never hands the model tools; every call is a single strict
//! question with a strict JSON answer expected.

use serde::{Deserialize, Serialize};

/// A completion request - everything needed for one backend call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt (rendered from a Handlebars template)
    pub system_prompt: String,

    /// Conversation messages, oldest first
    pub messages: Vec<Message>,

    /// Max tokens for the reply
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Convenience constructor for the common one-question shape
    pub fn single(system_prompt: impl Into<String>, user_text: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages: vec![Message::user(user_text)],
            max_tokens,
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content of the reply (None when the model returned nothing usable)
    pub content: Option<String>,

    /// Token accounting for observability
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Build a plain-text response (mainly for tests)
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            usage: TokenUsage::default(),
        }
    }
}

/// Token usage accounting
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens consumed by the call
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}
