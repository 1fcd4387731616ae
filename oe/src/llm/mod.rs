//! Language-understanding port
//!
//! The engine treats its language backend as an unreliable oracle: one
//! stateless completion call per request, strict JSON expected back, and a
//! documented default at every call site when the oracle fails. This module
//! holds the client trait, the Anthropic implementation, and the helpers for
//! digging JSON out of model replies.

mod anthropic;
mod client;
mod error;
mod json;
mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
#[cfg(test)]
pub use client::mock::MockLlmClient;
pub use error::LlmError;
pub use json::extract_json_block;
pub use types::{CompletionRequest, CompletionResponse, Message, Role, TokenUsage};
