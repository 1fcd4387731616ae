//! Anthropic Claude API client implementation
//!
//! Implements the LlmClient trait for Anthropic's Messages API. Transient
//! transport failures (408/429/5xx/529) are retried with exponential backoff
//! up to a configured cap; everything else surfaces to the call site, which
//! owns the fallback.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, TokenUsage};
use crate::config::LlmConfig;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504 | 529)
}

/// Anthropic Claude API client
pub struct AnthropicClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
    max_retries: u32,
    timeout: Duration,
}

impl AnthropicClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in the config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, "AnthropicClient::from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| LlmError::Malformed(e.to_string()))?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
            max_retries: config.max_retries,
            timeout,
        })
    }

    /// Build the request body for the Messages API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_tokens.min(self.max_tokens),
            "system": request.system_prompt,
            "messages": request
                .messages
                .iter()
                .map(|m| serde_json::json!({ "role": m.role, "content": m.content }))
                .collect::<Vec<_>>(),
        })
    }

    /// One attempt against the API, no retry handling
    async fn attempt(&self, body: &serde_json::Value) -> Result<CompletionResponse, LlmError> {
        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Network(e)
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(30));
            return Err(LlmError::RateLimited { retry_after });
        }
        if !(200..300).contains(&status) {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, message });
        }

        let api_response: ApiResponse = response.json().await.map_err(LlmError::Network)?;
        Ok(parse_response(api_response))
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(model = %self.model, message_count = request.messages.len(), "complete: called");
        let body = self.build_request_body(&request);

        let mut backoff = Duration::from_millis(INITIAL_BACKOFF_MS);
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            match self.attempt(&body).await {
                Ok(resp) => {
                    debug!(
                        attempt,
                        input_tokens = resp.usage.input_tokens,
                        output_tokens = resp.usage.output_tokens,
                        "complete: success"
                    );
                    return Ok(resp);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let wait = e.retry_after().unwrap_or(backoff);
                    warn!(attempt, error = %e, wait_ms = wait.as_millis() as u64, "complete: retrying");
                    tokio::time::sleep(wait).await;
                    backoff *= 2;
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or_else(|| LlmError::Malformed("retry loop exited without result".to_string())))
    }
}

/// Raw Messages API response shape
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ApiContentBlock>,
    #[serde(default)]
    usage: ApiUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ApiContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

/// Collapse the content blocks into the plain-text reply the engine wants
fn parse_response(api: ApiResponse) -> CompletionResponse {
    let mut text = String::new();
    for block in api.content {
        if let ApiContentBlock::Text { text: t } = block {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&t);
        }
    }

    CompletionResponse {
        content: if text.is_empty() { None } else { Some(text) },
        usage: TokenUsage {
            input_tokens: api.usage.input_tokens,
            output_tokens: api.usage.output_tokens,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_status_codes() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(529));
        assert!(!is_retryable_status(200));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(401));
    }

    #[test]
    fn test_parse_response_joins_text_blocks() {
        let api: ApiResponse = serde_json::from_str(
            r#"{
                "content": [
                    {"type": "text", "text": "{\"kind\":"},
                    {"type": "text", "text": "\"removal\"}"}
                ],
                "usage": {"input_tokens": 10, "output_tokens": 5}
            }"#,
        )
        .unwrap();

        let resp = parse_response(api);
        assert_eq!(resp.content.as_deref(), Some("{\"kind\":\n\"removal\"}"));
        assert_eq!(resp.usage.total(), 15);
    }

    #[test]
    fn test_parse_response_without_text_is_none() {
        let api: ApiResponse = serde_json::from_str(r#"{"content": [], "usage": {}}"#).unwrap();
        let resp = parse_response(api);
        assert!(resp.content.is_none());
    }

    #[test]
    fn test_parse_response_skips_unknown_blocks() {
        let api: ApiResponse = serde_json::from_str(
            r#"{"content": [{"type": "thinking", "thinking": "hmm"}, {"type": "text", "text": "ok"}]}"#,
        )
        .unwrap();
        let resp = parse_response(api);
        assert_eq!(resp.content.as_deref(), Some("ok"));
    }
}
