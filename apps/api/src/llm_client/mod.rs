/// LLM Client — the only place that talks to network text-generation backends.
///
/// ARCHITECTURAL RULE: enhancement code never calls a provider API directly.
/// Every backend implements `TextBackend` and is reached through `AiServiceManager`.
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use thiserror::Error;
use tracing::warn;

pub mod anthropic;
pub mod openai;
pub mod prompts;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

const MAX_RETRIES: u32 = 3;
/// Client-side timeout for a single backend call.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Quota or balance exhausted: {0}")]
    QuotaExceeded(String),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("No text-generation backend is configured")]
    Unavailable,
}

impl LlmError {
    /// True for failures that mean "no backend could answer" rather than a
    /// configuration or billing problem. Callers fall back to rule-based output.
    pub fn is_unavailable(&self) -> bool {
        match self {
            LlmError::Unavailable | LlmError::Http(_) | LlmError::RateLimited { .. } => true,
            LlmError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// A network text-generation service. Implementations own their HTTP client,
/// credentials and model name.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Stable identifier used in status reports, e.g. "anthropic".
    fn name(&self) -> &'static str;

    fn model(&self) -> &str;

    /// Sends a single-turn prompt and returns the generated text.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

pub(crate) fn build_http_client() -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(LlmError::Http)
}

/// Sends a request, retrying 429 and 5xx responses with exponential backoff.
/// `build` must produce a fresh request for every attempt.
/// Non-retryable failures are classified with `classify_api_error`.
pub(crate) async fn send_with_retry<F>(backend: &str, build: F) -> Result<Response, LlmError>
where
    F: Fn() -> RequestBuilder,
{
    let mut last_error: Option<LlmError> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 1s, 2s
            let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
            warn!(
                "{} call attempt {} failed, retrying after {}ms...",
                backend,
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }

        let response = match build().send().await {
            Ok(r) => r,
            Err(e) => {
                last_error = Some(LlmError::Http(e));
                continue;
            }
        };

        let status = response.status();

        if status.as_u16() == 429 || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} API returned {}: {}", backend, status, body);
            last_error = Some(classify_api_error(status.as_u16(), extract_error_message(&body)));
            // Quota exhaustion is reported as 429 by some providers; retrying won't help.
            if matches!(last_error, Some(LlmError::QuotaExceeded(_))) {
                break;
            }
            continue;
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(
                status.as_u16(),
                extract_error_message(&body),
            ));
        }

        return Ok(response);
    }

    Err(last_error.unwrap_or(LlmError::RateLimited {
        retries: MAX_RETRIES,
    }))
}

/// Maps a failed provider response onto the error taxonomy.
pub fn classify_api_error(status: u16, message: String) -> LlmError {
    let lower = message.to_lowercase();
    let mentions_quota = ["balance", "quota", "billing", "credit"]
        .iter()
        .any(|needle| lower.contains(needle));

    match status {
        401 | 403 => LlmError::Auth(message),
        402 => LlmError::QuotaExceeded(message),
        _ if mentions_quota => LlmError::QuotaExceeded(message),
        _ => LlmError::Api { status, message },
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the raw body.
/// Anthropic and OpenAI-compatible APIs share this shape.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n[\"Rust\", \"SQL\"]\n```";
        assert_eq!(strip_json_fences(input), "[\"Rust\", \"SQL\"]");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n[\"Rust\"]\n```";
        assert_eq!(strip_json_fences(input), "[\"Rust\"]");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "[\"Rust\"]";
        assert_eq!(strip_json_fences(input), "[\"Rust\"]");
    }

    #[test]
    fn test_classify_401_is_auth() {
        let err = classify_api_error(401, "invalid x-api-key".to_string());
        assert!(matches!(err, LlmError::Auth(_)));
    }

    #[test]
    fn test_classify_402_is_quota() {
        let err = classify_api_error(402, "Insufficient Balance".to_string());
        assert!(matches!(err, LlmError::QuotaExceeded(_)));
    }

    #[test]
    fn test_classify_low_credit_message_is_quota() {
        let err = classify_api_error(
            400,
            "Your credit balance is too low to access the API".to_string(),
        );
        assert!(matches!(err, LlmError::QuotaExceeded(_)));
    }

    #[test]
    fn test_classify_plain_400_is_api_error() {
        let err = classify_api_error(400, "max_tokens: field required".to_string());
        assert!(matches!(err, LlmError::Api { status: 400, .. }));
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_server_errors_count_as_unavailable() {
        let err = LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert!(err.is_unavailable());
        assert!(LlmError::Unavailable.is_unavailable());
        assert!(!LlmError::Auth("bad key".to_string()).is_unavailable());
        assert!(!LlmError::QuotaExceeded("empty".to_string()).is_unavailable());
    }

    #[test]
    fn test_extract_error_message_from_provider_body() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        assert_eq!(extract_error_message(body), "invalid x-api-key");
        assert_eq!(extract_error_message("gateway timeout"), "gateway timeout");
    }
}
