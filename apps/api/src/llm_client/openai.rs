//! OpenAI-compatible chat-completions backend.
//! The base URL is configurable, so any provider speaking this protocol works.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm_client::{build_http_client, send_with_retry, LlmError, TextBackend};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_http_client()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextBackend for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: system.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: prompt.into(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let url = self.completions_url();

        let response = send_with_retry(self.name(), || {
            self.client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
        })
        .await?;

        let body: ChatCompletionResponse = response.json().await?;
        debug!("OpenAI-compatible call succeeded: model={}", self.model);

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let client = OpenAiClient::new(
            "sk-test".to_string(),
            "https://api.deepseek.com/v1/".to_string(),
            "deepseek-chat".to_string(),
        )
        .unwrap();
        assert_eq!(
            client.completions_url(),
            "https://api.deepseek.com/v1/chat/completions"
        );
        assert_eq!(client.model(), "deepseek-chat");
    }

    #[test]
    fn test_response_deserializes_first_choice() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": " Optimized billing workflows "}}]}"#;
        let body: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.choices[0].message.content.trim(), "Optimized billing workflows");
    }
}
