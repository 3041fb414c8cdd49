//! DeepSeek provider (OpenAI-compatible chat completions API).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{CompletionOptions, Provider, ProviderError};

const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
const DEEPSEEK_MODEL: &str = "deepseek-chat";

pub struct DeepSeekProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl DeepSeekProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEEPSEEK_BASE_URL.to_string())
    }

    /// Base URL override for tests.
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl Provider for DeepSeekProvider {
    fn id(&self) -> &'static str {
        "deepseek"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(
        &self,
        prompt: &str,
        opts: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::Unconfigured)?;

        let body = ChatRequest {
            model: DEEPSEEK_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: opts.temperature,
            max_tokens: opts.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .timeout(opts.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Network(format!("status {status}: {body}")));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|t| t.trim().to_string())
            .ok_or_else(|| {
                ProviderError::Malformed("missing choices[0].message.content".to_string())
            })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_chat_reply() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer k")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"better text"}}]}"#)
            .create_async()
            .await;

        let provider = DeepSeekProvider::with_base_url(Some("k".into()), server.url());
        let text = provider
            .complete("hi", &CompletionOptions::enhancement())
            .await
            .unwrap();
        assert_eq!(text, "better text");
    }

    #[tokio::test]
    async fn test_null_content_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
            .create_async()
            .await;

        let provider = DeepSeekProvider::with_base_url(Some("k".into()), server.url());
        let err = provider
            .complete("hi", &CompletionOptions::enhancement())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_network_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let provider = DeepSeekProvider::with_base_url(Some("k".into()), server.url());
        let err = provider
            .complete("hi", &CompletionOptions::enhancement())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
