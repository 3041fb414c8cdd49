//! AI provider abstraction and the fallback chain.
//!
//! Each backend implements [`Provider`]; the [`ProviderChain`] tries them in
//! a fixed priority order (free tiers first) and returns the first usable
//! reply. Provider failures of any kind never escape the chain — exhaustion
//! is `None`, which callers treat as "defer to the heuristic fallback" or
//! "report unavailable", never as an exception.

pub mod deepseek;
pub mod gemini;
pub mod openai;
pub mod prompts;

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;

/// Per-call completion parameters. The timeout bounds the single outbound
/// request — there are no retries inside one provider call; retrying is the
/// chain's job, by moving to the next provider.
#[derive(Debug, Clone, Copy)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl CompletionOptions {
    /// Free-text enhancement calls.
    pub fn enhancement() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
            timeout: Duration::from_secs(12),
        }
    }

    /// Structured resume extraction calls — larger output, longer budget.
    pub fn extraction() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 2048,
            timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// No credential present. The chain skips this silently — it is not a
    /// failure, the provider simply isn't part of this deployment.
    #[error("provider not configured")]
    Unconfigured,

    #[error("network failure: {0}")]
    Network(String),

    #[error("rate limit exceeded (429)")]
    RateLimited,

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A single AI completion backend.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short identifier used in logs ("gemini", "deepseek", "openai").
    fn id(&self) -> &'static str;

    /// Whether a credential is present. `complete` on an unconfigured
    /// provider short-circuits to `Unconfigured` without any network call.
    fn is_configured(&self) -> bool;

    async fn complete(
        &self,
        prompt: &str,
        opts: &CompletionOptions,
    ) -> Result<String, ProviderError>;
}

/// Ordered provider fallback chain.
pub struct ProviderChain {
    providers: Vec<Arc<dyn Provider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Chain in priority order: Gemini (free tier) first, then DeepSeek,
    /// then OpenAI. All three are always registered; unconfigured ones are
    /// skipped at call time.
    pub fn from_config(config: &Config) -> Self {
        Self::new(vec![
            Arc::new(gemini::GeminiProvider::new(config.gemini_api_key.clone())),
            Arc::new(deepseek::DeepSeekProvider::new(
                config.deepseek_api_key.clone(),
            )),
            Arc::new(openai::OpenAiProvider::new(config.openai_api_key.clone())),
        ])
    }

    /// Ids of the providers that actually hold a credential.
    pub fn configured_ids(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .filter(|p| p.is_configured())
            .map(|p| p.id())
            .collect()
    }

    /// Try providers strictly in order and return the first successful text.
    /// Every failure kind advances to the next provider; exhaustion is `None`.
    pub async fn try_in_order(&self, prompt: &str, opts: &CompletionOptions) -> Option<String> {
        self.try_in_order_parsed(prompt, opts, |text| Ok::<_, ProviderError>(text.to_string()))
            .await
    }

    /// Like [`try_in_order`](Self::try_in_order), but a per-provider `parse`
    /// step must also succeed: a reply that fails validation is treated
    /// exactly like a provider failure and the chain falls through to the
    /// next provider.
    pub async fn try_in_order_parsed<T, E, F>(
        &self,
        prompt: &str,
        opts: &CompletionOptions,
        parse: F,
    ) -> Option<T>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        for provider in &self.providers {
            match provider.complete(prompt, opts).await {
                Ok(text) => match parse(&text) {
                    Ok(value) => {
                        debug!("{} succeeded", provider.id());
                        return Some(value);
                    }
                    Err(e) => {
                        warn!(
                            "{} returned an unusable payload ({e}), trying next provider",
                            provider.id()
                        );
                    }
                },
                // Not an error: this provider just isn't part of the deployment
                Err(ProviderError::Unconfigured) => {
                    debug!("{} not configured, skipping", provider.id());
                }
                // Rate limits get their own log line for operability
                Err(ProviderError::RateLimited) => {
                    warn!(
                        "{} rate limit exceeded (429), trying next provider",
                        provider.id()
                    );
                }
                Err(e) => {
                    warn!("{} failed: {e}", provider.id());
                }
            }
        }
        None
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted provider for chain tests: returns a fixed result and counts
    /// how many times it was invoked.
    pub struct MockProvider {
        id: &'static str,
        response: Result<String, ProviderError>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        pub fn succeeding(id: &'static str, text: &str) -> Arc<Self> {
            Arc::new(Self {
                id,
                response: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        pub fn failing(id: &'static str, error: ProviderError) -> Arc<Self> {
            Arc::new(Self {
                id,
                response: Err(error),
                calls: AtomicUsize::new(0),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        fn is_configured(&self) -> bool {
            !matches!(self.response, Err(ProviderError::Unconfigured))
        }

        async fn complete(
            &self,
            _prompt: &str,
            _opts: &CompletionOptions,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockProvider;
    use super::*;

    #[tokio::test]
    async fn test_first_success_wins_and_later_providers_are_never_invoked() {
        let a = MockProvider::failing("a", ProviderError::Network("boom".into()));
        let b = MockProvider::succeeding("b", "from b");
        let c = MockProvider::succeeding("c", "from c");
        let chain = ProviderChain::new(vec![a.clone(), b.clone(), c.clone()]);

        let result = chain
            .try_in_order("prompt", &CompletionOptions::enhancement())
            .await;

        assert_eq!(result.as_deref(), Some("from b"));
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
        assert_eq!(c.calls(), 0, "chain must stop at the first success");
    }

    #[tokio::test]
    async fn test_exhaustion_returns_none_not_an_error() {
        let a = MockProvider::failing("a", ProviderError::RateLimited);
        let b = MockProvider::failing("b", ProviderError::Malformed("no text".into()));
        let chain = ProviderChain::new(vec![a.clone(), b.clone()]);

        let result = chain
            .try_in_order("prompt", &CompletionOptions::enhancement())
            .await;

        assert!(result.is_none());
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn test_rate_limited_provider_does_not_abort_the_chain() {
        let a = MockProvider::failing("a", ProviderError::RateLimited);
        let b = MockProvider::succeeding("b", "ok");
        let chain = ProviderChain::new(vec![a, b]);

        let result = chain
            .try_in_order("prompt", &CompletionOptions::enhancement())
            .await;
        assert_eq!(result.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn test_empty_chain_returns_none() {
        let chain = ProviderChain::new(vec![]);
        let result = chain
            .try_in_order("prompt", &CompletionOptions::enhancement())
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_parse_rejection_falls_through_to_next_provider() {
        // First provider answers, but the payload fails validation;
        // the chain must treat that as a provider failure and move on.
        let a = MockProvider::succeeding("a", "not json");
        let b = MockProvider::succeeding("b", "42");
        let chain = ProviderChain::new(vec![a.clone(), b.clone()]);

        let result = chain
            .try_in_order_parsed(
                "prompt",
                &CompletionOptions::extraction(),
                |text| text.parse::<i32>(),
            )
            .await;

        assert_eq!(result, Some(42));
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[test]
    fn test_configured_ids_reflects_credentials() {
        let chain = ProviderChain::new(vec![
            MockProvider::failing("a", ProviderError::Unconfigured),
            MockProvider::succeeding("b", "ok"),
        ]);
        assert_eq!(chain.configured_ids(), vec!["b"]);
    }
}
