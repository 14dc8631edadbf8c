use anyhow::{Context, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// The text-completion capability the interview engine depends on.
///
/// Each call is independent: the prompt carries all context and the service
/// keeps no conversation state between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends a fully rendered prompt and returns the raw response text.
    async fn complete(&self, prompt: String) -> Result<String>;
}

/// An implementation of `CompletionClient` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions (e.g., "gpt-4o").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAICompatibleClient {
    async fn complete(&self, prompt: String) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .context("No response choice from LLM")?
            .message
            .content
            .unwrap_or_default();

        debug!(model = %self.model, chars = content.len(), "Completion received");
        Ok(content)
    }
}

/// Retry settings for [`RetryingClient`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            multiplier: 2.0,
            max_delay: Duration::from_secs(8),
        }
    }
}

/// Wraps another client and retries failed calls with exponential backoff.
///
/// Only transport failures are retried. A response that arrives, however
/// unhelpful, is passed through untouched.
pub struct RetryingClient<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: CompletionClient> RetryingClient<C> {
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for RetryingClient<C> {
    async fn complete(&self, prompt: String) -> Result<String> {
        let mut attempt = 0;
        let mut delay = self.policy.initial_delay;

        loop {
            match self.inner.complete(prompt.clone()).await {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.policy.max_retries => {
                    attempt += 1;
                    warn!(
                        error = %e,
                        attempt,
                        max_retries = self.policy.max_retries,
                        "Completion failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.mul_f64(self.policy.multiplier).min(self.policy.max_delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
