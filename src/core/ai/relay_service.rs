use super::models::{AiConfig, AiMessage};
use async_trait::async_trait;
use std::error::Error;

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Sends one generation request to the model and returns the produced text.
    ///
    /// An empty string means the API answered but carried no content. That is
    /// not an error and must not be retried; transport and API failures are
    /// returned as `Err`.
    async fn generate_text(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// Extra attempts after the first failed call. Flat budget: no backoff,
/// no jitter, no distinction between failure kinds.
const MAX_RETRIES: u32 = 2;

/// Shown to the user when the API answers without any text.
const EMPTY_RESPONSE_FALLBACK: &str =
    "❌ I didn't get any text back from Gemini. Please try again.";

/// Forwards prompts to an AI provider and always produces text the caller
/// can post back to the channel. The system prompt is prepended to every
/// invocation; provider failures are retried and then reported as chat text.
pub struct RelayService<P: AiProvider> {
    provider: P,
    system_prompt: String,
    config: AiConfig,
}

impl<P: AiProvider> RelayService<P> {
    pub fn new(provider: P, system_prompt: String, config: AiConfig) -> Self {
        Self {
            provider,
            system_prompt,
            config,
        }
    }

    /// Relays one prompt to the model.
    ///
    /// This never fails the caller: after the retry budget is spent, the
    /// failure detail comes back as the reply text itself.
    pub async fn ask(&self, prompt: &str) -> String {
        let messages = vec![
            AiMessage {
                role: "system".to_string(),
                content: self.system_prompt.clone(),
            },
            AiMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            },
        ];

        let mut last_error: Option<Box<dyn Error + Send + Sync>> = None;

        for attempt in 0..=MAX_RETRIES {
            match self.provider.generate_text(&messages, &self.config).await {
                Ok(text) if text.trim().is_empty() => {
                    tracing::warn!("Empty response from the model");
                    return EMPTY_RESPONSE_FALLBACK.to_string();
                }
                Ok(text) => return text,
                Err(e) => {
                    tracing::error!(
                        "Model call failed (attempt {} of {}): {}",
                        attempt + 1,
                        MAX_RETRIES + 1,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        format!("❌ Something went wrong talking to Gemini: {reason}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Test double that scripts provider behavior and counts calls.
    struct ScriptedProvider {
        calls: AtomicUsize,
        seen_messages: Mutex<Vec<AiMessage>>,
        behavior: Behavior,
    }

    enum Behavior {
        Succeed(&'static str),
        Empty,
        AlwaysFail(&'static str),
    }

    impl ScriptedProvider {
        fn new(behavior: Behavior) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen_messages: Mutex::new(Vec::new()),
                behavior,
            }
        }
    }

    #[async_trait]
    impl AiProvider for ScriptedProvider {
        async fn generate_text(
            &self,
            messages: &[AiMessage],
            _config: &AiConfig,
        ) -> Result<String, Box<dyn Error + Send + Sync>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_messages.lock().unwrap() = messages.to_vec();

            match self.behavior {
                Behavior::Succeed(text) => Ok(text.to_string()),
                Behavior::Empty => Ok(String::new()),
                Behavior::AlwaysFail(reason) => Err(reason.into()),
            }
        }
    }

    fn test_config() -> AiConfig {
        AiConfig {
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            max_output_tokens: None,
            top_p: None,
        }
    }

    fn service(behavior: Behavior) -> RelayService<ScriptedProvider> {
        RelayService::new(
            ScriptedProvider::new(behavior),
            "You are a helpful assistant.".to_string(),
            test_config(),
        )
    }

    #[tokio::test]
    async fn test_successful_reply_is_passed_through_verbatim() {
        let service = service(Behavior::Succeed("Recursion is a function calling itself."));

        let reply = service.ask("What is recursion?").await;

        assert_eq!(reply, "Recursion is a function calling itself.");
        assert_eq!(service.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_system_prompt_is_prepended_to_every_call() {
        let service = service(Behavior::Succeed("ok"));

        service.ask("hello").await;

        let messages = service.provider.seen_messages.lock().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "You are a helpful assistant.");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "hello");
    }

    #[tokio::test]
    async fn test_empty_response_returns_fallback_without_retry() {
        let service = service(Behavior::Empty);

        let reply = service.ask("anything").await;

        assert_eq!(reply, EMPTY_RESPONSE_FALLBACK);
        // Empty content is a soft failure, not a retryable error.
        assert_eq!(service.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_persistent_failure_spends_retry_budget_then_reports() {
        let service = service(Behavior::AlwaysFail("connection reset"));

        let reply = service.ask("anything").await;

        // First call plus MAX_RETRIES extra attempts.
        assert_eq!(service.provider.calls.load(Ordering::SeqCst), 3);
        assert!(reply.contains("connection reset"));
        assert!(reply.starts_with("❌"));
    }
}
