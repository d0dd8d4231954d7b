use super::models::{AiConfig, AiError, AiMessage, ReplyOutcome};
use async_trait::async_trait;

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Sends a chat completion request and returns the first choice's text,
    /// untouched.
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<String, AiError>;
}

/// Turns a prompt into a reply: fixed persona, one user turn, no history.
pub struct AiService<P: AiProvider> {
    provider: P,
    system_prompt: String,
    config: AiConfig,
}

impl<P: AiProvider> AiService<P> {
    pub fn new(provider: P, system_prompt: String, config: AiConfig) -> Self {
        Self {
            provider,
            system_prompt,
            config,
        }
    }

    pub async fn generate(&self, prompt: &str) -> ReplyOutcome {
        let messages = [
            AiMessage::system(self.system_prompt.as_str()),
            AiMessage::user(prompt),
        ];

        match self.provider.chat_complete(&messages, &self.config).await {
            Ok(content) => {
                let reply = content.trim();
                if reply.is_empty() {
                    // Discord refuses empty messages, so this has to be reported.
                    ReplyOutcome::Failure(AiError::EmptyReply)
                } else {
                    ReplyOutcome::Success(reply.to_string())
                }
            }
            Err(err) => {
                tracing::warn!(model = %self.config.model, "Reply generation failed: {}", err);
                ReplyOutcome::Failure(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Provider that returns a canned result and remembers what it was sent.
    struct ScriptedProvider {
        reply: fn() -> Result<String, AiError>,
        seen: Mutex<Vec<Vec<AiMessage>>>,
    }

    impl ScriptedProvider {
        fn new(reply: fn() -> Result<String, AiError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AiProvider for ScriptedProvider {
        async fn chat_complete(
            &self,
            messages: &[AiMessage],
            _config: &AiConfig,
        ) -> Result<String, AiError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            (self.reply)()
        }
    }

    fn config() -> AiConfig {
        AiConfig {
            model: "test-model".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }

    #[tokio::test]
    async fn test_sends_persona_then_prompt() {
        let provider = ScriptedProvider::new(|| Ok("ok".to_string()));
        let service = AiService::new(provider, "Be nice.".to_string(), config());

        service.generate("What is Rust?").await;

        let seen = service.provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0],
            vec![AiMessage::system("Be nice."), AiMessage::user("What is Rust?")]
        );
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let provider = ScriptedProvider::new(|| Ok("  Hello there  \n".to_string()));
        let service = AiService::new(provider, "Be nice.".to_string(), config());

        match service.generate("hi").await {
            ReplyOutcome::Success(text) => assert_eq!(text, "Hello there"),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_whitespace_only_reply_is_a_failure() {
        let provider = ScriptedProvider::new(|| Ok("   ".to_string()));
        let service = AiService::new(provider, "Be nice.".to_string(), config());

        let outcome = service.generate("hi").await;

        assert!(matches!(outcome, ReplyOutcome::Failure(AiError::EmptyReply)));
    }

    #[tokio::test]
    async fn test_provider_error_becomes_failure() {
        let provider = ScriptedProvider::new(|| Err(AiError::Status(503)));
        let service = AiService::new(provider, "Be nice.".to_string(), config());

        let text = service.generate("hi").await.into_reply_text();

        assert!(text.contains("503"));
    }
}
