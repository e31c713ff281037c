use keyrole_types::{AssistKind, WordEntry};

pub const MNEMONIC_EMPTY: &str = "Could not generate mnemonic at this time.";
pub const MNEMONIC_FAILED: &str = "Failed to connect to AI for mnemonics.";
pub const USAGE_EMPTY: &str = "No usage example available.";
pub const USAGE_FAILED: &str = "Unable to fetch usage example.";

/// Generative-text provider for study aids
#[async_trait::async_trait]
pub trait WordAssistant: Send + Sync {
    /// Short memory hook for the word
    async fn mnemonic(&self, word: &WordEntry) -> Result<String, AssistError>;

    /// One example sentence with pronunciation and translation
    async fn usage_example(&self, word: &WordEntry) -> Result<String, AssistError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Assistant disabled")]
    Disabled,
}

/// Fallback texts for one kind of request: (empty response, failure)
fn fallbacks(kind: AssistKind) -> (&'static str, &'static str) {
    match kind {
        AssistKind::Mnemonic => (MNEMONIC_EMPTY, MNEMONIC_FAILED),
        AssistKind::Usage => (USAGE_EMPTY, USAGE_FAILED),
    }
}

/// Ask the assistant and always come back with displayable text
pub async fn request_or_fallback(
    assistant: &dyn WordAssistant,
    word: &WordEntry,
    kind: AssistKind,
) -> String {
    let result = match kind {
        AssistKind::Mnemonic => assistant.mnemonic(word).await,
        AssistKind::Usage => assistant.usage_example(word).await,
    };

    let (empty, failed) = fallbacks(kind);
    match result {
        Ok(text) if text.trim().is_empty() => {
            tracing::warn!("{} for '{}' came back empty", kind.label(), word.spanish);
            empty.to_string()
        }
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::error!(
                "{} error from {}: {}",
                kind.label(),
                assistant.metadata().name,
                e
            );
            failed.to_string()
        }
    }
}

pub async fn mnemonic_or_fallback(assistant: &dyn WordAssistant, word: &WordEntry) -> String {
    request_or_fallback(assistant, word, AssistKind::Mnemonic).await
}

pub async fn usage_or_fallback(assistant: &dyn WordAssistant, word: &WordEntry) -> String {
    request_or_fallback(assistant, word, AssistKind::Usage).await
}

/// Stand-in used when no API key is configured
pub struct DisabledAssistant;

#[async_trait::async_trait]
impl WordAssistant for DisabledAssistant {
    async fn mnemonic(&self, _word: &WordEntry) -> Result<String, AssistError> {
        Err(AssistError::Disabled)
    }

    async fn usage_example(&self, _word: &WordEntry) -> Result<String, AssistError> {
        Err(AssistError::Disabled)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "disabled".to_string(),
            model: String::new(),
            requires_api_key: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedAssistant {
        reply: Result<&'static str, ()>,
    }

    #[async_trait::async_trait]
    impl WordAssistant for CannedAssistant {
        async fn mnemonic(&self, _word: &WordEntry) -> Result<String, AssistError> {
            self.reply
                .map(str::to_string)
                .map_err(|_| AssistError::ApiError("boom".into()))
        }

        async fn usage_example(&self, word: &WordEntry) -> Result<String, AssistError> {
            self.mnemonic(word).await
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "canned".to_string(),
                model: "test".to_string(),
                requires_api_key: false,
            }
        }
    }

    fn gato() -> WordEntry {
        WordEntry {
            id: 1,
            spanish: "gato".into(),
            transliteration: "GAH-toh".into(),
            malaysian: Some("kucing".into()),
            meaning: "cat".into(),
            category: "Animals".into(),
            mnemonic: None,
        }
    }

    #[tokio::test]
    async fn test_text_passes_through_trimmed() {
        let assistant = CannedAssistant {
            reply: Ok("  A GATOr eats the cat.\n"),
        };
        assert_eq!(
            mnemonic_or_fallback(&assistant, &gato()).await,
            "A GATOr eats the cat."
        );
    }

    #[tokio::test]
    async fn test_empty_text_uses_empty_fallback() {
        let assistant = CannedAssistant { reply: Ok("   ") };
        assert_eq!(mnemonic_or_fallback(&assistant, &gato()).await, MNEMONIC_EMPTY);
        assert_eq!(usage_or_fallback(&assistant, &gato()).await, USAGE_EMPTY);
    }

    #[tokio::test]
    async fn test_error_uses_failure_fallback() {
        let assistant = CannedAssistant { reply: Err(()) };
        assert_eq!(mnemonic_or_fallback(&assistant, &gato()).await, MNEMONIC_FAILED);
        assert_eq!(usage_or_fallback(&assistant, &gato()).await, USAGE_FAILED);
    }

    #[tokio::test]
    async fn test_disabled_assistant_falls_back() {
        assert_eq!(
            request_or_fallback(&DisabledAssistant, &gato(), AssistKind::Usage).await,
            USAGE_FAILED
        );
    }
}
