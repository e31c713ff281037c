use std::env;

use serde::{Deserialize, Serialize};

use self::assistant::AssistantConfig;
use self::speech::SpeechConfig;
use self::storage::StorageConfig;
use self::ui::UiConfig;
use self::vocabulary::VocabularyConfig;

pub mod assistant;
pub mod speech;
pub mod storage;
pub mod ui;
pub mod vocabulary;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub vocabulary: VocabularyConfig,
    pub assistant: AssistantConfig,
    pub speech: SpeechConfig,
    pub ui: UiConfig,

    /// Capacity of the command and render channels
    pub channel_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config {
            channel_capacity: 64,
            ..Config::default()
        };
        config.apply_env();
        config
    }

    /// Override fields from environment variables
    pub fn apply_env(&mut self) {
        if let Ok(dir) = env::var("KEYROLE_DATA_DIR") {
            self.storage.data_dir = dir;
        }

        if let Ok(key) = env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")) {
            self.assistant.api_key = key;
        }

        if let Ok(url) = env::var("GEMINI_API_URL") {
            self.assistant.api_url = url;
        }

        if let Ok(model) = env::var("GEMINI_MODEL") {
            self.assistant.model = model;
        }

        self.assistant.timeout_secs = env::var("GEMINI_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.assistant.timeout_secs);

        if let Ok(command) = env::var("KEYROLE_TTS_COMMAND") {
            self.speech.command = command;
        }

        if self.channel_capacity == 0 {
            self.channel_capacity = 64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_field_defaults() {
        let json = r#"{ "assistant": { "model": "gemini-pro" }, "ui": { "view_mode": "list" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.assistant.model, "gemini-pro");
        assert_eq!(config.assistant.mnemonic_temperature, 0.7);
        assert_eq!(config.assistant.usage_temperature, 0.5);
        assert_eq!(config.storage.key, "keyrole-vocab-stats");
        assert_eq!(config.ui.view_mode, keyrole_types::ViewMode::List);
        assert!(config.vocabulary.embedded);
        assert_eq!(config.speech.language, "es-ES");
    }

    #[test]
    fn test_zero_capacity_is_replaced() {
        let mut config = Config::default();
        config.apply_env();
        assert_eq!(config.channel_capacity, 64);
    }
}
