use std::sync::Arc;

use keyrole_assistant::{DisabledAssistant, WordAssistant};
use keyrole_config::Config;
use keyrole_config::assistant::AssistantConfig;
use keyrole_core::{
    CommandSpeaker, FileStore, KeyValueStore, MemoryStore, SilentSpeaker, TextToSpeech, Vocabulary,
};
use keyrole_lang_spanish::GeminiAssistant;
use tokio::sync::RwLock;

/// Shared, read-mostly collaborators. Mutable learning state lives in the event loop.
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub vocabulary: Arc<Vocabulary>,
    pub store: Arc<dyn KeyValueStore>,
    pub assistant: Arc<dyn WordAssistant>,
    pub speaker: Arc<dyn TextToSpeech>,
}

impl AppState {
    pub fn new(config: Config, vocabulary: Vocabulary) -> Self {
        let store: Arc<dyn KeyValueStore> = if config.storage.ephemeral {
            tracing::warn!("Ephemeral storage, progress will not survive restart");
            Arc::new(MemoryStore::new())
        } else {
            tracing::info!("Progress stored in {}", config.storage.data_dir);
            Arc::new(FileStore::new(config.storage.data_path()))
        };

        let assistant = build_assistant(&config.assistant);

        let speaker: Arc<dyn TextToSpeech> = if config.speech.enabled {
            Arc::new(CommandSpeaker::new(
                config.speech.command.clone(),
                config.speech.args.clone(),
            ))
        } else {
            Arc::new(SilentSpeaker)
        };

        Self::with_parts(config, vocabulary, store, assistant, speaker)
    }

    pub fn with_parts(
        config: Config,
        vocabulary: Vocabulary,
        store: Arc<dyn KeyValueStore>,
        assistant: Arc<dyn WordAssistant>,
        speaker: Arc<dyn TextToSpeech>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            vocabulary: Arc::new(vocabulary),
            store,
            assistant,
            speaker,
        }
    }
}

/// Pick the assistant named by `provider`, disabled when unusable
pub fn build_assistant(config: &AssistantConfig) -> Arc<dyn WordAssistant> {
    if !config.enabled {
        tracing::info!("AI assistant disabled in config");
        return Arc::new(DisabledAssistant);
    }

    match config.provider.to_lowercase().as_str() {
        "gemini" if config.api_key.is_empty() => {
            tracing::warn!("AI assistant disabled, set GEMINI_API_KEY to enable");
            Arc::new(DisabledAssistant)
        }
        "gemini" => Arc::new(GeminiAssistant::from_config(config)),
        other => {
            tracing::warn!("Unknown AI provider '{}', assistant disabled", other);
            Arc::new(DisabledAssistant)
        }
    }
}
