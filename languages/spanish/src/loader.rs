use std::path::Path;

use keyrole_config::vocabulary::VocabularyConfig;
use keyrole_core::{LoadError, Vocabulary};

pub struct VocabularyLoader;

impl VocabularyLoader {
    /// Load embedded word list
    pub fn load_embedded() -> Result<Vocabulary, LoadError> {
        let json = include_str!("../data/vocabulary.json");
        tracing::info!("Loading embedded Spanish vocabulary...");
        let vocabulary = Vocabulary::from_json(json)?;
        tracing::info!("Loaded {} words", vocabulary.len());
        Ok(vocabulary)
    }

    /// Load word list from file path
    pub fn load_from_file(path: &Path) -> Result<Vocabulary, LoadError> {
        Vocabulary::load_from_file(path)
    }

    /// Embedded list (when enabled) with every additional file merged over it.
    /// Unreadable extra files are skipped, an empty result is an error.
    pub fn load_configured(config: &VocabularyConfig) -> Result<Vocabulary, LoadError> {
        let mut vocabulary = if config.embedded {
            Self::load_embedded()?
        } else {
            Vocabulary::new()
        };
        let mut last_error = None;

        for path in &config.additional_paths {
            match Self::load_from_file(Path::new(path)) {
                Ok(additional) => {
                    tracing::info!("Merging additional vocabulary from: {}", path);
                    vocabulary = vocabulary.merge(additional)?;
                }
                Err(e) => {
                    tracing::warn!("Failed to load vocabulary from {}: {}", path, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if vocabulary.is_empty() => Err(e),
            _ => Ok(vocabulary),
        }
    }
}
