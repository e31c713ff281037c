use keyrole_types::WordId;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate word id {0}")]
    DuplicateId(WordId),

    #[error("Word {id} uses unknown category '{category}'")]
    UnknownCategory { id: WordId, category: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed stored value: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("Word {0} not found")]
    UnknownWord(WordId),
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech disabled")]
    Disabled,

    #[error("Failed to start speech command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
