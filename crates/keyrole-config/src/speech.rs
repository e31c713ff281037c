use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_command() -> String {
    "espeak-ng".to_string()
}

fn default_args() -> Vec<String> {
    vec!["-v".to_string(), "{lang}".to_string(), "{text}".to_string()]
}

fn default_language() -> String {
    "es-ES".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Program spawned for each utterance
    #[serde(default = "default_command")]
    pub command: String,
    /// `{lang}` and `{text}` are substituted per call
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            command: default_command(),
            args: default_args(),
            language: default_language(),
        }
    }
}
