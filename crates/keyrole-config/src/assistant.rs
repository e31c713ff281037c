use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_mnemonic_temperature() -> f64 {
    0.7
}

fn default_usage_temperature() -> f64 {
    0.5
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AssistantConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_mnemonic_temperature")]
    pub mnemonic_temperature: f64,
    #[serde(default = "default_usage_temperature")]
    pub usage_temperature: f64,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: default_provider(),
            model: default_model(),
            api_key: String::new(),
            api_url: default_api_url(),
            mnemonic_temperature: default_mnemonic_temperature(),
            usage_temperature: default_usage_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
