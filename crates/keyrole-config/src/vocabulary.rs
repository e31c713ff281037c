use serde::{Deserialize, Serialize};

fn default_embedded() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Start from the dataset compiled into the binary
    #[serde(default = "default_embedded")]
    pub embedded: bool,
    /// Extra word lists merged over the embedded one, later ids win
    #[serde(default)]
    pub additional_paths: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            embedded: default_embedded(),
            additional_paths: vec![],
        }
    }
}
