use keyrole_types::ViewMode;
use serde::{Deserialize, Serialize};

fn default_max_rows() -> usize {
    50
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default)]
    pub view_mode: ViewMode,
    /// Rows printed per listing, the rest is summarized
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            max_rows: default_max_rows(),
        }
    }
}
