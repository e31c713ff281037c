use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use keyrole_config::Config;

/// Config from a JSON file when given, otherwise built-in defaults.
/// Environment overrides are applied on top either way.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No config file given, using defaults");
        return Ok(Config::new());
    };

    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut config: Config = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.apply_env();
    Ok(config)
}
