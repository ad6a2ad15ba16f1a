//! Configuration file loading.

use std::path::Path;

use super::{
    ConfigError,
    Settings,
};

/// Name of the optional configuration file in the working directory.
const CONFIG_FILE_NAME: &str = ".locale-sync.json";

/// Reads `.locale-sync.json` from the working directory.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and parsed
/// - `Ok(None)`: no configuration file
/// - `Err(ConfigError)`: read or parse failure
pub(super) fn load_from_dir(cwd: &Path) -> Result<Option<Settings>, ConfigError> {
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: Settings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
