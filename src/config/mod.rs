//! Configuration: settings file, validation and document discovery.

/// Config file loader
mod loader;
/// Document file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

use std::path::Path;

pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    Settings,
    SettingsOverrides,
    ValidationError,
};

/// Loads settings for a working directory, applies command-line overrides and validates.
///
/// Falls back to defaults when no configuration file exists.
///
/// # Errors
/// - File read error
/// - JSON parse error
/// - Validation error
pub fn load_settings(cwd: &Path, overrides: SettingsOverrides) -> Result<Settings, ConfigError> {
    let mut settings = loader::load_from_dir(cwd)?.map_or_else(Settings::default, |settings| {
        tracing::debug!("Loaded workspace settings: {:?}", settings);
        settings
    });

    settings.apply(overrides);
    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!("Settings loaded successfully: {:?}", settings);

    Ok(settings)
}
