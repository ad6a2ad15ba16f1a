use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::LocaleSource;
use crate::normalise::{
    DEFAULT_BASE_BRAND,
    DEFAULT_BRAND_POSITION,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "brandPosition")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Options shared by both pipelines, read from `.locale-sync.json` and overridden by flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Whether the locale comes from the file name or the parent directory.
    pub file_locale_source: LocaleSource,

    /// Translate: also rename keys equal to a phrase.
    pub translate_keys: bool,

    /// Translate: explicit core document, relative to the working directory.
    /// If unset, the core document is detected among the destinations.
    pub core: Option<PathBuf>,

    /// Normalise: brand segment offset from the end of the path (0 = file name).
    pub brand_position: usize,

    /// Normalise: brand whose documents the other brands inherit from.
    pub base_brand_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_locale_source: LocaleSource::default(),
            translate_keys: false,
            core: None,
            brand_position: DEFAULT_BRAND_POSITION,
            base_brand_name: DEFAULT_BASE_BRAND.to_string(),
        }
    }
}

/// Values given on the command line. `Some` wins over the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub file_locale_source: Option<LocaleSource>,
    pub translate_keys: Option<bool>,
    pub core: Option<PathBuf>,
    pub brand_position: Option<usize>,
    pub base_brand_name: Option<String>,
}

impl Settings {
    /// Replaces every field that `overrides` sets.
    pub fn apply(&mut self, overrides: SettingsOverrides) {
        if let Some(source) = overrides.file_locale_source {
            self.file_locale_source = source;
        }
        if let Some(translate_keys) = overrides.translate_keys {
            self.translate_keys = translate_keys;
        }
        if let Some(core) = overrides.core {
            self.core = Some(core);
        }
        if let Some(position) = overrides.brand_position {
            self.brand_position = position;
        }
        if let Some(name) = overrides.base_brand_name {
            self.base_brand_name = name;
        }
    }

    /// # Errors
    /// - Base brand name is empty
    /// - Brand position points at the file name
    /// - Core path is empty
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.base_brand_name.trim().is_empty() {
            errors.push(ValidationError::new(
                "baseBrandName",
                "The brand name cannot be empty. Example: \"core\"",
            ));
        }

        if self.brand_position == 0 {
            errors.push(ValidationError::new(
                "brandPosition",
                "Position 0 is the file name itself. Use 1 for the parent directory, 2 for the one above, and so on",
            ));
        }

        if let Some(core) = &self.core
            && core.as_os_str().is_empty()
        {
            errors.push(ValidationError::new(
                "core",
                "The core document path cannot be empty. Remove this field to detect it automatically",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
