//! Locale and brand addressing derived from document paths.

use std::fmt;
use std::path::{
    Component,
    Path,
    PathBuf,
};
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Separator between language and region (`fr-CA`).
const REGION_SEPARATOR: char = '-';

/// Length of a language-only code.
const LANGUAGE_LEN: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("'{}' has no file name to derive a locale from", .0.display())]
    NoFileName(PathBuf),

    #[error("'{}' has no parent directory to derive a locale from", .0.display())]
    NoParentDirectory(PathBuf),

    #[error("Unknown file locale source '{0}', expected 'filename' or 'dirname'")]
    UnknownSource(String),
}

/// Language or language-region identifier (`fr`, `fr-CA`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the code carries more than a 2-letter language.
    #[must_use]
    pub fn is_regional(&self) -> bool {
        self.0.chars().count() > LANGUAGE_LEN
    }

    #[must_use]
    pub fn has_region_separator(&self) -> bool {
        self.0.contains(REGION_SEPARATOR)
    }

    /// The leading 2-letter language code.
    #[must_use]
    pub fn language(&self) -> Self {
        Self(self.0.chars().take(LANGUAGE_LEN).collect())
    }

    /// True when a table column drives this locale (`fr` drives `fr` and `fr-CA`).
    #[must_use]
    pub fn matches_column(&self, column: &str) -> bool {
        self.0.starts_with(column)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a document's locale is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LocaleSource {
    /// File name without extension (`locales/fr-CA.json`).
    #[default]
    Filename,
    /// Immediate parent directory (`locales/fr-CA/common.json`).
    Dirname,
}

impl LocaleSource {
    /// Derives the locale of the document at `path`.
    ///
    /// # Errors
    /// Returns an error when the path lacks the component this source reads.
    pub fn derive_locale(self, path: &Path) -> Result<Locale, LocaleError> {
        let name = match self {
            Self::Filename => path
                .file_stem()
                .ok_or_else(|| LocaleError::NoFileName(path.to_path_buf()))?,
            Self::Dirname => path
                .parent()
                .and_then(Path::file_name)
                .ok_or_else(|| LocaleError::NoParentDirectory(path.to_path_buf()))?,
        };
        Ok(Locale::new(name.to_string_lossy()))
    }

    /// Returns the sibling path addressing `locale` instead of the current locale.
    #[must_use]
    pub fn with_locale(self, path: &Path, locale: &Locale) -> Option<PathBuf> {
        match self {
            Self::Filename => {
                let mut file_name = locale.as_str().to_string();
                if let Some(extension) = path.extension() {
                    file_name.push('.');
                    file_name.push_str(&extension.to_string_lossy());
                }
                Some(path.with_file_name(file_name))
            }
            Self::Dirname => {
                let file_name = path.file_name()?;
                let directory = path.parent()?;
                directory.file_name()?;
                Some(directory.with_file_name(locale.as_str()).join(file_name))
            }
        }
    }
}

impl FromStr for LocaleSource {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filename" => Ok(Self::Filename),
            "dirname" => Ok(Self::Dirname),
            other => Err(LocaleError::UnknownSource(other.to_string())),
        }
    }
}

impl TryFrom<String> for LocaleSource {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Path components from the file name backwards.
fn reversed_segments(path: &Path) -> Vec<String> {
    path.components()
        .rev()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Returns the path segment `offset` places from the end (0 = file name).
#[must_use]
pub fn file_brand(path: &Path, offset: usize) -> Option<String> {
    reversed_segments(path).into_iter().nth(offset)
}

/// Returns `path` with the segment `offset` places from the end replaced by `brand`.
#[must_use]
pub fn with_brand(path: &Path, offset: usize, brand: &str) -> Option<PathBuf> {
    let components: Vec<Component<'_>> = path.components().collect();
    let normal_count =
        components.iter().filter(|component| matches!(component, Component::Normal(_))).count();
    let target = normal_count.checked_sub(offset + 1)?;

    let mut seen = 0;
    let mut result = PathBuf::new();
    for component in components {
        match component {
            Component::Normal(segment) => {
                if seen == target {
                    result.push(brand);
                } else {
                    result.push(segment);
                }
                seen += 1;
            }
            other => result.push(other.as_os_str()),
        }
    }
    Some(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(LocaleSource::Filename, "brands/acme/locales/fr-CA.json", "fr-CA")]
    #[case(LocaleSource::Filename, "fr.json", "fr")]
    #[case(LocaleSource::Dirname, "brands/acme/fr/common.json", "fr")]
    #[case(LocaleSource::Dirname, "brands/core/en-GB/errors.json", "en-GB")]
    fn derives_locale(#[case] source: LocaleSource, #[case] path: &str, #[case] expected: &str) {
        let locale = source.derive_locale(Path::new(path)).unwrap();

        assert_eq!(locale.as_str(), expected);
    }

    #[rstest]
    fn dirname_without_parent_is_error() {
        let result = LocaleSource::Dirname.derive_locale(Path::new("fr.json"));

        assert!(matches!(result, Err(LocaleError::NoParentDirectory(_))));
    }

    #[rstest]
    #[case("filename", Ok(LocaleSource::Filename))]
    #[case("dirname", Ok(LocaleSource::Dirname))]
    #[case("basename", Err(LocaleError::UnknownSource("basename".to_string())))]
    fn parses_locale_source(
        #[case] input: &str,
        #[case] expected: std::result::Result<LocaleSource, LocaleError>,
    ) {
        assert_eq!(input.parse::<LocaleSource>(), expected);
    }

    #[rstest]
    #[case("fr", false, "fr")]
    #[case("fr-CA", true, "fr")]
    #[case("zh-Hant-TW", true, "zh")]
    fn regional_and_language(
        #[case] code: &str,
        #[case] regional: bool,
        #[case] language: &str,
    ) {
        let locale = Locale::new(code);

        assert_eq!(locale.is_regional(), regional);
        assert_eq!(locale.language().as_str(), language);
    }

    #[rstest]
    #[case("fr", "fr", true)]
    #[case("fr-CA", "fr", true)]
    #[case("de", "fr", false)]
    #[case("fr", "fr-CA", false)]
    fn column_prefix_matching(#[case] code: &str, #[case] column: &str, #[case] expected: bool) {
        assert_eq!(Locale::new(code).matches_column(column), expected);
    }

    #[rstest]
    #[case(LocaleSource::Filename, "brands/acme/locales/fr-CA.json", "brands/acme/locales/fr.json")]
    #[case(LocaleSource::Dirname, "brands/acme/fr-CA/common.json", "brands/acme/fr/common.json")]
    fn replaces_locale(#[case] source: LocaleSource, #[case] path: &str, #[case] expected: &str) {
        let result = source.with_locale(Path::new(path), &Locale::new("fr"));

        assert_eq!(result, Some(PathBuf::from(expected)));
    }

    #[rstest]
    #[case("brands/acme/locales/fr.json", 0, Some("fr.json"))]
    #[case("brands/acme/locales/fr.json", 2, Some("acme"))]
    #[case("/srv/brands/acme/locales/fr.json", 3, Some("brands"))]
    #[case("locales/fr.json", 3, None)]
    fn reads_brand(#[case] path: &str, #[case] offset: usize, #[case] expected: Option<&str>) {
        assert_eq!(file_brand(Path::new(path), offset).as_deref(), expected);
    }

    #[rstest]
    #[case("brands/acme/locales/fr.json", 2, Some("brands/core/locales/fr.json"))]
    #[case("/srv/acme/locales/fr.json", 2, Some("/srv/core/locales/fr.json"))]
    #[case("locales/fr.json", 2, None)]
    fn replaces_brand(#[case] path: &str, #[case] offset: usize, #[case] expected: Option<&str>) {
        assert_eq!(with_brand(Path::new(path), offset, "core"), expected.map(PathBuf::from));
    }
}
