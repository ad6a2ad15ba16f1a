//! Translate pipeline: substitutes table translations into locale documents.
//!
//! For every row and every applicable locale column, each document whose locale starts
//! with the column name has its matching leaves overwritten:
//!
//! 1. Values equal to the phrase or its placeholder (`$phrase$`) are replaced.
//! 2. When a document under a `core` path has no match and no region, the paths are taken
//!    from the core document instead and filled into the document.
//! 3. With key translation enabled, path segments equal to the phrase are renamed.

use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use crate::flat::FlatMap;
use crate::input::document::{
    ChangeSet,
    Document,
    DocumentSet,
};
use crate::input::table::TranslationTable;
use crate::locale::{
    Locale,
    LocaleSource,
};

/// Substring identifying documents that may inherit slots from the core document.
///
/// This is matched against the whole path, independently of the normalise base brand name.
pub const CORE_PATH_MARKER: &str = "core";

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error(
        "'{}' may inherit paths from the core document, but no core document is available",
        path.display()
    )]
    MissingCoreDocument { path: PathBuf },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Also rename path segments equal to the phrase.
    pub translate_keys: bool,
    pub locale_source: LocaleSource,
}

/// Returns true if a document without a match should borrow paths from the core document.
#[must_use]
pub fn uses_core_fallback(path: &Path, locale: &Locale) -> bool {
    path.to_string_lossy().contains(CORE_PATH_MARKER) && !locale.has_region_separator()
}

/// First target that a table column drives and that may borrow paths from the core document.
fn first_core_dependent<'a>(
    table: &TranslationTable,
    targets: &'a [(PathBuf, Locale)],
) -> Option<&'a Path> {
    targets
        .iter()
        .find(|(path, locale)| {
            uses_core_fallback(path, locale)
                && table
                    .rows()
                    .iter()
                    .flat_map(|row| row.translations())
                    .any(|(column, _)| locale.matches_column(column))
        })
        .map(|(path, _)| path.as_path())
}

/// Applies every translation in `table` to `documents`.
///
/// # Errors
/// Returns an error, before any document is touched, when a document may need the core
/// fallback and `core` is `None`. Document contents play no part in that check.
pub fn translate(
    table: &TranslationTable,
    documents: &mut DocumentSet,
    core: Option<&FlatMap>,
    options: TranslateOptions,
) -> Result<ChangeSet, TranslateError> {
    let targets: Vec<(PathBuf, Locale)> = documents
        .iter()
        .filter_map(|document| match options.locale_source.derive_locale(document.path()) {
            Ok(locale) => Some((document.path().to_path_buf(), locale)),
            Err(e) => {
                tracing::debug!("Skipping document without locale: {e}");
                None
            }
        })
        .collect();

    if core.is_none()
        && let Some(path) = first_core_dependent(table, &targets)
    {
        return Err(TranslateError::MissingCoreDocument { path: path.to_path_buf() });
    }

    let mut changes = ChangeSet::default();

    for row in table.rows() {
        let phrase = row.phrase();
        for (column, translation) in row.translations() {
            for (path, locale) in &targets {
                if !locale.matches_column(column) {
                    continue;
                }
                let Some(document) = documents.get_mut(path) else {
                    continue;
                };

                if translate_document(document, locale, phrase, translation, core, options) {
                    changes.record(path);
                }
            }
        }
    }

    tracing::info!(rows = table.rows().len(), changed = changes.len(), "Translation complete");
    Ok(changes)
}

/// Applies one phrase/translation pair to one document. Returns true if it was mutated.
fn translate_document(
    document: &mut Document,
    locale: &Locale,
    phrase: &str,
    translation: &str,
    core: Option<&FlatMap>,
    options: TranslateOptions,
) -> bool {
    let mut changed = substitute_values(document, locale, phrase, translation, core);
    if options.translate_keys {
        changed |= rename_keys(&mut document.content, phrase, translation);
    }
    changed
}

/// Overwrites matching values, borrowing paths from `core` when the document qualifies.
/// Returns true if any value actually changed.
fn substitute_values(
    document: &mut Document,
    locale: &Locale,
    phrase: &str,
    translation: &str,
    core: Option<&FlatMap>,
) -> bool {
    let mut paths = document.content.paths_with_value(phrase);

    if paths.is_empty()
        && uses_core_fallback(document.path(), locale)
        && let Some(core) = core
    {
        paths = core.paths_with_value(phrase);
        if !paths.is_empty() {
            tracing::debug!(
                path = %document.path().display(),
                phrase,
                matches = paths.len(),
                "Filling paths from core document"
            );
        }
    }

    let value = Value::String(translation.to_string());
    let mut changed = false;
    for path in paths {
        tracing::debug!(document = %document.path().display(), key = %path, "{phrase} -> {translation}");
        changed |= document.content.insert(path, value.clone()).as_ref() != Some(&value);
    }

    changed
}

/// Renames every path with a segment equal to the phrase (or its placeholder).
fn rename_keys(content: &mut FlatMap, phrase: &str, translation: &str) -> bool {
    let mut changed = false;
    for path in content.paths_with_segment(phrase) {
        let renamed = path.replace(phrase, translation);
        if content.rename(&path, &renamed) {
            tracing::debug!(from = %path, to = %renamed, "Renamed key");
            changed = true;
        }
    }
    changed
}
