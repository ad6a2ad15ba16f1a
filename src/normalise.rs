//! Normalise pipeline: removes entries that a base document already provides.
//!
//! A document inherits from up to three base documents, all of which must be loaded:
//! the same locale under the base brand, and for regional locales the language-only
//! document under the base brand and under its own brand.

use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use crate::flat::{
    FlatMap,
    is_placeholder,
};
use crate::input::document::{
    ChangeSet,
    DocumentSet,
};
use crate::locale::{
    LocaleSource,
    file_brand,
    with_brand,
};

/// Default brand whose documents are the shared source of truth.
pub const DEFAULT_BASE_BRAND: &str = "core";

/// Default brand segment offset from the end of a document path.
pub const DEFAULT_BRAND_POSITION: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormaliseOptions {
    /// Segment offset from the end of the path (0 = file name).
    pub brand_position: usize,
    pub base_brand_name: String,
    pub locale_source: LocaleSource,
}

impl Default for NormaliseOptions {
    fn default() -> Self {
        Self {
            brand_position: DEFAULT_BRAND_POSITION,
            base_brand_name: DEFAULT_BASE_BRAND.to_string(),
            locale_source: LocaleSource::default(),
        }
    }
}

/// Loaded documents that `path` inherits from, without duplicates.
#[must_use]
pub fn base_candidates(
    path: &Path,
    options: &NormaliseOptions,
    documents: &DocumentSet,
) -> Vec<PathBuf> {
    let locale = match options.locale_source.derive_locale(path) {
        Ok(locale) => locale,
        Err(e) => {
            tracing::debug!("Skipping document without locale: {e}");
            return Vec::new();
        }
    };
    let Some(brand) = file_brand(path, options.brand_position) else {
        tracing::debug!(path = %path.display(), "Skipping document without brand segment");
        return Vec::new();
    };
    let is_base_brand = brand == options.base_brand_name;
    let to_base_brand =
        |path: &Path| with_brand(path, options.brand_position, &options.base_brand_name);

    let mut candidates = Vec::new();
    if !is_base_brand {
        candidates.extend(to_base_brand(path));
    }
    if locale.is_regional()
        && let Some(language_path) = options.locale_source.with_locale(path, &locale.language())
    {
        candidates.extend(to_base_brand(&language_path));
        candidates.push(language_path);
    }

    let mut result: Vec<PathBuf> = Vec::new();
    for candidate in candidates {
        if candidate != path && documents.contains(&candidate) && !result.contains(&candidate) {
            result.push(candidate);
        }
    }
    result
}

/// Returns true if `base` makes the entry redundant.
///
/// Either the base holds the same value, or the entry is still a placeholder while the base
/// has a resolved value.
#[must_use]
pub fn is_redundant(key: &str, value: &Value, base: &FlatMap) -> bool {
    base.get(key).is_some_and(|base_value| {
        base_value == value || (is_placeholder(value) && !is_placeholder(base_value))
    })
}

/// Removes redundant entries from every document.
///
/// Bases are compared as loaded, so the outcome does not depend on document order.
pub fn normalise(documents: &mut DocumentSet, options: &NormaliseOptions) -> ChangeSet {
    let snapshot = documents.clone();
    let mut changes = ChangeSet::default();

    for document in documents.iter_mut() {
        let bases: Vec<&FlatMap> = base_candidates(document.path(), options, &snapshot)
            .iter()
            .filter_map(|path| snapshot.get(path))
            .map(|base| &base.content)
            .collect();
        if bases.is_empty() {
            continue;
        }

        let before = document.content.len();
        document
            .content
            .retain(|key, value| !bases.iter().any(|base| is_redundant(key, value, base)));
        let removed = before - document.content.len();

        if removed > 0 {
            tracing::debug!(path = %document.path().display(), removed, "Removed inherited entries");
            changes.record(document.path());
        }
    }

    changes
}
