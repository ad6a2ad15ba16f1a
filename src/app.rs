//! Pipeline runs: discover, load, mutate, write back.

use std::path::{
    Path,
    PathBuf,
};

use crate::config::{
    FileMatcher,
    Settings,
};
use crate::error::Error;
use crate::flat::FlatMap;
use crate::input::document::{
    ChangeSet,
    Document,
    DocumentSet,
};
use crate::input::table::TranslationTable;
use crate::locale::LocaleSource;
use crate::normalise::{
    NormaliseOptions,
    normalise,
};
use crate::translate::{
    CORE_PATH_MARKER,
    TranslateOptions,
    translate,
};

/// Inputs of a translate run. Relative paths resolve against `cwd`.
#[derive(Debug, Clone)]
pub struct TranslateRun {
    pub cwd: PathBuf,
    /// Translation table (CSV).
    pub source: PathBuf,
    /// Glob selecting the destination documents.
    pub destinations: String,
    pub settings: Settings,
}

/// Inputs of a normalise run.
#[derive(Debug, Clone)]
pub struct NormaliseRun {
    pub cwd: PathBuf,
    /// Glob selecting the documents to normalise.
    pub files_pattern: String,
    pub settings: Settings,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Documents written back (every loaded document).
    pub written: usize,
    /// Documents that were actually mutated.
    pub changed: ChangeSet,
}

impl Summary {
    /// Logs the outcome; with `verbose`, also each changed file.
    pub fn report(&self, verbose: bool) {
        tracing::info!("Wrote {} files ({} changed)", self.written, self.changed.len());
        if verbose {
            for path in self.changed.paths() {
                tracing::info!("  {}", path.display());
            }
        }
    }
}

/// Matches `pattern` under `cwd`; an empty result is only a warning.
fn discover(cwd: &Path, pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let paths = FileMatcher::new(cwd.to_path_buf(), &[pattern.to_string()])?.discover();
    if paths.is_empty() {
        tracing::warn!("No files match '{pattern}' under {}", cwd.display());
    }
    Ok(paths)
}

/// The first loaded document under a `core` path whose locale is the source locale.
#[must_use]
pub fn detect_core<'a>(
    documents: &'a DocumentSet,
    locale_source: LocaleSource,
    source_locale: &str,
) -> Option<&'a Document> {
    documents.iter().find(|document| {
        document.path().to_string_lossy().contains(CORE_PATH_MARKER)
            && locale_source
                .derive_locale(document.path())
                .is_ok_and(|locale| locale.as_str() == source_locale)
    })
}

/// Reads the explicit core document, or falls back to detection among `documents`.
fn resolve_core(
    cwd: &Path,
    settings: &Settings,
    documents: &DocumentSet,
    source_locale: &str,
) -> Result<Option<FlatMap>, Error> {
    if let Some(core) = &settings.core {
        tracing::debug!(path = %core.display(), "Using explicit core document");
        return Ok(Some(Document::load(cwd, core)?.content));
    }

    let detected = detect_core(documents, settings.file_locale_source, source_locale);
    match detected {
        Some(document) => {
            tracing::debug!(path = %document.path().display(), "Detected core document");
        }
        None => tracing::debug!("No core document among destinations"),
    }
    Ok(detected.map(|document| document.content.clone()))
}

/// Propagates table translations into the destination documents.
///
/// # Errors
/// Any read, parse, or write failure, or a missing core document when one is needed.
pub fn run_translate(run: &TranslateRun) -> Result<Summary, Error> {
    let table = TranslationTable::from_path(&run.cwd.join(&run.source))?;
    let paths = discover(&run.cwd, &run.destinations)?;
    let mut documents = DocumentSet::load(&run.cwd, &paths)?;
    let core = resolve_core(&run.cwd, &run.settings, &documents, table.source_locale())?;

    let options = TranslateOptions {
        translate_keys: run.settings.translate_keys,
        locale_source: run.settings.file_locale_source,
    };
    let changed = translate(&table, &mut documents, core.as_ref(), options)?;
    let written = documents.write_all(&run.cwd)?;

    Ok(Summary { written, changed })
}

/// Strips entries that base documents already provide.
///
/// # Errors
/// Any read, parse, or write failure.
pub fn run_normalise(run: &NormaliseRun) -> Result<Summary, Error> {
    let paths = discover(&run.cwd, &run.files_pattern)?;
    let mut documents = DocumentSet::load(&run.cwd, &paths)?;

    let options = NormaliseOptions {
        brand_position: run.settings.brand_position,
        base_brand_name: run.settings.base_brand_name.clone(),
        locale_source: run.settings.file_locale_source,
    };
    let changed = normalise(&mut documents, &options);
    let written = documents.write_all(&run.cwd)?;

    Ok(Summary { written, changed })
}
