//! Translation table input (CSV, one row per source phrase, one column per locale).

use std::io::Read;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

/// Cell value meaning "no translation for this locale".
const NOT_APPLICABLE: &str = "N/A";

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read translation table '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Translation table has no header row")]
    MissingHeader,
}

/// Returns true if the cell carries a translation.
#[must_use]
pub fn is_applicable(cell: &str) -> bool {
    let trimmed = cell.trim();
    !trimmed.is_empty() && trimmed != NOT_APPLICABLE
}

/// One phrase and its translations, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRow {
    /// `(locale, cell)` pairs; the first is the source locale.
    cells: Vec<(String, String)>,
}

impl TranslationRow {
    /// The source-language phrase.
    #[must_use]
    pub fn phrase(&self) -> &str {
        self.cells.first().map_or("", |(_, cell)| cell.as_str())
    }

    /// Non-source `(locale, translation)` pairs whose cell is applicable.
    pub fn translations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .skip(1)
            .filter(|(_, cell)| is_applicable(cell))
            .map(|(locale, cell)| (locale.as_str(), cell.as_str()))
    }
}

/// Parsed translation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
    source_locale: String,
    rows: Vec<TranslationRow>,
}

impl TranslationTable {
    /// Reads a table from a CSV file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid CSV.
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let file = std::fs::File::open(path)
            .map_err(|source| TableError::Io { path: path.to_path_buf(), source })?;
        Self::from_reader(file)
    }

    /// Reads a table from CSV text. The first header names the source locale.
    ///
    /// # Errors
    /// Returns an error for malformed CSV or a missing header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut reader =
            csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let header = if index == 0 { header.trim_start_matches('\u{feff}') } else { header };
                header.trim().to_string()
            })
            .collect();

        let Some(source_locale) = headers.first().filter(|h| !h.is_empty()).cloned() else {
            return Err(TableError::MissingHeader);
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let cells: Vec<(String, String)> = headers
                .iter()
                .zip(record.iter())
                .map(|(locale, cell)| (locale.clone(), cell.to_string()))
                .collect();
            let row = TranslationRow { cells };

            if row.phrase().trim().is_empty() {
                tracing::debug!("Skipping translation row without a source phrase");
                continue;
            }
            rows.push(row);
        }

        tracing::debug!(%source_locale, rows = rows.len(), "Loaded translation table");
        Ok(Self { source_locale, rows })
    }

    /// Header of the first column.
    #[must_use]
    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    #[must_use]
    pub fn rows(&self) -> &[TranslationRow] {
        &self.rows
    }
}
