//! Locale documents (JSON files) held as flat maps.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use crate::flat::{
    FlatMap,
    flatten,
    unflatten,
};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read document '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document '{}' must contain an object or array at its root", path.display())]
    UnexpectedRoot { path: PathBuf },

    #[error("Failed to serialize document '{}': {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write document '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single locale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the working directory.
    path: PathBuf,
    pub content: FlatMap,
}

impl Document {
    #[must_use]
    pub const fn new(path: PathBuf, content: FlatMap) -> Self {
        Self { path, content }
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    /// Returns an error if the text is not JSON or its root is a scalar.
    pub fn parse(path: PathBuf, text: &str) -> Result<Self, DocumentError> {
        let json: Value = match serde_json::from_str(text) {
            Ok(json) => json,
            Err(source) => return Err(DocumentError::Parse { path, source }),
        };

        if !(json.is_object() || json.is_array()) {
            return Err(DocumentError::UnexpectedRoot { path });
        }

        Ok(Self { path, content: flatten(&json) })
    }

    /// Reads `root/path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(root: &Path, path: &Path) -> Result<Self, DocumentError> {
        let absolute = root.join(path);
        let text = std::fs::read_to_string(&absolute)
            .map_err(|source| DocumentError::Read { path: absolute.clone(), source })?;
        Self::parse(path.to_path_buf(), &text)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pretty JSON (2-space indent) with a trailing newline.
    ///
    /// # Errors
    /// Returns an error if the tree cannot be serialized.
    pub fn render(&self) -> Result<String, DocumentError> {
        let value: Value = unflatten(&self.content).into();
        let mut text = serde_json::to_string_pretty(&value)
            .map_err(|source| DocumentError::Render { path: self.path.clone(), source })?;
        text.push('\n');
        Ok(text)
    }

    /// Overwrites `root/path` with the rendered document.
    ///
    /// # Errors
    /// Returns an error if the document cannot be serialized or the file cannot be written.
    pub fn write(&self, root: &Path) -> Result<(), DocumentError> {
        let text = self.render()?;
        let absolute = root.join(&self.path);
        std::fs::write(&absolute, text)
            .map_err(|source| DocumentError::Write { path: absolute, source })
    }
}

/// All documents of one pipeline run, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    documents: BTreeMap<PathBuf, Document>,
}

impl DocumentSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every path under `root`. Any failure aborts the whole load.
    ///
    /// # Errors
    /// Returns the first read or parse error.
    pub fn load(root: &Path, paths: &[PathBuf]) -> Result<Self, DocumentError> {
        let mut set = Self::new();
        for path in paths {
            let document = Document::load(root, path)?;
            tracing::debug!(path = %path.display(), keys = document.content.len(), "Loaded document");
            set.insert(document);
        }
        Ok(set)
    }

    pub fn insert(&mut self, document: Document) {
        self.documents.insert(document.path.clone(), document);
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&Document> {
        self.documents.get(path)
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut Document> {
        self.documents.get_mut(path)
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.documents.contains_key(path)
    }

    /// Loaded paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.documents.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Document> {
        self.documents.values_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Rewrites every loaded document, changed or not.
    ///
    /// # Errors
    /// Returns the first write error.
    pub fn write_all(&self, root: &Path) -> Result<usize, DocumentError> {
        for document in self.documents.values() {
            document.write(root)?;
            tracing::trace!(path = %document.path.display(), "Wrote document");
        }
        Ok(self.documents.len())
    }
}

/// Documents mutated during a run, each recorded once, in first-touch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    paths: Vec<PathBuf>,
}

impl ChangeSet {
    /// Records `path`; returns false if it was already recorded.
    pub fn record(&mut self, path: &Path) -> bool {
        if self.contains(path) {
            return false;
        }
        self.paths.push(path.to_path_buf());
        true
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[googletest::test]
    fn render_is_pretty_with_trailing_newline() {
        let document = Document::parse(
            PathBuf::from("fr.json"),
            r#"{"buttons":{"ok":"OK","cancel":"Annuler"},"list":["a","b"]}"#,
        )
        .unwrap();

        let expected = "{\n  \"buttons\": {\n    \"ok\": \"OK\",\n    \"cancel\": \"Annuler\"\n  },\n  \"list\": [\n    \"a\",\n    \"b\"\n  ]\n}\n";
        expect_that!(document.render().unwrap(), eq(expected));
    }

    #[rstest]
    #[case("\"just a string\"")]
    #[case("42")]
    #[case("null")]
    fn scalar_root_is_rejected(#[case] text: &str) {
        let result = Document::parse(PathBuf::from("x.json"), text);

        assert!(matches!(result, Err(DocumentError::UnexpectedRoot { .. })));
    }

    #[rstest]
    fn malformed_json_is_parse_error() {
        let result = Document::parse(PathBuf::from("x.json"), "{ not json");

        assert!(matches!(result, Err(DocumentError::Parse { .. })));
    }

    #[googletest::test]
    fn load_and_write_all_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("locales")).unwrap();
        fs::write(temp_dir.path().join("locales/fr.json"), r#"{"a":{"b":"c"}}"#).unwrap();
        fs::write(temp_dir.path().join("locales/de.json"), r#"{"x":"y"}"#).unwrap();
        let paths = vec![PathBuf::from("locales/fr.json"), PathBuf::from("locales/de.json")];

        let mut set = DocumentSet::load(temp_dir.path(), &paths).unwrap();
        set.get_mut(Path::new("locales/fr.json")).unwrap().content.insert("a.d", json!("e"));
        let written = set.write_all(temp_dir.path()).unwrap();

        expect_that!(written, eq(2));
        let loaded: Vec<&Path> = set.paths().collect();
        assert_eq!(loaded, vec![Path::new("locales/de.json"), Path::new("locales/fr.json")]);
        let text = fs::read_to_string(temp_dir.path().join("locales/fr.json")).unwrap();
        expect_that!(text, eq("{\n  \"a\": {\n    \"b\": \"c\",\n    \"d\": \"e\"\n  }\n}\n"));
        let text = fs::read_to_string(temp_dir.path().join("locales/de.json")).unwrap();
        expect_that!(text, eq("{\n  \"x\": \"y\"\n}\n"));
    }

    #[googletest::test]
    fn change_set_records_each_path_once() {
        let mut changes = ChangeSet::default();

        expect_that!(changes.record(Path::new("b.json")), eq(true));
        expect_that!(changes.record(Path::new("a.json")), eq(true));
        expect_that!(changes.record(Path::new("b.json")), eq(false));
        expect_that!(changes.len(), eq(2));
        expect_that!(changes.paths().first(), some(eq(&PathBuf::from("b.json"))));
    }

    #[googletest::test]
    fn render_error_names_the_document() {
        let source = serde_json::from_str::<Value>("{").unwrap_err();
        let error = DocumentError::Render { path: PathBuf::from("locales/fr.json"), source };

        expect_that!(
            error.to_string(),
            starts_with("Failed to serialize document 'locales/fr.json'")
        );
    }

    #[googletest::test]
    fn write_into_missing_directory_is_write_error() {
        let temp_dir = TempDir::new().unwrap();
        let document = Document::new(PathBuf::from("missing/fr.json"), FlatMap::new());

        let result = document.write(temp_dir.path());

        assert!(matches!(result, Err(DocumentError::Write { .. })));
        expect_that!(temp_dir.path().join("missing").exists(), eq(false));
    }

    #[googletest::test]
    fn load_missing_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = DocumentSet::load(temp_dir.path(), &[PathBuf::from("missing.json")]);

        assert!(matches!(result, Err(DocumentError::Read { .. })));
    }
}
