//! Glob-based discovery of locale documents.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    GlobBuilder,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches document paths, relative to the working directory, against a glob.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    root: PathBuf,
    pattern_set: GlobSet,
}

impl FileMatcher {
    /// Compiles `patterns`. `*` does not cross directory separators; `**` does.
    pub fn new(root: PathBuf, patterns: &[String]) -> Result<Self, MatcherError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern.trim_start_matches("./"))
                .literal_separator(true)
                .build()
                .map_err(|source| MatcherError::InvalidPattern { pattern: pattern.clone(), source })?;
            builder.add(glob);
        }

        Ok(Self { root, pattern_set: builder.build()? })
    }

    /// The path must be relative to the root.
    #[must_use]
    pub fn is_match_relative(&self, relative_path: &Path) -> bool {
        self.pattern_set.is_match(relative_path)
    }

    /// Walks the root and returns every matching file, relative and sorted.
    #[must_use]
    pub fn discover(&self) -> Vec<PathBuf> {
        let mut found_files = Vec::new();

        for result in WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let Ok(relative_path) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if self.is_match_relative(relative_path) {
                found_files.push(relative_path.to_path_buf());
            }
        }

        found_files.sort();
        tracing::debug!(root = %self.root.display(), count = found_files.len(), "Discovered files");
        found_files
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn matcher(patterns: &[&str]) -> Result<FileMatcher, MatcherError> {
        let patterns: Vec<String> = patterns.iter().copied().map(String::from).collect();
        FileMatcher::new(PathBuf::from("/workspace"), &patterns)
    }

    #[rstest]
    #[case("brands/*/locales/*.json", "brands/acme/locales/fr.json", true)]
    #[case("brands/*/locales/*.json", "brands/acme/web/locales/fr.json", false)]
    #[case("brands/**/*.json", "brands/acme/web/locales/fr.json", true)]
    #[case("./locales/*.json", "locales/fr.json", true)]
    #[case("locales/*.json", "locales/fr.csv", false)]
    fn matches_relative_paths(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
        let matcher = matcher(&[pattern]).expect("valid pattern");

        assert_eq!(matcher.is_match_relative(Path::new(path)), expected);
    }

    #[rstest]
    fn invalid_pattern_is_rejected() {
        let result = matcher(&["locales/*.{json"]);

        assert!(matches!(result, Err(MatcherError::InvalidPattern { .. })));
    }

    #[rstest]
    fn discover_returns_sorted_relative_matches() {
        let temp_dir = TempDir::new().unwrap();
        for path in ["b/locales/fr.json", "a/locales/fr.json", "a/locales/notes.txt", "a/fr.json"] {
            let file = temp_dir.path().join(path);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, "{}").unwrap();
        }
        let matcher =
            FileMatcher::new(temp_dir.path().to_path_buf(), &["*/locales/*.json".to_string()])
                .expect("valid pattern");

        let found = matcher.discover();

        assert_eq!(
            found,
            vec![PathBuf::from("a/locales/fr.json"), PathBuf::from("b/locales/fr.json")]
        );
    }
}
