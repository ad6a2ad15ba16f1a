//! Workspace fixtures shared by the pipeline tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates a temporary working directory populated with `files`.
pub fn workspace(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, content) in files {
        write(temp_dir.path(), path, content);
    }
    temp_dir
}

/// Writes `content` to `root/path`, creating parent directories.
pub fn write(root: &Path, path: &str, content: &str) {
    let file = root.join(path);
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

/// Reads `root/path` back as text.
pub fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}
