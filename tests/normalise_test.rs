//! End-to-end normalise runs against a temporary working directory.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

mod common;

use std::path::Path;

use common::{
    read,
    workspace,
};
use locale_sync::app::{
    NormaliseRun,
    Summary,
    run_normalise,
};
use locale_sync::config::Settings;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const CORE_FR: &str = "brands/core/app/locales/fr.json";
const ACME_FR: &str = "brands/acme/app/locales/fr.json";
const ACME_FR_CA: &str = "brands/acme/app/locales/fr-CA.json";
const ACME_DE: &str = "brands/acme/app/locales/de.json";
const CORE_DE: &str = "brands/core/app/locales/de.json";

/// Two brands, three locales, one regional.
fn fixture() -> TempDir {
    workspace(&[
        (CORE_FR, r#"{"a": "Bonjour", "b": "Au revoir", "c": "Merci"}"#),
        (ACME_FR, r#"{"a": "Bonjour", "b": "Salut", "c": "$Merci$"}"#),
        (ACME_FR_CA, r#"{"a": "Bonjour", "b": "Salut", "d": "Allo"}"#),
        (CORE_DE, r#"{"a": "Hallo"}"#),
        (ACME_DE, r#"{"a": "Hallo"}"#),
    ])
}

/// Normalises every brand document.
fn run(root: &Path, settings: Settings) -> Summary {
    run_normalise(&NormaliseRun {
        cwd: root.to_path_buf(),
        files_pattern: "brands/**/*.json".to_string(),
        settings,
    })
    .unwrap()
}

#[test]
fn strips_entries_provided_by_base_documents() {
    let dir = fixture();

    let summary = run(dir.path(), Settings::default());

    assert_eq!(summary.written, 5);
    assert_eq!(summary.changed.len(), 3);
    assert_eq!(read(dir.path(), ACME_FR), "{\n  \"b\": \"Salut\"\n}\n");
    assert_eq!(read(dir.path(), ACME_FR_CA), "{\n  \"d\": \"Allo\"\n}\n");
    assert_eq!(read(dir.path(), ACME_DE), "{}\n");
    assert_eq!(
        read(dir.path(), CORE_FR),
        "{\n  \"a\": \"Bonjour\",\n  \"b\": \"Au revoir\",\n  \"c\": \"Merci\"\n}\n"
    );
}

#[test]
fn second_run_changes_nothing() {
    let dir = fixture();
    run(dir.path(), Settings::default());
    let first = [ACME_FR, ACME_FR_CA, ACME_DE].map(|path| read(dir.path(), path));

    let summary = run(dir.path(), Settings::default());

    assert!(summary.changed.is_empty());
    assert_eq!([ACME_FR, ACME_FR_CA, ACME_DE].map(|path| read(dir.path(), path)), first);
}

#[test]
fn custom_base_brand_name() {
    let dir = fixture();
    let settings = Settings { base_brand_name: "acme".to_string(), ..Settings::default() };

    let summary = run(dir.path(), settings);

    assert!(summary.changed.contains(Path::new(CORE_DE)));
    assert!(summary.changed.contains(Path::new(CORE_FR)));
    assert_eq!(read(dir.path(), CORE_DE), "{}\n");
    assert_eq!(read(dir.path(), CORE_FR), "{\n  \"b\": \"Au revoir\",\n  \"c\": \"Merci\"\n}\n");
}

#[test]
fn documents_outside_the_brand_layout_are_left_alone() {
    let dir = workspace(&[("brands/fr.json", r#"{"a": "Bonjour"}"#)]);

    let summary = run(dir.path(), Settings::default());

    assert_eq!(summary.written, 1);
    assert!(summary.changed.is_empty());
    assert_eq!(read(dir.path(), "brands/fr.json"), "{\n  \"a\": \"Bonjour\"\n}\n");
}
