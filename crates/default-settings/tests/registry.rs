//! File-based registry loading.

use std::fs;

use default_settings::{CategorySeed, RegistryError, SettingsRegistry};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn registry_dir() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

#[rstest]
fn loads_registry_from_file(registry_dir: TempDir) {
    let path = registry_dir.path().join("settings.json");
    fs::write(
        &path,
        r##"{
            "version": 1,
            "settings": [
                {"key": "siteName", "value": "Connect Staging", "category": "general", "isPublic": true},
                {"key": "primaryColor", "value": "#111827", "category": "appearance"}
            ]
        }"##,
    )
    .expect("write registry");

    let registry = SettingsRegistry::from_file(&path).expect("registry loads");

    assert_eq!(registry.settings().len(), 2);
    let colour = registry.find("primaryColor").expect("colour present");
    assert_eq!(colour.category, CategorySeed::Appearance);
}

#[rstest]
fn missing_file_reports_its_path(registry_dir: TempDir) {
    let path = registry_dir.path().join("absent.json");

    let error = SettingsRegistry::from_file(&path).expect_err("missing file must fail");

    match error {
        RegistryError::IoError { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected IoError, got {other:?}"),
    }
}
