//! Integration tests for configuration loading
//!
//! Covers discovery, file-relative extends and the directory cascade, each
//! followed by a resolution of the loaded document.

use lintconf_core::{
    ConfigDocument, ConfigLoader, EffectiveConfiguration, EnvironmentRegistry,
    EnvironmentSnapshot, ErrorKind, Resolver, Result, RuleSetCatalog, Severity,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, filename: &str, content: &str) {
    let path = dir.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn resolve(catalog: RuleSetCatalog, document: &ConfigDocument) -> Result<EffectiveConfiguration> {
    let resolver = Resolver::new(catalog, EnvironmentRegistry::with_builtins());
    resolver.resolve(document, &EnvironmentSnapshot::new())
}

#[test]
fn test_file_relative_extends() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "shared/base.yaml",
        "extends: eslint:recommended\nrules:\n  semi: error\n  quotes: [warn, double]\n",
    );
    write(
        temp_dir.path(),
        ".lintconfrc.json",
        r#"{ "extends": ["./shared/base.yaml"], "rules": { "semi": "off" } }"#,
    );

    let mut catalog = RuleSetCatalog::with_builtins();
    let document =
        ConfigLoader::load_with_references(&temp_dir.path().join(".lintconfrc.json"), &mut catalog)
            .unwrap();

    // the reference was rewritten to the canonical path and registered
    assert!(catalog.contains(&document.extends[0]));

    let effective = resolve(catalog, &document).unwrap();
    assert_eq!(effective.severity("semi"), Some(Severity::Off));
    assert_eq!(effective.severity("quotes"), Some(Severity::Warn));
    assert_eq!(effective.severity("no-undef"), Some(Severity::Error));
}

#[test]
fn test_same_relative_name_in_different_directories() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a/base.json", r#"{ "rules": { "semi": "error" } }"#);
    write(temp_dir.path(), "b/base.json", r#"{ "rules": { "semi": "warn" } }"#);
    write(temp_dir.path(), "a/entry.json", r#"{ "extends": "./base.json" }"#);
    write(
        temp_dir.path(),
        "b/entry.json",
        r#"{ "extends": ["../a/entry.json", "./base.json"] }"#,
    );

    let mut catalog = RuleSetCatalog::new();
    let document =
        ConfigLoader::load_with_references(&temp_dir.path().join("b/entry.json"), &mut catalog)
            .unwrap();

    let effective = resolve(catalog, &document).unwrap();
    assert_eq!(effective.severity("semi"), Some(Severity::Warn));
}

#[test]
fn test_file_cycle_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a.json", r#"{ "extends": "./b.json" }"#);
    write(temp_dir.path(), "b.json", r#"{ "extends": "./a.json" }"#);

    let mut catalog = RuleSetCatalog::new();
    let document =
        ConfigLoader::load_with_references(&temp_dir.path().join("a.json"), &mut catalog).unwrap();

    let err = resolve(catalog, &document).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cycle);
}

#[test]
fn test_missing_referenced_file() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a.json", r#"{ "extends": "./missing.json" }"#);

    let mut catalog = RuleSetCatalog::new();
    let err = ConfigLoader::load_with_references(&temp_dir.path().join("a.json"), &mut catalog)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_cascade_nearest_config_wins() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        ".lintconfrc.json",
        r#"{
            "root": true,
            "env": { "node": true },
            "rules": { "semi": "error", "eqeqeq": "error" }
        }"#,
    );
    write(
        temp_dir.path(),
        "packages/web/.lintconfrc.yaml",
        "env:\n  browser: true\nrules:\n  semi: warn\n",
    );
    let start = temp_dir.path().join("packages/web/src");
    fs::create_dir_all(&start).unwrap();

    let mut catalog = RuleSetCatalog::new();
    let document = ConfigLoader::load_cascade(&start, &mut catalog)
        .unwrap()
        .unwrap();
    assert_eq!(document.extends.len(), 1);

    let effective = resolve(catalog, &document).unwrap();
    assert_eq!(effective.severity("semi"), Some(Severity::Warn));
    assert_eq!(effective.severity("eqeqeq"), Some(Severity::Error));
    assert!(effective.has_global("process"));
    assert!(effective.has_global("window"));
}

#[test]
fn test_cascade_stops_at_root() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        ".lintconfrc.json",
        r#"{ "rules": { "eqeqeq": "error" } }"#,
    );
    write(
        temp_dir.path(),
        "project/.lintconfrc.json",
        r#"{ "root": true, "rules": { "semi": "warn" } }"#,
    );

    let mut catalog = RuleSetCatalog::new();
    let document = ConfigLoader::load_cascade(&temp_dir.path().join("project"), &mut catalog)
        .unwrap()
        .unwrap();
    assert!(document.extends.is_empty());

    let effective = resolve(catalog, &document).unwrap();
    assert_eq!(effective.severity("eqeqeq"), None);
    assert_eq!(effective.severity("semi"), Some(Severity::Warn));
}

#[test]
fn test_load_with_custom_path_missing() {
    let mut catalog = RuleSetCatalog::new();
    let err = ConfigLoader::load(Some(Path::new("does/not/exist.json")), None, &mut catalog)
        .unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}
