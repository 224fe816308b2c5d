//! Configuration file discovery and loading

use super::document::ConfigDocument;
use crate::error::ConfigError;
use crate::result::Result;
use crate::rule_sets::RuleSetCatalog;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Config file names in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".lintconfrc.json",
    ".lintconfrc.jsonc",
    ".lintconfrc.yaml",
    ".lintconfrc.yml",
    ".lintconfrc.toml",
];

/// Whether an extends entry refers to a file next to the referring document
pub fn is_file_reference(reference: &str) -> bool {
    reference.starts_with("./") || reference.starts_with("../")
}

/// Catalog identifier for a loaded file
fn reference_key(path: &Path) -> String {
    path.display().to_string()
}

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover config file by traversing upward from start_path
    ///
    /// Tries each name in [`CONFIG_FILE_NAMES`] in every directory, moving up
    /// the directory tree until a config is found or the filesystem root is
    /// reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| ConfigError::io(start_path, e))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            // Move up to parent directory
            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                // Reached filesystem root
                break;
            }
        }

        Ok(None)
    }

    /// Load a single document
    ///
    /// Supports JSON and JSONC (.json, .jsonc; comments and trailing commas
    /// allowed), YAML (.yaml, .yml) and TOML (.toml).
    pub fn load_from_file(path: &Path) -> Result<ConfigDocument> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        trace!("Parsing {} as {:?}", path.display(), ext);
        match ext {
            Some("json") | Some("jsonc") => {
                json5::from_str(&content).map_err(|e| ConfigError::parse(path, e))
            }
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| ConfigError::parse(path, e))
            }
            Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::parse(path, e)),
            _ => Err(ConfigError::parse(
                path,
                "Unsupported file extension (expected .json, .jsonc, .yaml, .yml or .toml)",
            )),
        }
    }

    /// Load a document and pre-load every file it extends
    ///
    /// File references (`./base.json`, `../shared.yaml`) are resolved
    /// relative to the referring file, rewritten to the canonical path of
    /// the target and registered in `catalog` under that path, recursively.
    /// The returned document is registered under its own path as well.
    pub fn load_with_references(
        path: &Path,
        catalog: &mut RuleSetCatalog,
    ) -> Result<ConfigDocument> {
        let path = path.canonicalize().map_err(|e| ConfigError::io(path, e))?;
        let mut visited = HashSet::new();
        Self::load_recursive(&path, catalog, &mut visited)
    }

    fn load_recursive(
        path: &Path,
        catalog: &mut RuleSetCatalog,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<ConfigDocument> {
        visited.insert(path.to_path_buf());
        let mut document = Self::load_from_file(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        for reference in document.extends.iter_mut() {
            if !is_file_reference(reference) {
                continue;
            }

            let target = base_dir.join(reference.as_str());
            let target = target
                .canonicalize()
                .map_err(|e| ConfigError::io(&target, e))?;
            debug!("Extends '{}' resolves to {}", reference, target.display());
            *reference = reference_key(&target);

            // An already-visited file is either registered or on the current
            // load path; a cycle surfaces during resolution.
            if !visited.contains(&target) {
                Self::load_recursive(&target, catalog, visited)?;
            }
        }

        catalog.register(reference_key(path), document.clone());
        Ok(document)
    }

    /// Load the nearest config and the cascade of parent directory configs
    ///
    /// Starting from the nearest config above `start_dir`, parent
    /// directories are searched until a document with `root: true` is found
    /// or the filesystem root is reached. Each parent config is prepended to
    /// its child's extends chain, so nearer configs take precedence.
    ///
    /// Returns `None` when no config file exists above `start_dir`.
    pub fn load_cascade(
        start_dir: &Path,
        catalog: &mut RuleSetCatalog,
    ) -> Result<Option<ConfigDocument>> {
        let Some(nearest) = Self::auto_discover(start_dir)? else {
            return Ok(None);
        };

        let document = Self::load_with_references(&nearest, catalog)?;
        let mut layers = vec![(nearest, document)];

        while let Some((path, document)) = layers.last()
            && !document.is_root()
        {
            let Some(parent_dir) = path.parent().and_then(Path::parent) else {
                break;
            };
            let Some(parent) = Self::auto_discover(parent_dir)? else {
                break;
            };
            let parent_document = Self::load_with_references(&parent, catalog)?;
            layers.push((parent, parent_document));
        }

        debug!("Configuration cascade has {} level(s)", layers.len());

        // Stitch from the outermost config inward
        let mut parent_key: Option<String> = None;
        let mut nearest_document = None;
        for (path, mut document) in layers.into_iter().rev() {
            if let Some(key) = parent_key.take() {
                document.extends.insert(0, key);
            }
            let key = reference_key(&path);
            catalog.register(key.clone(), document.clone());
            parent_key = Some(key);
            nearest_document = Some(document);
        }

        Ok(nearest_document)
    }

    /// Load config from path or auto-discover
    ///
    /// If a custom path is provided, loads it with its file references.
    /// Otherwise loads the cascade starting at `start_dir` (or the current
    /// directory).
    pub fn load(
        custom_path: Option<&Path>,
        start_dir: Option<&Path>,
        catalog: &mut RuleSetCatalog,
    ) -> Result<ConfigDocument> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(ConfigError::not_found(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_with_references(path, catalog);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        Self::load_cascade(search_dir, catalog)?.ok_or_else(|| {
            ConfigError::not_found(format!(
                "No config file found ({}). Run 'lintconf init' to create one",
                CONFIG_FILE_NAMES.join(", ")
            ))
        })
    }
}
