//! Command implementations

use colored::*;
use lintconf_core::{
    ConfigDocument, ConfigError, ConfigLoader, EffectiveConfiguration, EnvironmentRegistry,
    EnvironmentSnapshot, Resolver, Result, RuleSetCatalog,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::output::{MatrixRow, OutputFormatter};
use crate::{ConfigFormat, OutputFormat};

/// Load the configuration document and every file it references
///
/// Returns the resolver built over the populated catalog alongside the
/// root document.
fn load_resolver(
    config_path: Option<PathBuf>,
    path: Option<PathBuf>,
) -> Result<(Resolver, ConfigDocument)> {
    let mut catalog = RuleSetCatalog::with_builtins();
    let document = ConfigLoader::load(config_path.as_deref(), path.as_deref(), &mut catalog)?;
    debug!(
        "Loaded configuration ({} extends, {} rules, {} rule-sets in catalog)",
        document.extends.len(),
        document.rules.len(),
        catalog.len()
    );

    let resolver = Resolver::new(catalog, EnvironmentRegistry::with_builtins());
    Ok((resolver, document))
}

fn snapshot_for(build_mode: Option<&str>, environments: &[String]) -> EnvironmentSnapshot {
    let snapshot = EnvironmentSnapshot::new().with_environments(environments.iter().cloned());
    match build_mode {
        Some(mode) => snapshot.with_build_mode(mode),
        None => snapshot,
    }
}

/// Resolve command implementation
pub fn resolve_command(
    config_path: Option<PathBuf>,
    path: Option<PathBuf>,
    build_mode: Option<String>,
    environments: Vec<String>,
    format: OutputFormat,
    no_color: bool,
) -> Result<()> {
    debug!(
        "Resolving configuration (build mode: {:?}, environments: {:?})",
        build_mode, environments
    );

    let (resolver, document) = load_resolver(config_path, path)?;
    let snapshot = snapshot_for(build_mode.as_deref(), &environments);
    let effective = resolver.resolve(&document, &snapshot)?;

    info!(
        "Resolved {} rules ({} enabled)",
        effective.rules().len(),
        effective.enabled_rules().count()
    );

    OutputFormatter::new(format, !no_color).print_effective(&effective, snapshot.build_mode())
}

/// Matrix command implementation
pub fn matrix_command(
    config_path: Option<PathBuf>,
    path: Option<PathBuf>,
    build_modes: Vec<String>,
    environments: Vec<String>,
    format: OutputFormat,
    no_color: bool,
) -> Result<()> {
    debug!("Resolving configuration for build modes {:?}", build_modes);

    let (resolver, document) = load_resolver(config_path, path)?;
    let snapshots: Vec<EnvironmentSnapshot> = build_modes
        .iter()
        .map(|mode| snapshot_for(Some(mode), &environments))
        .collect();

    let configurations = resolver
        .resolve_all(&document, &snapshots)
        .into_iter()
        .collect::<Result<Vec<EffectiveConfiguration>>>()?;

    let rows = differing_rules(&configurations);
    OutputFormatter::new(format, !no_color).print_matrix(&build_modes, &rows)
}

/// Rules whose severity is not the same in every configuration
fn differing_rules(configurations: &[EffectiveConfiguration]) -> Vec<MatrixRow> {
    let Some((first, rest)) = configurations.split_first() else {
        return Vec::new();
    };

    let mut names: Vec<&str> = rest
        .iter()
        .flat_map(|other| first.severity_differences(other))
        .map(|(name, _, _)| name)
        .collect();
    names.sort_unstable();
    names.dedup();

    names
        .into_iter()
        .map(|name| MatrixRow {
            rule: name.to_string(),
            severities: configurations.iter().map(|c| c.severity(name)).collect(),
        })
        .collect()
}

/// Validate command implementation
pub fn validate_command(config_path: Option<PathBuf>, path: Option<PathBuf>) -> Result<()> {
    debug!("Validating configuration");

    let result = load_resolver(config_path, path).and_then(|(resolver, document)| {
        resolver
            .resolve(&document, &EnvironmentSnapshot::new())
            .map(|effective| (document, effective))
    });

    match result {
        Ok((document, effective)) => {
            println!("{} Configuration is valid", "✓".green());
            println!("   Extends: {}", document.extends.len());
            println!(
                "   Rules: {} ({} enabled)",
                effective.rules().len(),
                effective.enabled_rules().count()
            );
            println!("   Environments: {}", effective.environments().len());
            Ok(())
        }
        Err(e) => {
            error!("Configuration validation failed");
            Err(e)
        }
    }
}

/// Presets command implementation
pub fn presets_command(detailed: bool) -> Result<()> {
    let catalog = RuleSetCatalog::with_builtins();

    println!("Built-in rule-sets:");
    for name in catalog.names() {
        let Some(document) = catalog.get(name) else {
            continue;
        };

        if detailed {
            println!("\n{}", name.bold());
            if !document.extends.is_empty() {
                println!("  Extends: {}", document.extends.join(", "));
            }
            if !document.env.is_empty() {
                let envs: Vec<&str> = document.env.keys().map(String::as_str).collect();
                println!("  Environments: {}", envs.join(", "));
            }
            println!("  Rules: {}", document.rules.len());
        } else {
            println!("  {name}");
        }
    }

    println!("\nTotal: {} rule-sets", catalog.len());
    Ok(())
}

/// Envs command implementation
pub fn envs_command(show_globals: bool) -> Result<()> {
    let registry = EnvironmentRegistry::with_builtins();

    println!("Built-in environments:");
    for name in registry.names() {
        let globals = registry.globals_for(name).map_or(0, |g| g.len());
        println!("  {} ({} globals)", name, globals);

        if show_globals && let Some(globals) = registry.globals_for(name) {
            for global in globals {
                println!("    {}", global.dimmed());
            }
        }
    }

    Ok(())
}

/// Schema command implementation
pub fn schema_command() -> Result<()> {
    let schema = ConfigDocument::json_schema();
    println!("{}", crate::output::to_json(&schema)?);
    Ok(())
}

/// Init command implementation
pub fn init_command(format: ConfigFormat, force: bool) -> Result<()> {
    debug!("Initializing configuration file with format: {:?}", format);

    let filename = match format {
        ConfigFormat::Json => ".lintconfrc.json",
        ConfigFormat::Yaml => ".lintconfrc.yaml",
        ConfigFormat::Toml => ".lintconfrc.toml",
    };
    let config_path = Path::new(filename);

    if config_path.exists() && !force {
        return Err(ConfigError::io(
            config_path,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "file already exists, use --force to overwrite",
            ),
        ));
    }

    let starter = create_starter_config();
    let content = match format {
        ConfigFormat::Json => crate::output::to_json(&starter)?,
        ConfigFormat::Yaml => serde_yaml::to_string(&starter)
            .map_err(|e| ConfigError::parse(config_path, e))?,
        ConfigFormat::Toml => toml::to_string_pretty(&starter)
            .map_err(|e| ConfigError::parse(config_path, e))?,
    };

    std::fs::write(config_path, content).map_err(|e| ConfigError::io(config_path, e))?;

    println!("{} Created configuration file: {filename}", "✓".green());
    println!("   Edit the file to customize environments and rules.");
    Ok(())
}

/// Starter configuration for a Vue 3 project
///
/// Plain values precede nested tables so the TOML rendering is valid.
fn create_starter_config() -> serde_json::Value {
    serde_json::json!({
        "root": true,
        "extends": ["plugin:vue/vue3-essential", "eslint:recommended"],
        "env": {
            "node": true,
            "vue/setup-compiler-macros": true
        },
        "parserOptions": {
            "ecmaVersion": 2020
        },
        "rules": {
            "no-undef": "error",
            "vue/no-setup-props-destructure": ["off"],
            "no-console": {
                "then": "warn",
                "else": "off",
                "when": { "buildMode": "production" }
            },
            "no-debugger": {
                "then": "warn",
                "else": "off",
                "when": { "buildMode": "production" }
            }
        }
    })
}
