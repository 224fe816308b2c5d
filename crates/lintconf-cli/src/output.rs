//! Output formatting and reporting
//!
//! Renders effective configurations and build-mode matrices as colored
//! human-readable text, JSON or YAML.

use colored::*;
use lintconf_core::{ConfigError, EffectiveConfiguration, Result, Severity};
use serde::Serialize;

use crate::OutputFormat;

/// One rule in a build-mode comparison, with a severity per mode
#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub rule: String,
    pub severities: Vec<Option<Severity>>,
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ConfigError::parse("<stdout>", format!("Failed to serialize JSON: {e}")))
}

pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_yaml::to_string(value)
        .map_err(|e| ConfigError::parse("<stdout>", format!("Failed to serialize YAML: {e}")))
}

/// Output formatter for different formats
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, use_colors: bool) -> Self {
        Self { format, use_colors }
    }

    /// Print a resolved configuration
    pub fn print_effective(
        &self,
        effective: &EffectiveConfiguration,
        build_mode: Option<&str>,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                self.print_effective_human(effective, build_mode);
                Ok(())
            }
            OutputFormat::Json => {
                println!("{}", to_json(effective)?);
                Ok(())
            }
            OutputFormat::Yaml => {
                print!("{}", to_yaml(effective)?);
                Ok(())
            }
        }
    }

    fn print_effective_human(&self, effective: &EffectiveConfiguration, build_mode: Option<&str>) {
        println!(
            "{} (build mode: {})",
            "Effective configuration".bold(),
            build_mode.unwrap_or("unset")
        );

        let environments: Vec<&str> = effective.environments().iter().map(String::as_str).collect();
        println!(
            "\n{} {}",
            "Environments:".bold(),
            if environments.is_empty() {
                "none".to_string()
            } else {
                environments.join(", ")
            }
        );

        let options = effective.parser_options();
        if !options.is_empty() {
            println!("\n{}", "Parser options:".bold());
            if let Some(version) = options.ecma_version {
                println!("  ecmaVersion: {version}");
            }
            if let Some(source_type) = options.source_type {
                println!("  sourceType: {}", source_type.as_str());
            }
            for (feature, enabled) in &options.ecma_features {
                println!("  ecmaFeatures.{feature}: {enabled}");
            }
            for (key, value) in &options.extra {
                println!("  {key}: {value}");
            }
        }

        println!(
            "\n{} {} defined",
            "Globals:".bold(),
            effective.globals().len()
        );

        let enabled = effective.enabled_rules().count();
        println!(
            "\n{} {} enabled, {} off",
            "Rules:".bold(),
            enabled.to_string().green(),
            effective.rules().len() - enabled
        );
        for (name, entry) in effective.rules() {
            let options = if entry.options.is_empty() {
                String::new()
            } else {
                let rendered: Vec<String> = entry.options.iter().map(|o| o.to_string()).collect();
                format!(" {}", rendered.join(" ").dimmed())
            };
            println!("  {} {}{}", self.severity_label(Some(entry.severity)), name, options);
        }
    }

    /// Print rules whose severity differs between build modes
    pub fn print_matrix(&self, build_modes: &[String], rows: &[MatrixRow]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                self.print_matrix_human(build_modes, rows);
                Ok(())
            }
            OutputFormat::Json => {
                let result = serde_json::json!({
                    "buildModes": build_modes,
                    "differences": rows,
                });
                println!("{}", to_json(&result)?);
                Ok(())
            }
            OutputFormat::Yaml => {
                let result = serde_json::json!({
                    "buildModes": build_modes,
                    "differences": rows,
                });
                print!("{}", to_yaml(&result)?);
                Ok(())
            }
        }
    }

    fn print_matrix_human(&self, build_modes: &[String], rows: &[MatrixRow]) {
        if rows.is_empty() {
            println!(
                "{} No severity differences across {}",
                "✓".green(),
                build_modes.join(", ")
            );
            return;
        }

        let name_width = rows
            .iter()
            .map(|row| row.rule.len())
            .max()
            .unwrap_or(0)
            .max("rule".len());
        let column_widths: Vec<usize> = build_modes.iter().map(|m| m.len().max(5)).collect();

        let mut header = format!("{:<name_width$}", "rule");
        for (mode, width) in build_modes.iter().zip(column_widths.iter().copied()) {
            header.push_str(&format!("  {mode:<width$}"));
        }
        println!("{}", header.bold());

        for row in rows {
            let mut line = format!("{:<name_width$}", row.rule);
            for (severity, width) in row.severities.iter().zip(column_widths.iter().copied()) {
                let label = severity.map_or("-", |s| s.as_str());
                line.push_str(&format!("  {}", self.paint(severity, &format!("{label:<width$}"))));
            }
            println!("{line}");
        }

        println!("\n{} rules differ", rows.len());
    }

    /// Fixed-width severity label
    fn severity_label(&self, severity: Option<Severity>) -> String {
        let label = severity.map_or("-", |s| s.as_str());
        self.paint(&severity, &format!("{label:<5}"))
    }

    fn paint(&self, severity: &Option<Severity>, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        match severity {
            Some(Severity::Error) => text.red().to_string(),
            Some(Severity::Warn) => text.yellow().to_string(),
            Some(Severity::Off) => text.dimmed().to_string(),
            None => text.to_string(),
        }
    }
}
