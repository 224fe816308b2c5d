//! Effective configuration: the immutable result of a resolution

use crate::environment::GlobalAccess;
use crate::parser_options::ParserOptions;
use crate::rules::{RuleEntry, Severity};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Fully merged, environment-evaluated configuration
///
/// Built by [`Resolver::resolve`](crate::Resolver::resolve) and never
/// mutated afterwards. All maps are ordered so the serialized form is
/// stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfiguration {
    environments: BTreeSet<String>,
    parser_options: ParserOptions,
    globals: BTreeMap<String, GlobalAccess>,
    rules: BTreeMap<String, RuleEntry>,
}

impl EffectiveConfiguration {
    pub(crate) fn new(
        environments: BTreeSet<String>,
        parser_options: ParserOptions,
        globals: BTreeMap<String, GlobalAccess>,
        rules: BTreeMap<String, RuleEntry>,
    ) -> Self {
        Self {
            environments,
            parser_options,
            globals,
            rules,
        }
    }

    /// Active environment names
    pub fn environments(&self) -> &BTreeSet<String> {
        &self.environments
    }

    pub fn parser_options(&self) -> &ParserOptions {
        &self.parser_options
    }

    /// Recognized global identifiers
    pub fn globals(&self) -> &BTreeMap<String, GlobalAccess> {
        &self.globals
    }

    pub fn rules(&self) -> &BTreeMap<String, RuleEntry> {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&RuleEntry> {
        self.rules.get(name)
    }

    pub fn severity(&self, name: &str) -> Option<Severity> {
        self.rules.get(name).map(|entry| entry.severity)
    }

    pub fn has_global(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }

    /// Rules whose severity is not `off`
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&str, &RuleEntry)> {
        self.rules
            .iter()
            .filter(|(_, entry)| entry.severity.is_enabled())
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Rules whose severity differs from `other`, with both severities.
    ///
    /// A rule missing on one side reports `None` for that side.
    pub fn severity_differences<'a>(
        &'a self,
        other: &'a EffectiveConfiguration,
    ) -> Vec<(&'a str, Option<Severity>, Option<Severity>)> {
        let names: BTreeSet<&str> = self
            .rules
            .keys()
            .chain(other.rules.keys())
            .map(String::as_str)
            .collect();

        names
            .into_iter()
            .filter_map(|name| {
                let left = self.severity(name);
                let right = other.severity(name);
                (left != right).then_some((name, left, right))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rules: &[(&str, Severity)]) -> EffectiveConfiguration {
        EffectiveConfiguration::new(
            BTreeSet::new(),
            ParserOptions::default(),
            BTreeMap::new(),
            rules
                .iter()
                .map(|(name, severity)| (name.to_string(), RuleEntry::new(*severity)))
                .collect(),
        )
    }

    #[test]
    fn test_enabled_rules_skip_off() {
        let cfg = config(&[("a", Severity::Off), ("b", Severity::Warn), ("c", Severity::Error)]);
        let enabled: Vec<&str> = cfg.enabled_rules().map(|(name, _)| name).collect();
        assert_eq!(enabled, vec!["b", "c"]);
    }

    #[test]
    fn test_severity_differences() {
        let dev = config(&[("no-console", Severity::Off), ("no-undef", Severity::Error)]);
        let prod = config(&[
            ("no-console", Severity::Warn),
            ("no-undef", Severity::Error),
            ("extra", Severity::Warn),
        ]);

        let diff = dev.severity_differences(&prod);
        assert_eq!(
            diff,
            vec![
                ("extra", None, Some(Severity::Warn)),
                ("no-console", Some(Severity::Off), Some(Severity::Warn)),
            ]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let cfg = config(&[("no-undef", Severity::Error)]);
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "environments": [],
                "parserOptions": {},
                "globals": {},
                "rules": {"no-undef": {"severity": "error"}}
            })
        );
    }
}
