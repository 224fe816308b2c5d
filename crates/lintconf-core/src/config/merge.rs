//! Configuration merging logic
//!
//! Every document in an extends graph is evaluated into a [`ConfigLayer`].
//! Layers are then folded lowest precedence first: inherited rule-sets in
//! chain order, the document's own declarations last.

use crate::environment::GlobalAccess;
use crate::parser_options::ParserOptions;
use crate::rules::RuleEntry;
use std::collections::BTreeMap;

/// Evaluated contribution of one document, including everything it extends
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ConfigLayer {
    pub env: BTreeMap<String, bool>,
    pub parser_options: ParserOptions,
    pub globals: BTreeMap<String, GlobalAccess>,
    pub rules: BTreeMap<String, RuleEntry>,
}

impl ConfigLayer {
    /// Merge a higher-precedence layer into this one (overlay wins)
    ///
    /// - Environment flags, globals and parser option keys: last value wins
    /// - `ecmaFeatures`: merged per feature
    /// - Rules: the overlay's severity wins; a severity-only overlay keeps
    ///   the options already present
    pub fn merge_with(&mut self, overlay: &ConfigLayer) {
        self.env
            .extend(overlay.env.iter().map(|(name, enabled)| (name.clone(), *enabled)));
        self.globals
            .extend(overlay.globals.iter().map(|(name, access)| (name.clone(), *access)));
        self.parser_options.merge_with(&overlay.parser_options);

        for (rule, entry) in &overlay.rules {
            match self.rules.get_mut(rule) {
                Some(existing) => existing.override_with(entry.clone()),
                None => {
                    self.rules.insert(rule.clone(), entry.clone());
                }
            }
        }
    }
}

impl ParserOptions {
    /// Merge parser options (overlay takes precedence)
    pub fn merge_with(&mut self, overlay: &ParserOptions) {
        if overlay.ecma_version.is_some() {
            self.ecma_version = overlay.ecma_version;
        }
        if overlay.source_type.is_some() {
            self.source_type = overlay.source_type;
        }
        self.ecma_features.extend(
            overlay
                .ecma_features
                .iter()
                .map(|(feature, enabled)| (feature.clone(), *enabled)),
        );
        self.extra.extend(
            overlay
                .extra
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }
}
