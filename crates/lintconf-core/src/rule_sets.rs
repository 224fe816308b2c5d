//! Named rule-set catalog
//!
//! Rule-sets are ordinary configuration documents registered under an opaque
//! identifier. The resolver never loads anything itself: every identifier an
//! `extends` chain can reach must be registered here beforehand, either as a
//! built-in preset or by [`ConfigLoader`](crate::config::ConfigLoader) for
//! file-relative references.
//!
//! # Built-in presets
//!
//! - `eslint:recommended` - core correctness rules, all at `error`
//! - `plugin:vue/base` - Vue SFC parsing setup and the directive rules
//! - `plugin:vue/vue3-essential` - extends `plugin:vue/base`, adds the
//!   essential Vue 3 rules

use crate::config::ConfigDocument;
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const ESLINT_RECOMMENDED: &[&str] = &[
    "constructor-super",
    "for-direction",
    "getter-return",
    "no-async-promise-executor",
    "no-case-declarations",
    "no-class-assign",
    "no-compare-neg-zero",
    "no-cond-assign",
    "no-const-assign",
    "no-constant-condition",
    "no-control-regex",
    "no-debugger",
    "no-delete-var",
    "no-dupe-args",
    "no-dupe-class-members",
    "no-dupe-else-if",
    "no-dupe-keys",
    "no-duplicate-case",
    "no-empty",
    "no-empty-character-class",
    "no-empty-pattern",
    "no-ex-assign",
    "no-extra-boolean-cast",
    "no-fallthrough",
    "no-func-assign",
    "no-global-assign",
    "no-import-assign",
    "no-inner-declarations",
    "no-invalid-regexp",
    "no-irregular-whitespace",
    "no-loss-of-precision",
    "no-misleading-character-class",
    "no-new-symbol",
    "no-nonoctal-decimal-escape",
    "no-obj-calls",
    "no-octal",
    "no-prototype-builtins",
    "no-redeclare",
    "no-regex-spaces",
    "no-self-assign",
    "no-setter-return",
    "no-shadow-restricted-names",
    "no-sparse-arrays",
    "no-this-before-super",
    "no-undef",
    "no-unexpected-multiline",
    "no-unreachable",
    "no-unsafe-finally",
    "no-unsafe-negation",
    "no-unsafe-optional-chaining",
    "no-unused-labels",
    "no-unused-vars",
    "no-useless-backreference",
    "no-useless-catch",
    "no-useless-escape",
    "no-with",
    "require-yield",
    "use-isnan",
    "valid-typeof",
];

const VUE_BASE_RULES: &[&str] = &["vue/comment-directive", "vue/jsx-uses-vars"];

const VUE3_ESSENTIAL_RULES: &[&str] = &[
    "vue/multi-word-component-names",
    "vue/no-arrow-functions-in-watch",
    "vue/no-async-in-computed-properties",
    "vue/no-child-content",
    "vue/no-computed-properties-in-data",
    "vue/no-deprecated-data-object-declaration",
    "vue/no-deprecated-destroyed-lifecycle",
    "vue/no-deprecated-filter",
    "vue/no-deprecated-v-on-native-modifier",
    "vue/no-dupe-keys",
    "vue/no-dupe-v-else-if",
    "vue/no-duplicate-attributes",
    "vue/no-export-in-script-setup",
    "vue/no-mutating-props",
    "vue/no-parsing-error",
    "vue/no-ref-as-operand",
    "vue/no-reserved-component-names",
    "vue/no-reserved-keys",
    "vue/no-setup-props-destructure",
    "vue/no-shared-component-data",
    "vue/no-side-effects-in-computed-properties",
    "vue/no-template-key",
    "vue/no-textarea-mustache",
    "vue/no-unused-components",
    "vue/no-unused-vars",
    "vue/no-use-v-if-with-v-for",
    "vue/no-v-for-template-key-on-child",
    "vue/require-render-return",
    "vue/require-v-for-key",
    "vue/require-valid-default-prop",
    "vue/return-in-computed-property",
    "vue/return-in-emits-validator",
    "vue/use-v-on-exact",
    "vue/valid-attribute-name",
    "vue/valid-define-emits",
    "vue/valid-define-props",
    "vue/valid-next-tick",
    "vue/valid-template-root",
    "vue/valid-v-bind",
    "vue/valid-v-else",
    "vue/valid-v-else-if",
    "vue/valid-v-for",
    "vue/valid-v-if",
    "vue/valid-v-model",
    "vue/valid-v-on",
    "vue/valid-v-slot",
];

fn all_at_error(rules: &[&str]) -> IndexMap<String, Value> {
    rules
        .iter()
        .map(|rule| (rule.to_string(), json!("error")))
        .collect()
}

/// Catalog of rule-sets that `extends` entries may reference
#[derive(Debug, Clone, Default)]
pub struct RuleSetCatalog {
    rule_sets: HashMap<String, Arc<ConfigDocument>>,
}

impl RuleSetCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with the built-in presets
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();

        catalog.register(
            "eslint:recommended",
            ConfigDocument {
                rules: all_at_error(ESLINT_RECOMMENDED),
                ..Default::default()
            },
        );

        catalog.register(
            "plugin:vue/base",
            ConfigDocument {
                env: IndexMap::from([("browser".to_string(), true), ("es6".to_string(), true)]),
                parser_options: IndexMap::from([
                    ("ecmaVersion".to_string(), json!(2020)),
                    ("sourceType".to_string(), json!("module")),
                ]),
                rules: all_at_error(VUE_BASE_RULES),
                ..Default::default()
            },
        );

        catalog.register(
            "plugin:vue/vue3-essential",
            ConfigDocument {
                extends: vec!["plugin:vue/base".to_string()],
                rules: all_at_error(VUE3_ESSENTIAL_RULES),
                ..Default::default()
            },
        );

        catalog
    }

    /// Register a rule-set
    ///
    /// If a rule-set with the same identifier already exists, it will be replaced.
    pub fn register(&mut self, name: impl Into<String>, document: ConfigDocument) {
        let name = name.into();
        debug!(
            "Registering rule-set '{}' ({} rules, {} extends)",
            name,
            document.rules.len(),
            document.extends.len()
        );
        self.rule_sets.insert(name, Arc::new(document));
    }

    pub fn get(&self, name: &str) -> Option<Arc<ConfigDocument>> {
        self.rule_sets.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rule_sets.contains_key(name)
    }

    /// Registered identifiers in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rule_sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }
}
