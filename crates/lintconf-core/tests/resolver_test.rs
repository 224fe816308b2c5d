//! Integration tests for configuration resolution
//!
//! Tests the resolution contract end to end:
//! - Extends order and local override precedence
//! - Conditional rules against the build mode
//! - Environment additivity
//! - Cycle and reference errors
//! - Determinism

use lintconf_core::{
    ConfigDocument, ConfigError, EcmaVersion, EnvironmentRegistry, EnvironmentSnapshot, ErrorKind,
    Resolver, RuleSetCatalog, Severity, SourceType,
};
use serde_json::json;

/// The Vue 3 project configuration these tests are modelled on
fn vue_project_document() -> ConfigDocument {
    ConfigDocument::from_value(json!({
        "root": true,
        "env": {
            "node": true,
            "vue/setup-compiler-macros": true
        },
        "extends": ["plugin:vue/vue3-essential", "eslint:recommended"],
        "parserOptions": {
            "ecmaVersion": 2020
        },
        "rules": {
            "no-console": {"when": {"buildMode": "production"}, "then": "warn", "else": "off"},
            "no-debugger": {"when": {"buildMode": "production"}, "then": "warn", "else": "off"},
            "vue/no-setup-props-destructure": ["off"],
            "no-undef": "error"
        }
    }))
    .unwrap()
}

fn catalog_with(rule_sets: &[(&str, serde_json::Value)]) -> RuleSetCatalog {
    let mut catalog = RuleSetCatalog::new();
    for (name, value) in rule_sets {
        catalog.register(*name, ConfigDocument::from_value(value.clone()).unwrap());
    }
    catalog
}

#[test]
fn test_vue_project_development() {
    let resolver = Resolver::with_builtins();
    let effective = resolver
        .resolve(&vue_project_document(), &EnvironmentSnapshot::new())
        .unwrap();

    assert_eq!(effective.severity("no-console"), Some(Severity::Off));
    // eslint:recommended enables no-debugger, the local declaration wins
    assert_eq!(effective.severity("no-debugger"), Some(Severity::Off));
    assert_eq!(
        effective.severity("vue/no-setup-props-destructure"),
        Some(Severity::Off)
    );
    assert_eq!(effective.severity("no-undef"), Some(Severity::Error));
    assert_eq!(effective.severity("vue/require-v-for-key"), Some(Severity::Error));
    assert_eq!(effective.severity("no-empty"), Some(Severity::Error));

    assert_eq!(
        effective.parser_options().ecma_version,
        Some(EcmaVersion::Version(2020))
    );
    // inherited from plugin:vue/base
    assert_eq!(effective.parser_options().source_type, Some(SourceType::Module));

    assert!(effective.has_global("process"));
    assert!(effective.has_global("defineProps"));
    assert!(effective.has_global("window"));
}

#[test]
fn test_vue_project_production() {
    let resolver = Resolver::with_builtins();
    let production = EnvironmentSnapshot::new().with_build_mode("production");
    let effective = resolver.resolve(&vue_project_document(), &production).unwrap();

    assert_eq!(effective.severity("no-console"), Some(Severity::Warn));
    assert_eq!(effective.severity("no-debugger"), Some(Severity::Warn));
    assert_eq!(effective.severity("no-undef"), Some(Severity::Error));
}

#[test]
fn test_conditional_rule_with_unset_build_mode() {
    let document = ConfigDocument::from_value(json!({
        "rules": {
            "no-console": {"when": {"buildMode": "production"}, "then": "warn", "else": "off"}
        }
    }))
    .unwrap();
    let resolver = Resolver::default();

    let unset = resolver.resolve(&document, &EnvironmentSnapshot::new()).unwrap();
    assert_eq!(unset.severity("no-console"), Some(Severity::Off));

    let production = resolver
        .resolve(
            &document,
            &EnvironmentSnapshot::new().with_build_mode("production"),
        )
        .unwrap();
    assert_eq!(production.severity("no-console"), Some(Severity::Warn));
}

#[test]
fn test_extends_order_later_wins() {
    let catalog = catalog_with(&[
        ("a", json!({"rules": {"semi": "error", "quotes": "warn"}})),
        ("b", json!({"rules": {"semi": "warn"}})),
    ]);
    let resolver = Resolver::new(catalog, EnvironmentRegistry::new());

    let document = ConfigDocument::from_value(json!({"extends": ["a", "b"]})).unwrap();
    let effective = resolver.resolve(&document, &EnvironmentSnapshot::new()).unwrap();
    assert_eq!(effective.severity("semi"), Some(Severity::Warn));
    assert_eq!(effective.severity("quotes"), Some(Severity::Warn));

    let reversed = ConfigDocument::from_value(json!({"extends": ["b", "a"]})).unwrap();
    let effective = resolver.resolve(&reversed, &EnvironmentSnapshot::new()).unwrap();
    assert_eq!(effective.severity("semi"), Some(Severity::Error));
}

#[test]
fn test_local_declaration_overrides_inherited() {
    let catalog = catalog_with(&[(
        "base",
        json!({"rules": {"eqeqeq": ["error", "always"], "curly": "error"}}),
    )]);
    let resolver = Resolver::new(catalog, EnvironmentRegistry::new());

    let document = ConfigDocument::from_value(json!({
        "extends": ["base"],
        "rules": {
            "eqeqeq": "warn",
            "curly": {"when": {"buildMode": "ci"}, "then": "error", "else": 0}
        }
    }))
    .unwrap();
    let effective = resolver.resolve(&document, &EnvironmentSnapshot::new()).unwrap();

    let eqeqeq = effective.rule("eqeqeq").unwrap();
    assert_eq!(eqeqeq.severity, Severity::Warn);
    // severity-only override keeps the inherited options
    assert_eq!(eqeqeq.options, vec![json!("always")]);
    assert_eq!(effective.severity("curly"), Some(Severity::Off));
}

#[test]
fn test_local_parser_options_override_inherited() {
    let catalog = catalog_with(&[
        ("old", json!({"parserOptions": {"ecmaVersion": 5, "sourceType": "script"}})),
        ("new", json!({"parserOptions": {"ecmaVersion": 2022}})),
    ]);
    let resolver = Resolver::new(catalog, EnvironmentRegistry::new());

    let document = ConfigDocument::from_value(json!({
        "extends": ["new", "old"],
        "parserOptions": {"sourceType": "module"}
    }))
    .unwrap();
    let effective = resolver.resolve(&document, &EnvironmentSnapshot::new()).unwrap();

    assert_eq!(
        effective.parser_options().ecma_version,
        Some(EcmaVersion::Version(5))
    );
    assert_eq!(effective.parser_options().source_type, Some(SourceType::Module));
}

#[test]
fn test_environment_additivity() {
    let resolver = Resolver::with_builtins();
    let document = ConfigDocument::default();

    let node = resolver
        .resolve(&document, &EnvironmentSnapshot::new().with_environment("node"))
        .unwrap();
    let node_and_macros = resolver
        .resolve(
            &document,
            &EnvironmentSnapshot::new().with_environments(["node", "vue/setup-compiler-macros"]),
        )
        .unwrap();

    assert!(!node.globals().is_empty());
    for global in node.globals().keys() {
        assert!(node_and_macros.has_global(global), "lost global {global}");
    }
    assert!(node_and_macros.has_global("defineEmits"));
    assert!(!node.has_global("defineEmits"));
}

#[test]
fn test_overlapping_environments_are_idempotent() {
    let resolver = Resolver::with_builtins();
    let document = ConfigDocument::from_value(json!({"env": {"node": true, "commonjs": true}}))
        .unwrap();

    let effective = resolver.resolve(&document, &EnvironmentSnapshot::new()).unwrap();
    assert!(effective.has_global("require"));
    assert_eq!(effective.environments().len(), 2);
}

#[test]
fn test_cycle_detection() {
    let catalog = catalog_with(&[
        ("A", json!({"extends": ["B"]})),
        ("B", json!({"extends": ["A"]})),
    ]);
    let resolver = Resolver::new(catalog, EnvironmentRegistry::new());

    let document = ConfigDocument::from_value(json!({"extends": ["A"]})).unwrap();
    let err = resolver
        .resolve(&document, &EnvironmentSnapshot::new())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cycle);
    assert_eq!(err.to_string(), "Cyclic extends chain: A → B → A");
}

#[test]
fn test_unresolvable_reference() {
    let resolver = Resolver::with_builtins();
    let document =
        ConfigDocument::from_value(json!({"extends": ["plugin:react/recommended"]})).unwrap();

    let err = resolver
        .resolve(&document, &EnvironmentSnapshot::new())
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnresolvableReference { ref reference, .. }
            if reference == "plugin:react/recommended"
    ));
}

#[test]
fn test_invalid_rule_level_in_inherited_rule_set() {
    let catalog = catalog_with(&[("broken", json!({"rules": {"semi": "loud"}}))]);
    let resolver = Resolver::new(catalog, EnvironmentRegistry::new());

    let document = ConfigDocument::from_value(json!({"extends": ["broken"]})).unwrap();
    let err = resolver
        .resolve(&document, &EnvironmentSnapshot::new())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RuleLevel);
    assert!(err.to_string().contains("semi"));
}

#[test]
fn test_malformed_parser_option() {
    let resolver = Resolver::with_builtins();
    let document =
        ConfigDocument::from_value(json!({"parserOptions": {"ecmaVersion": "next"}})).unwrap();

    let err = resolver
        .resolve(&document, &EnvironmentSnapshot::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Option);
    assert!(err.to_string().contains("ecmaVersion"));
}

#[test]
fn test_unknown_environment() {
    let resolver = Resolver::with_builtins();
    let document = ConfigDocument::from_value(json!({"env": {"deno": true}})).unwrap();

    let err = resolver
        .resolve(&document, &EnvironmentSnapshot::new())
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownEnvironment { ref name } if name == "deno"));
}

#[test]
fn test_custom_environment() {
    let mut environments = EnvironmentRegistry::with_builtins();
    environments.register("jest", ["describe", "expect", "it"]);
    let resolver = Resolver::new(RuleSetCatalog::with_builtins(), environments);

    let document = ConfigDocument::from_value(json!({"env": {"jest": true}})).unwrap();
    let effective = resolver.resolve(&document, &EnvironmentSnapshot::new()).unwrap();
    assert!(effective.has_global("describe"));
}

#[test]
fn test_resolution_is_deterministic() {
    let resolver = Resolver::with_builtins();
    let document = vue_project_document();
    let snapshot = EnvironmentSnapshot::new()
        .with_build_mode("production")
        .with_environment("browser");

    let first = resolver.resolve(&document, &snapshot).unwrap();
    let second = resolver.resolve(&document, &snapshot).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_document_and_snapshot_are_not_mutated() {
    let resolver = Resolver::with_builtins();
    let document = vue_project_document();
    let snapshot = EnvironmentSnapshot::new().with_build_mode("production");

    let document_before = document.clone();
    let snapshot_before = snapshot.clone();
    resolver.resolve(&document, &snapshot).unwrap();

    assert_eq!(document, document_before);
    assert_eq!(snapshot, snapshot_before);
}

#[test]
fn test_concurrent_resolution() {
    let resolver = Resolver::with_builtins();
    let document = vue_project_document();
    let snapshots: Vec<_> = (0..16)
        .map(|i| {
            if i % 2 == 0 {
                EnvironmentSnapshot::new().with_build_mode("production")
            } else {
                EnvironmentSnapshot::new()
            }
        })
        .collect();

    let results = resolver.resolve_all(&document, &snapshots);
    assert_eq!(results.len(), 16);
    for (i, result) in results.into_iter().enumerate() {
        let expected = if i % 2 == 0 {
            Severity::Warn
        } else {
            Severity::Off
        };
        assert_eq!(result.unwrap().severity("no-console"), Some(expected));
    }
}

#[test]
fn test_resolve_named_preset() {
    let resolver = Resolver::with_builtins();
    let effective = resolver
        .resolve_named("plugin:vue/vue3-essential", &EnvironmentSnapshot::new())
        .unwrap();

    assert_eq!(effective.severity("vue/comment-directive"), Some(Severity::Error));
    assert!(effective.environments().contains("browser"));
}
