//! Configuration resolution
//!
//! Turns a [`ConfigDocument`] plus an [`EnvironmentSnapshot`] into an
//! [`EffectiveConfiguration`].
//!
//! # Algorithm
//!
//! 1. Resolve the extends chain left to right. Each rule-set is resolved
//!    recursively into a layer; layers merge in chain order, later entries
//!    overwriting earlier ones. A rule-set already on the resolution stack
//!    is a cycle.
//! 2. Evaluate the document's own declarations (environment flags, parser
//!    options, globals, rules). Conditional rules evaluate against the
//!    snapshot.
//! 3. Merge the local layer over the inherited one.
//! 4. Compute the active environments (enabled flags plus the snapshot's
//!    environments) and collect their globals; declared globals apply last.
//!
//! # Usage
//!
//! ```rust
//! use lintconf_core::{ConfigDocument, EnvironmentSnapshot, Resolver, Severity};
//! use serde_json::json;
//!
//! let document = ConfigDocument::from_value(json!({
//!     "extends": ["eslint:recommended"],
//!     "rules": {
//!         "no-console": {"when": {"buildMode": "production"}, "then": "warn"}
//!     }
//! }))?;
//!
//! let resolver = Resolver::with_builtins();
//! let production = EnvironmentSnapshot::new().with_build_mode("production");
//! let effective = resolver.resolve(&document, &production)?;
//!
//! assert_eq!(effective.severity("no-console"), Some(Severity::Warn));
//! assert_eq!(effective.severity("no-undef"), Some(Severity::Error));
//! # Ok::<(), lintconf_core::ConfigError>(())
//! ```

use crate::config::ConfigDocument;
use crate::config::merge::ConfigLayer;
use crate::effective::EffectiveConfiguration;
use crate::environment::{EnvironmentRegistry, EnvironmentSnapshot, GlobalAccess};
use crate::error::ConfigError;
use crate::parser_options::ParserOptions;
use crate::result::Result;
use crate::rule_sets::RuleSetCatalog;
use crate::rules::RuleDeclaration;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, trace};

/// Name used for the document passed to [`Resolver::resolve`] in errors
pub const ROOT_DOCUMENT: &str = "<root>";

/// Deepest extends nesting accepted before resolution fails
pub const MAX_EXTENDS_DEPTH: usize = 64;

/// Per-call resolution state
struct ResolutionContext<'a> {
    snapshot: &'a EnvironmentSnapshot,
    /// Rule-sets currently being resolved, outermost first
    stack: Vec<String>,
    /// Fully resolved rule-sets, so shared ancestors are evaluated once
    resolved: HashMap<String, Arc<ConfigLayer>>,
}

/// Resolves configuration documents against a fixed catalog and registry
///
/// The resolver holds only read-only data, so one instance can serve
/// concurrent resolutions.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    catalog: RuleSetCatalog,
    environments: EnvironmentRegistry,
}

impl Resolver {
    pub fn new(catalog: RuleSetCatalog, environments: EnvironmentRegistry) -> Self {
        Self {
            catalog,
            environments,
        }
    }

    /// Resolver with the built-in presets and environments
    pub fn with_builtins() -> Self {
        Self::new(
            RuleSetCatalog::with_builtins(),
            EnvironmentRegistry::with_builtins(),
        )
    }

    pub fn catalog(&self) -> &RuleSetCatalog {
        &self.catalog
    }

    pub fn environments(&self) -> &EnvironmentRegistry {
        &self.environments
    }

    /// Resolve a document into its effective configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - an extends entry is not in the catalog
    /// - the extends graph has a cycle
    /// - a rule declaration has an invalid level
    /// - a parser option or global has an invalid value
    /// - an environment is not registered
    pub fn resolve(
        &self,
        document: &ConfigDocument,
        snapshot: &EnvironmentSnapshot,
    ) -> Result<EffectiveConfiguration> {
        let mut ctx = ResolutionContext {
            snapshot,
            stack: Vec::new(),
            resolved: HashMap::new(),
        };

        let layer = self.resolve_layer(ROOT_DOCUMENT, document, &mut ctx)?;
        self.finish(layer, snapshot)
    }

    /// Resolve a registered rule-set as if it were the root document
    pub fn resolve_named(
        &self,
        name: &str,
        snapshot: &EnvironmentSnapshot,
    ) -> Result<EffectiveConfiguration> {
        let document = self
            .catalog
            .get(name)
            .ok_or_else(|| ConfigError::unresolvable_reference(name, ROOT_DOCUMENT))?;

        let mut ctx = ResolutionContext {
            snapshot,
            stack: Vec::new(),
            resolved: HashMap::new(),
        };

        let layer = self.resolve_layer(name, &document, &mut ctx)?;
        self.finish(layer, snapshot)
    }

    /// Resolve one document against several snapshots in parallel
    ///
    /// Results are returned in snapshot order.
    pub fn resolve_all(
        &self,
        document: &ConfigDocument,
        snapshots: &[EnvironmentSnapshot],
    ) -> Vec<Result<EffectiveConfiguration>> {
        snapshots
            .par_iter()
            .map(|snapshot| self.resolve(document, snapshot))
            .collect()
    }

    /// Resolve `document` and everything it extends into a single layer
    fn resolve_layer(
        &self,
        name: &str,
        document: &ConfigDocument,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<ConfigLayer> {
        if ctx.stack.len() >= MAX_EXTENDS_DEPTH {
            return Err(ConfigError::extends_too_deep(ctx.stack.len() + 1, MAX_EXTENDS_DEPTH));
        }
        ctx.stack.push(name.to_string());
        debug!(
            "Resolving '{}' ({} extends, {} rules)",
            name,
            document.extends.len(),
            document.rules.len()
        );

        let mut layer = ConfigLayer::default();

        for reference in &document.extends {
            if let Some(start) = ctx.stack.iter().position(|entry| entry == reference) {
                let mut chain = ctx.stack[start..].to_vec();
                chain.push(reference.clone());
                return Err(ConfigError::cyclic_extends(chain));
            }

            let inherited = match ctx.resolved.get(reference) {
                Some(resolved) => {
                    trace!("Reusing resolved rule-set '{}'", reference);
                    Arc::clone(resolved)
                }
                None => {
                    let parent = self
                        .catalog
                        .get(reference)
                        .ok_or_else(|| ConfigError::unresolvable_reference(reference, name))?;
                    let resolved = Arc::new(self.resolve_layer(reference, &parent, ctx)?);
                    ctx.resolved.insert(reference.clone(), Arc::clone(&resolved));
                    resolved
                }
            };

            layer.merge_with(&inherited);
        }

        let local = self.evaluate_document(document, ctx.snapshot)?;
        layer.merge_with(&local);

        ctx.stack.pop();
        Ok(layer)
    }

    /// Evaluate a document's own declarations, ignoring its extends chain
    fn evaluate_document(
        &self,
        document: &ConfigDocument,
        snapshot: &EnvironmentSnapshot,
    ) -> Result<ConfigLayer> {
        let mut env = BTreeMap::new();
        for (name, enabled) in &document.env {
            if !self.environments.contains(name) {
                return Err(ConfigError::unknown_environment(name));
            }
            env.insert(name.clone(), *enabled);
        }

        let parser_options = ParserOptions::from_raw(&document.parser_options)?;

        let globals = document
            .globals
            .iter()
            .map(|(name, value)| Ok((name.clone(), GlobalAccess::parse(name, value)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        let mut rules = BTreeMap::new();
        for (rule, value) in &document.rules {
            let declaration = RuleDeclaration::parse(rule, value)?;
            let entry = declaration.evaluate(snapshot);
            if declaration.is_conditional() {
                trace!(
                    "Conditional rule '{}' evaluated to {} (build mode: {:?})",
                    rule,
                    entry.severity,
                    snapshot.build_mode()
                );
            }
            rules.insert(rule.clone(), entry);
        }

        Ok(ConfigLayer {
            env,
            parser_options,
            globals,
            rules,
        })
    }

    /// Compute environments and globals, producing the final configuration
    fn finish(
        &self,
        layer: ConfigLayer,
        snapshot: &EnvironmentSnapshot,
    ) -> Result<EffectiveConfiguration> {
        let environments: BTreeSet<String> = layer
            .env
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.clone())
            .chain(snapshot.environments().iter().cloned())
            .collect();

        let mut globals = BTreeMap::new();
        for name in &environments {
            let contributed = self
                .environments
                .globals_for(name)
                .ok_or_else(|| ConfigError::unknown_environment(name))?;
            for global in contributed {
                globals.insert(global.clone(), GlobalAccess::Readonly);
            }
        }

        for (name, access) in layer.globals {
            match access {
                GlobalAccess::Off => {
                    globals.remove(&name);
                }
                access => {
                    globals.insert(name, access);
                }
            }
        }

        debug!(
            "Resolved {} rules, {} environments, {} globals",
            layer.rules.len(),
            environments.len(),
            globals.len()
        );

        Ok(EffectiveConfiguration::new(
            environments,
            layer.parser_options,
            globals,
            layer.rules,
        ))
    }
}
