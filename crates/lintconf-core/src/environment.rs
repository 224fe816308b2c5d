//! Environment snapshot and named runtime environments
//!
//! The snapshot is the only external input of a resolution besides the
//! document itself. It carries the build mode consumed by conditional rule
//! declarations and any environments the caller wants active on top of the
//! ones the document enables.
//!
//! Named environments contribute predefined global identifiers. The layer is
//! purely additive: enabling more environments never removes an identifier.

use crate::error::ConfigError;
use crate::result::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Variable read by [`EnvironmentSnapshot::from_process`] by default
pub const DEFAULT_BUILD_MODE_VAR: &str = "NODE_ENV";

/// Immutable view of the caller's environment for one resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    build_mode: Option<String>,
    environments: BTreeSet<String>,
}

impl EnvironmentSnapshot {
    /// Snapshot with no build mode and no extra environments
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the build mode from a process environment variable.
    ///
    /// The variable is read once; an unset or empty value leaves the build
    /// mode undefined.
    pub fn from_process(var: &str) -> Self {
        let build_mode = std::env::var(var).ok().filter(|v| !v.is_empty());
        debug!("Captured build mode from ${}: {:?}", var, build_mode);
        Self {
            build_mode,
            environments: BTreeSet::new(),
        }
    }

    pub fn with_build_mode(mut self, mode: impl Into<String>) -> Self {
        let mode = mode.into();
        self.build_mode = (!mode.is_empty()).then_some(mode);
        self
    }

    pub fn with_environment(mut self, name: impl Into<String>) -> Self {
        self.environments.insert(name.into());
        self
    }

    pub fn with_environments<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build_mode(&self) -> Option<&str> {
        self.build_mode.as_deref()
    }

    pub fn environments(&self) -> &BTreeSet<String> {
        &self.environments
    }
}

/// Access granted to a global identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalAccess {
    Readonly,
    Writable,
    /// Removes the identifier
    Off,
}

impl GlobalAccess {
    /// Parse a `globals` value, accepting the legacy spellings and booleans
    pub fn parse(name: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Bool(true) => Ok(GlobalAccess::Writable),
            Value::Bool(false) => Ok(GlobalAccess::Readonly),
            Value::String(s) => match s.as_str() {
                "readonly" | "readable" => Ok(GlobalAccess::Readonly),
                "writable" | "writeable" => Ok(GlobalAccess::Writable),
                "off" => Ok(GlobalAccess::Off),
                _ => Err(ConfigError::invalid_global(name, value)),
            },
            _ => Err(ConfigError::invalid_global(name, value)),
        }
    }
}

const BUILTIN_GLOBALS: &[&str] = &[
    "Array",
    "Boolean",
    "Date",
    "Error",
    "EvalError",
    "Function",
    "Infinity",
    "JSON",
    "Math",
    "NaN",
    "Number",
    "Object",
    "RangeError",
    "ReferenceError",
    "RegExp",
    "String",
    "SyntaxError",
    "TypeError",
    "URIError",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "escape",
    "eval",
    "isFinite",
    "isNaN",
    "parseFloat",
    "parseInt",
    "undefined",
    "unescape",
];

const ES6_GLOBALS: &[&str] = &[
    "ArrayBuffer",
    "DataView",
    "Float32Array",
    "Float64Array",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Map",
    "Promise",
    "Proxy",
    "Reflect",
    "Set",
    "Symbol",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "WeakMap",
    "WeakSet",
];

const ES2020_GLOBALS: &[&str] = &[
    "Atomics",
    "BigInt",
    "BigInt64Array",
    "BigUint64Array",
    "SharedArrayBuffer",
    "globalThis",
];

const BROWSER_GLOBALS: &[&str] = &[
    "CustomEvent",
    "Element",
    "Event",
    "HTMLElement",
    "Node",
    "URL",
    "URLSearchParams",
    "XMLHttpRequest",
    "alert",
    "cancelAnimationFrame",
    "clearInterval",
    "clearTimeout",
    "confirm",
    "console",
    "document",
    "fetch",
    "history",
    "localStorage",
    "location",
    "navigator",
    "prompt",
    "requestAnimationFrame",
    "self",
    "sessionStorage",
    "setInterval",
    "setTimeout",
    "window",
];

const NODE_GLOBALS: &[&str] = &[
    "Buffer",
    "TextDecoder",
    "TextEncoder",
    "URL",
    "URLSearchParams",
    "__dirname",
    "__filename",
    "clearImmediate",
    "clearInterval",
    "clearTimeout",
    "console",
    "exports",
    "global",
    "module",
    "process",
    "queueMicrotask",
    "require",
    "setImmediate",
    "setInterval",
    "setTimeout",
];

const COMMONJS_GLOBALS: &[&str] = &["exports", "global", "module", "require"];

const VUE_SETUP_MACROS_GLOBALS: &[&str] =
    &["defineEmits", "defineExpose", "defineProps", "withDefaults"];

/// Registry of named environments and the globals each contributes
#[derive(Debug, Clone, Default)]
pub struct EnvironmentRegistry {
    environments: BTreeMap<String, BTreeSet<String>>,
}

impl EnvironmentRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in environments
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("builtin", BUILTIN_GLOBALS.iter().copied());
        registry.register(
            "es6",
            BUILTIN_GLOBALS.iter().chain(ES6_GLOBALS).copied(),
        );
        registry.register(
            "es2020",
            BUILTIN_GLOBALS
                .iter()
                .chain(ES6_GLOBALS)
                .chain(ES2020_GLOBALS)
                .copied(),
        );
        registry.register("browser", BROWSER_GLOBALS.iter().copied());
        registry.register("node", NODE_GLOBALS.iter().copied());
        registry.register("commonjs", COMMONJS_GLOBALS.iter().copied());
        registry.register(
            "vue/setup-compiler-macros",
            VUE_SETUP_MACROS_GLOBALS.iter().copied(),
        );
        registry
    }

    /// Register an environment; a same-named entry is replaced
    pub fn register<I, S>(&mut self, name: impl Into<String>, globals: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let globals: BTreeSet<String> = globals.into_iter().map(Into::into).collect();
        debug!("Registering environment '{}' with {} globals", name, globals.len());
        self.environments.insert(name, globals);
    }

    pub fn globals_for(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.environments.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.environments.contains_key(name)
    }

    /// Environment names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }
}
