//! Configuration documents: model, loading and merging
//!
//! This module provides:
//! - The [`ConfigDocument`] model with serde deserialization and JSON Schema
//!   generation via schemars
//! - JSON/JSONC, YAML and TOML file support
//! - Auto-discovery by traversing up directories, with a cascade that stops
//!   at the first document marked `root: true`
//! - Pre-loading of file-relative `extends` entries into a
//!   [`RuleSetCatalog`](crate::RuleSetCatalog)
//!
//! ## Configuration Files
//!
//! Discovered file names, in priority order:
//! - `.lintconfrc.json` / `.lintconfrc.jsonc` - JSON with comments and trailing commas
//! - `.lintconfrc.yaml` / `.lintconfrc.yml` - YAML
//! - `.lintconfrc.toml` - TOML
//!
//! ## Configuration Inheritance
//!
//! Documents inherit from named rule-sets or from other files through
//! `extends`. Later entries override earlier ones and the document's own
//! declarations override everything it inherits:
//!
//! ```jsonc
//! {
//!   "root": true,
//!   "env": { "node": true, "vue/setup-compiler-macros": true },
//!   "extends": ["plugin:vue/vue3-essential", "eslint:recommended", "./team.json"],
//!   "parserOptions": { "ecmaVersion": 2020 },
//!   "rules": {
//!     "no-console": { "when": { "buildMode": "production" }, "then": "warn", "else": "off" },
//!     "vue/no-setup-props-destructure": ["off"],
//!     "no-undef": "error"
//!   }
//! }
//! ```

mod document;
mod loader;
pub(crate) mod merge;

pub use document::ConfigDocument;
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader, is_file_reference};
