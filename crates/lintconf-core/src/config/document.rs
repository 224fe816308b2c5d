//! Configuration document as authored on disk
//!
//! The document is source data: it is deserialized once and never mutated
//! by resolution. Rule declarations, parser options and globals are kept as
//! raw values and validated during resolution, so errors can name the
//! offending rule or option.

use crate::error::ConfigError;
use crate::result::Result;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single configuration document
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigDocument {
    /// JSON Schema reference for editor support
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "JSON Schema reference")]
    pub schema: Option<String>,

    /// Stop looking for configuration files in parent directories
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Stop the directory cascade at this document")]
    pub root: Option<bool>,

    /// Runtime environments to enable or disable
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[schemars(description = "Environment name to enabled flag")]
    pub env: IndexMap<String, bool>,

    /// Inherited rule-sets, lowest precedence first
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(
        with = "Vec<String>",
        description = "Rule-set identifiers to inherit from, later entries win"
    )]
    pub extends: Vec<String>,

    /// Parser settings
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[schemars(description = "Parser options (ecmaVersion, sourceType, ecmaFeatures, ...)")]
    pub parser_options: IndexMap<String, Value>,

    /// Additional global identifiers
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[schemars(description = "Global identifier to 'readonly', 'writable' or 'off'")]
    pub globals: IndexMap<String, Value>,

    /// Rule declarations
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[schemars(
        description = "Rule name to level, [level, ...options] or {when, then, else} declaration"
    )]
    pub rules: IndexMap<String, Value>,
}

/// Accept `"extends": "name"` as shorthand for a one-element chain
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(single) => vec![single],
        OneOrMany::Many(many) => many,
    })
}

impl ConfigDocument {
    /// Build a document from an in-memory JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::parse("<inline>", e))
    }

    pub fn is_root(&self) -> bool {
        self.root.unwrap_or(false)
    }

    /// JSON Schema describing the document format
    pub fn json_schema() -> Value {
        schemars::schema_for!(ConfigDocument).to_value()
    }
}
