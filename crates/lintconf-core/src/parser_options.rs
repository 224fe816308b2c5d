//! Parser options
//!
//! Documents carry parser options as a raw key/value map. The known keys are
//! validated into typed fields here; anything else is passed through as an
//! opaque value for the parser to interpret.

use crate::error::ConfigError;
use crate::result::Result;
use crate::rules::whole_number;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Newest edition accepted as a plain number or year
const LATEST_KNOWN_YEAR: u64 = 2025;

/// Language level targeted by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EcmaVersion {
    /// Edition 3 or 5, or the publication year for 2015 onwards
    Version(u16),
    Latest,
}

impl EcmaVersion {
    /// Edition numbers from 6 upward map to their publication year
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s == "latest" => Some(EcmaVersion::Latest),
            Value::Number(_) => {
                let n = whole_number(value)?;
                let year = match n {
                    3 | 5 => n,
                    6..=16 => n + 2009,
                    2015..=LATEST_KNOWN_YEAR => n,
                    _ => return None,
                };
                u16::try_from(year).ok().map(EcmaVersion::Version)
            }
            _ => None,
        }
    }
}

impl Serialize for EcmaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            EcmaVersion::Version(v) => serializer.serialize_u16(*v),
            EcmaVersion::Latest => serializer.serialize_str("latest"),
        }
    }
}

impl fmt::Display for EcmaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcmaVersion::Version(v) => write!(f, "{v}"),
            EcmaVersion::Latest => f.write_str("latest"),
        }
    }
}

/// How source files are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Script,
    Module,
    Commonjs,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Script => "script",
            SourceType::Module => "module",
            SourceType::Commonjs => "commonjs",
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value.as_str()? {
            "script" => Some(SourceType::Script),
            "module" => Some(SourceType::Module),
            "commonjs" => Some(SourceType::Commonjs),
            _ => None,
        }
    }
}

/// Validated parser options
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecma_version: Option<EcmaVersion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,

    /// Merged per feature
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ecma_features: BTreeMap<String, bool>,

    /// Keys the resolver does not interpret
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ParserOptions {
    /// Validate a raw option map
    pub fn from_raw(raw: &IndexMap<String, Value>) -> Result<Self> {
        let mut options = ParserOptions::default();

        for (key, value) in raw {
            match key.as_str() {
                "ecmaVersion" => {
                    let version = EcmaVersion::from_value(value).ok_or_else(|| {
                        ConfigError::malformed_option(
                            key,
                            format!(
                                "expected 3, 5, 6..=16, 2015..={LATEST_KNOWN_YEAR} or \"latest\", got {value}"
                            ),
                        )
                    })?;
                    options.ecma_version = Some(version);
                }
                "sourceType" => {
                    let source_type = SourceType::from_value(value).ok_or_else(|| {
                        ConfigError::malformed_option(
                            key,
                            format!("expected \"script\", \"module\" or \"commonjs\", got {value}"),
                        )
                    })?;
                    options.source_type = Some(source_type);
                }
                "ecmaFeatures" => {
                    let features = value.as_object().ok_or_else(|| {
                        ConfigError::malformed_option(
                            key,
                            format!("expected an object, got {value}"),
                        )
                    })?;
                    for (feature, enabled) in features {
                        let enabled = enabled.as_bool().ok_or_else(|| {
                            ConfigError::malformed_option(
                                format!("ecmaFeatures.{feature}"),
                                format!("expected a boolean, got {enabled}"),
                            )
                        })?;
                        options.ecma_features.insert(feature.clone(), enabled);
                    }
                }
                _ => {
                    options.extra.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(options)
    }

    pub fn is_empty(&self) -> bool {
        self.ecma_version.is_none()
            && self.source_type.is_none()
            && self.ecma_features.is_empty()
            && self.extra.is_empty()
    }
}
