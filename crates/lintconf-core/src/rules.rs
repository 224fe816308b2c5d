//! Rule severities, rule entries and conditional rule declarations
//!
//! Rule declarations are kept as raw JSON values in the document and parsed
//! here, so that errors can name the offending rule.
//!
//! Accepted shapes:
//!
//! ```jsonc
//! {
//!   "no-undef": "error",                  // bare level
//!   "eqeqeq": 2,                          // numeric alias (0 = off, 1 = warn, 2 = error)
//!   "max-depth": ["warn", { "max": 4 }],  // level followed by options
//!   "no-console": {                       // conditional on the build mode
//!     "when": { "buildMode": "production" },
//!     "then": "warn",
//!     "else": "off"
//!   }
//! }
//! ```

use crate::environment::EnvironmentSnapshot;
use crate::error::ConfigError;
use crate::result::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Rule severity levels, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Disable the rule
    Off,
    /// Warning (doesn't fail the lint run)
    Warn,
    /// Error (fails the lint run)
    Error,
}

impl Severity {
    /// Parse a severity literal: `off`/`warn`/`error` (any case) or `0`/`1`/`2`
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => s.parse().ok(),
            Value::Number(_) => match whole_number(value)? {
                0 => Some(Severity::Off),
                1 => Some(Severity::Warn),
                2 => Some(Severity::Error),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self != Severity::Off
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Severity::Off),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(format!("unknown severity '{s}'")),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integral value of a JSON number.
///
/// Integers pass through; a float with no fractional part, such as `2.0`,
/// counts as `2`.
pub(crate) fn whole_number(value: &Value) -> Option<u64> {
    let n = value.as_number()?;
    n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
            .map(|f| f as u64)
    })
}

/// A rule's severity plus its opaque, rule-specific options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleEntry {
    pub severity: Severity,

    /// Options are never interpreted by the resolver
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Value>,
}

impl RuleEntry {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    pub fn with_options(severity: Severity, options: Vec<Value>) -> Self {
        Self { severity, options }
    }

    /// Parse a literal entry: a bare level or `[level, ...options]`
    pub fn parse(rule: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let (level, options) = items
                    .split_first()
                    .ok_or_else(|| ConfigError::invalid_rule_level(rule, "[]"))?;
                let severity = Severity::from_value(level)
                    .ok_or_else(|| ConfigError::invalid_rule_level(rule, level))?;
                Ok(Self::with_options(severity, options.to_vec()))
            }
            other => Severity::from_value(other)
                .map(Self::new)
                .ok_or_else(|| ConfigError::invalid_rule_level(rule, other)),
        }
    }

    /// Apply a higher-precedence entry on top of this one.
    ///
    /// A severity-only override keeps the existing options.
    pub fn override_with(&mut self, other: RuleEntry) {
        self.severity = other.severity;
        if !other.options.is_empty() {
            self.options = other.options;
        }
    }
}

/// Condition over the environment snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Build mode equals the given value
    BuildModeEquals(String),
    /// Build mode is any of the given values
    BuildModeIn(Vec<String>),
}

impl Condition {
    fn parse(rule: &str, value: &Value) -> Result<Self> {
        let invalid =
            || ConfigError::invalid_rule_level(rule, format!("unsupported condition {value}"));

        let object = value.as_object().ok_or_else(invalid)?;
        if object.len() != 1 {
            return Err(invalid());
        }

        match object.get("buildMode") {
            Some(Value::String(mode)) => Ok(Condition::BuildModeEquals(mode.clone())),
            Some(Value::Array(modes)) => modes
                .iter()
                .map(|m| m.as_str().map(str::to_string).ok_or_else(invalid))
                .collect::<Result<Vec<_>>>()
                .map(Condition::BuildModeIn),
            _ => Err(invalid()),
        }
    }

    /// An unset build mode never matches
    pub fn evaluate(&self, snapshot: &EnvironmentSnapshot) -> bool {
        let Some(mode) = snapshot.build_mode() else {
            return false;
        };
        match self {
            Condition::BuildModeEquals(expected) => mode == expected,
            Condition::BuildModeIn(expected) => expected.iter().any(|e| e == mode),
        }
    }
}

/// A rule declaration as written in a document
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDeclaration {
    Literal(RuleEntry),
    Conditional {
        condition: Condition,
        then: RuleEntry,
        otherwise: RuleEntry,
    },
}

impl RuleDeclaration {
    /// Parse the raw declaration of `rule`
    pub fn parse(rule: &str, value: &Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return RuleEntry::parse(rule, value).map(RuleDeclaration::Literal);
        };

        if let Some(key) = object
            .keys()
            .find(|k| !matches!(k.as_str(), "when" | "then" | "else"))
        {
            return Err(ConfigError::invalid_rule_level(
                rule,
                format!("unexpected key '{key}' in conditional declaration"),
            ));
        }

        let condition = object
            .get("when")
            .ok_or_else(|| ConfigError::invalid_rule_level(rule, value))
            .and_then(|when| Condition::parse(rule, when))?;
        let then = object
            .get("then")
            .ok_or_else(|| ConfigError::invalid_rule_level(rule, "conditional without 'then'"))
            .and_then(|v| RuleEntry::parse(rule, v))?;
        let otherwise = match object.get("else") {
            Some(v) => RuleEntry::parse(rule, v)?,
            None => RuleEntry::new(Severity::Off),
        };

        Ok(RuleDeclaration::Conditional {
            condition,
            then,
            otherwise,
        })
    }

    /// Compute the literal entry for this snapshot
    pub fn evaluate(&self, snapshot: &EnvironmentSnapshot) -> RuleEntry {
        match self {
            RuleDeclaration::Literal(entry) => entry.clone(),
            RuleDeclaration::Conditional {
                condition,
                then,
                otherwise,
            } => {
                if condition.evaluate(snapshot) {
                    then.clone()
                } else {
                    otherwise.clone()
                }
            }
        }
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self, RuleDeclaration::Conditional { .. })
    }
}
