//! Error types for configuration loading and resolution

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for configuration loading and resolution
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An `extends` entry names a rule-set that is not in the catalog
    #[error("Unresolvable extends reference '{reference}' in '{referrer}'")]
    UnresolvableReference { reference: String, referrer: String },

    /// The extends graph contains a cycle
    #[error("Cyclic extends chain: {}", format_chain(.chain))]
    CyclicExtends { chain: Vec<String> },

    /// The extends chain nests deeper than the resolver allows
    #[error("Extends chain too deep: {chain_len} levels (maximum {max})")]
    ExtendsTooDeep { chain_len: usize, max: usize },

    /// A rule declaration does not evaluate to one of off/warn/error
    #[error("Invalid level for rule '{rule}': {value}")]
    InvalidRuleLevel { rule: String, value: String },

    /// A parser option carries a value of the wrong shape
    #[error("Malformed parser option '{option}': {message}")]
    MalformedOption { option: String, message: String },

    /// An environment flag names an environment that is not registered
    #[error("Unknown environment '{name}'")]
    UnknownEnvironment { name: String },

    /// A `globals` entry has an unrecognized access value
    #[error("Invalid access for global '{name}': {value}")]
    InvalidGlobal { name: String, value: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be deserialized
    #[error("Failed to parse '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// No configuration file could be located
    #[error("Configuration not found: {message}")]
    NotFound { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Reference,
    Cycle,
    Depth,
    RuleLevel,
    Option,
    Environment,
    Global,
    Io,
    Parse,
}

fn format_chain(chain: &[String]) -> String {
    chain.join(" → ")
}

impl ConfigError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::UnresolvableReference { .. } => ErrorKind::Reference,
            ConfigError::CyclicExtends { .. } => ErrorKind::Cycle,
            ConfigError::ExtendsTooDeep { .. } => ErrorKind::Depth,
            ConfigError::InvalidRuleLevel { .. } => ErrorKind::RuleLevel,
            ConfigError::MalformedOption { .. } => ErrorKind::Option,
            ConfigError::UnknownEnvironment { .. } => ErrorKind::Environment,
            ConfigError::InvalidGlobal { .. } => ErrorKind::Global,
            ConfigError::Io { .. } | ConfigError::NotFound { .. } => ErrorKind::Io,
            ConfigError::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// Whether the error was raised while resolving an already-loaded document
    pub fn is_resolution_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Io | ErrorKind::Parse)
    }

    pub fn unresolvable_reference(
        reference: impl Into<String>,
        referrer: impl Into<String>,
    ) -> Self {
        Self::UnresolvableReference {
            reference: reference.into(),
            referrer: referrer.into(),
        }
    }

    pub fn cyclic_extends(chain: Vec<String>) -> Self {
        Self::CyclicExtends { chain }
    }

    pub fn extends_too_deep(chain_len: usize, max: usize) -> Self {
        Self::ExtendsTooDeep { chain_len, max }
    }

    pub fn invalid_rule_level(rule: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidRuleLevel {
            rule: rule.into(),
            value: value.to_string(),
        }
    }

    pub fn malformed_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedOption {
            option: option.into(),
            message: message.into(),
        }
    }

    pub fn unknown_environment(name: impl Into<String>) -> Self {
        Self::UnknownEnvironment { name: name.into() }
    }

    pub fn invalid_global(name: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidGlobal {
            name: name.into(),
            value: value.to_string(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}
