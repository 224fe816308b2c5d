//! lintconf core
//!
//! Resolver for layered lint configuration documents. A document declares
//! environments, an `extends` chain of named rule-sets, parser options,
//! globals and rule severities (optionally conditional on a build mode).
//! Resolution flattens all of it into a single [`EffectiveConfiguration`]
//! for a given [`EnvironmentSnapshot`].

pub mod config;
pub mod effective;
pub mod environment;
pub mod error;
pub mod parser_options;
pub mod resolver;
pub mod result;
pub mod rule_sets;
pub mod rules;

// Re-export commonly used types
pub use config::{ConfigDocument, ConfigLoader};
pub use effective::EffectiveConfiguration;
pub use environment::{
    DEFAULT_BUILD_MODE_VAR, EnvironmentRegistry, EnvironmentSnapshot, GlobalAccess,
};
pub use error::{ConfigError, ErrorKind};
pub use parser_options::{EcmaVersion, ParserOptions, SourceType};
pub use resolver::{MAX_EXTENDS_DEPTH, ROOT_DOCUMENT, Resolver};
pub use result::Result;
pub use rule_sets::RuleSetCatalog;
pub use rules::{Condition, RuleDeclaration, RuleEntry, Severity};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lintconf=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
