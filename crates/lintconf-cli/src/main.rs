//! lintconf CLI
//!
//! Command-line interface for resolving layered lint configuration documents

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use lintconf_core::{Result, init_tracing};
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "lintconf")]
#[command(about = "lintconf: resolve layered lint configuration documents")]
#[command(version = lintconf_core::VERSION)]
#[command(
    long_about = "lintconf flattens eslintrc-style configuration documents (extends chains,\n\
environments, parser options, globals and build-mode conditional rules) into the\n\
effective configuration a linter would apply.\n\
\n\
Examples:\n  \
lintconf resolve                          # Resolve the config for the current directory\n  \
lintconf resolve --build-mode production  # Resolve for a production build\n  \
lintconf matrix --build-mode development --build-mode production\n  \
lintconf presets                          # List built-in rule-sets\n  \
lintconf init                             # Create a starter configuration file"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (.lintconfrc.json/.yaml/.toml)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Number of threads to use for parallel resolution
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the effective configuration
    Resolve {
        /// Directory to start configuration discovery from
        #[arg(help = "Directory to search for configuration (default: current directory)")]
        path: Option<PathBuf>,

        /// Build mode used by conditional rules
        #[arg(long, env = "NODE_ENV", help = "Build mode (e.g. development, production)")]
        build_mode: Option<String>,

        /// Additional environments to activate
        #[arg(
            long = "env",
            value_name = "NAME",
            help = "Activate an environment (can be used multiple times)"
        )]
        environments: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Compare rule severities across several build modes
    Matrix {
        /// Directory to start configuration discovery from
        #[arg(help = "Directory to search for configuration (default: current directory)")]
        path: Option<PathBuf>,

        /// Build modes to compare
        #[arg(
            long = "build-mode",
            value_name = "MODE",
            required = true,
            help = "Build mode to include (can be used multiple times)"
        )]
        build_modes: Vec<String>,

        /// Additional environments to activate
        #[arg(
            long = "env",
            value_name = "NAME",
            help = "Activate an environment (can be used multiple times)"
        )]
        environments: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Check that a configuration loads and resolves
    #[command(alias = "check")]
    Validate {
        /// Directory to start configuration discovery from
        #[arg(help = "Directory to search for configuration (default: current directory)")]
        path: Option<PathBuf>,
    },

    /// List built-in rule-sets
    Presets {
        /// Show extends and rule counts for each preset
        #[arg(long, help = "Show extends and rule counts")]
        detailed: bool,
    },

    /// List built-in environments
    Envs {
        /// Show the globals each environment contributes
        #[arg(long, help = "Show the globals each environment contributes")]
        globals: bool,
    },

    /// Print the JSON Schema of configuration documents
    Schema,

    /// Create a starter configuration file
    Init {
        /// Configuration file format
        #[arg(long, default_value = "json", help = "Configuration file format")]
        format: ConfigFormat,

        /// Overwrite existing configuration file
        #[arg(long, help = "Overwrite existing configuration file")]
        force: bool,
    },

    /// Show version information
    #[command(alias = "ver")]
    Version {
        /// Show detailed version information
        #[arg(long, help = "Show detailed version and build information")]
        detailed: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// YAML format
    Yaml,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConfigFormat {
    /// JSON configuration format
    Json,
    /// YAML configuration format
    Yaml,
    /// TOML configuration format
    Toml,
}

fn main() {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    let log_level = match cli.verbose {
        0 => "lintconf=error",
        1 => "lintconf=warn",
        2 => "lintconf=info",
        3 => "lintconf=debug",
        _ => "lintconf=trace",
    };
    unsafe {
        std::env::set_var("RUST_LOG", log_level);
    }
    init_tracing();

    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run_command(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Resolve {
            path,
            build_mode,
            environments,
            format,
        }) => commands::resolve_command(
            cli.config,
            path,
            build_mode,
            environments,
            format,
            cli.no_color,
        ),

        Some(Commands::Matrix {
            path,
            build_modes,
            environments,
            format,
        }) => commands::matrix_command(
            cli.config,
            path,
            build_modes,
            environments,
            format,
            cli.no_color,
        ),

        Some(Commands::Validate { path }) => commands::validate_command(cli.config, path),

        Some(Commands::Presets { detailed }) => commands::presets_command(detailed),

        Some(Commands::Envs { globals }) => commands::envs_command(globals),

        Some(Commands::Schema) => commands::schema_command(),

        Some(Commands::Init { format, force }) => commands::init_command(format, force),

        Some(Commands::Version { detailed }) => {
            if detailed {
                println!("lintconf {}", lintconf_core::VERSION);
                println!("Build information:");
                println!("  Target: {}", std::env::consts::ARCH);
                println!("  OS: {}", std::env::consts::OS);
                println!(
                    "  Core: {} {}",
                    lintconf_core::NAME,
                    lintconf_core::VERSION
                );
            } else {
                println!("{}", lintconf_core::VERSION);
            }
            Ok(())
        }

        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
