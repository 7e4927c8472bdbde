//! archtest CLI tool.
//!
//! Usage:
//! ```bash
//! archtest check [OPTIONS] [PATH]
//! archtest graph [OPTIONS] [PATH]
//! archtest types [OPTIONS] [PATH]
//! archtest list-patterns
//! archtest init
//! ```

use anyhow::Result;
use archtest_core::Severity;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::project::Project;

mod commands;
mod project;

/// Architecture tests for Go codebases
#[derive(Parser)]
#[command(name = "archtest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ARCHTEST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configured patterns and rules
    Check {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Lowest failing severity that sets a non-zero exit code
        #[arg(long)]
        fail_on: Option<Severity>,

        /// Evaluate the rules of each pattern on parallel threads
        #[arg(long)]
        parallel: bool,
    },

    /// Render module dependencies as a Graphviz DOT graph
    Graph {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only include types residing in this namespace
        #[arg(short, long)]
        namespace: Option<String>,

        /// Write the graph to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List the extracted types
    Types {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only include types residing in this namespace
        #[arg(short, long)]
        namespace: Option<String>,

        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List built-in architecture patterns
    ListPatterns,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Standalone HTML page.
    Html,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            exclude,
            fail_on,
            parallel,
        } => {
            let project = Project::discover(&path, cli.config.as_deref())?;
            let options = commands::check::CheckOptions {
                format,
                exclude,
                fail_on,
                parallel,
            };
            commands::check::run(&project, options)
        }
        Commands::Graph {
            path,
            namespace,
            output,
            exclude,
        } => {
            let project = Project::discover(&path, cli.config.as_deref())?;
            commands::graph::run(&project, namespace.as_deref(), output, &exclude)
        }
        Commands::Types {
            path,
            namespace,
            format,
            exclude,
        } => {
            let project = Project::discover(&path, cli.config.as_deref())?;
            commands::types::run(&project, namespace.as_deref(), format, &exclude)
        }
        Commands::ListPatterns => {
            commands::list_patterns::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
