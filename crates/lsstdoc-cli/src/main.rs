//! Command line interface for the `lsstdoc` metadata extractor.
//!
//! # Usage
//!
//! ```bash
//! # Extract the metadata of a document as JSON
//! lsstdoc metadata DMTN-131.tex
//!
//! # Date the document from a different checkout
//! lsstdoc metadata build/DMTN-131.tex --root .
//!
//! # Show every \title call and which one wins
//! lsstdoc occurrences DMTN-131.tex title
//! ```
//!
//! JSON goes to stdout; defaults that were applied, and logs, go to stderr.
//! Use `-v` (repeatable) or `RUST_LOG` for more logging detail.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use lsstdoc::{config::Config, error::LsstDocError};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;

use crate::{commands::*, error::*};

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for warning messages
static WARNING_PREFIX: &str = "⚠️ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";
/// Continuation line for tree structure
static CONTINUE_PREFIX: &str = "│  ";
/// Branch character for tree structure
static TREE_BRANCH: &str = "├";
/// Leaf character for tree structure (end of branch)
static TREE_LEAF: &str = "└";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Metadata extraction for lsstdoc LaTeX documents")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to a TOML configuration file. If not specified, the default platform-specific
  /// configuration file is used when it exists.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used (0-4)
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Loads `--config` when given, else the default configuration file when it
/// exists, else the built-in defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
  if let Some(path) = path {
    return Ok(Config::from_path(path)?);
  }

  let default_path = Config::default_path();
  if default_path.exists() {
    Ok(Config::from_path(default_path)?)
  } else {
    trace!("No configuration at {}, using defaults", default_path.display());
    Ok(Config::default())
  }
}

/// Entry point for the `lsstdoc` CLI application
///
/// Prints a [`LsstDocCliError`] once, styled, and exits with a failure code
/// when the configuration or the document cannot be read. Extraction itself
/// never fails.
#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  match run(cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{} {e}", style(ERROR_PREFIX).red());
      ExitCode::FAILURE
    },
  }
}

/// Loads the configuration and executes the requested command.
async fn run(cli: Cli) -> Result<()> {
  let config = load_config(cli.config.as_deref())?;
  match cli.command {
    Commands::Metadata(options) => metadata(config, options).await,
    Commands::Occurrences(options) => occurrences(options).await,
  }
}
