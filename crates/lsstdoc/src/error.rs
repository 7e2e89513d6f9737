//! Error types for the lsstdoc library.
//!
//! Extraction itself never fails: a missing command or a malformed argument is
//! a recoverable condition handled by [`Resolved`](crate::resolve::Resolved).
//! The errors here come from the collaborators around the core:
//! - Text conversion through `pandoc`
//! - Version-control queries through `git`
//! - License lookups over HTTP
//! - Configuration loading
//!
//! # Examples
//!
//! ```no_run
//! use lsstdoc::{config::Config, error::LsstDocError};
//!
//! match Config::from_path("lsstdoc.toml") {
//!   Err(LsstDocError::TomlDe(e)) => println!("Malformed configuration: {e}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(config) => println!("Loaded {config:?}"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`lsstdoc`](crate) crate.
pub type Result<T> = core::result::Result<T, LsstDocError>;

/// Errors raised by collaborators and configuration handling.
///
/// The extractors catch every one of these and downgrade it to a default
/// value, so callers of [`MetadataParser::extract`](crate::parser::MetadataParser::extract)
/// never see them. They surface when the collaborators are used directly.
#[derive(Error, Debug)]
pub enum LsstDocError {
  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The GitHub API is unreachable
  /// - The request times out
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A file system or subprocess operation failed.
  ///
  /// This occurs when:
  /// - A configuration or source file cannot be read
  /// - The `pandoc` or `git` executable cannot be spawned
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A JSON payload could not be decoded or encoded.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A TOML configuration file could not be deserialized.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The text converter exited unsuccessfully or produced unusable output.
  ///
  /// The string carries the converter's diagnostic output.
  #[error("Text conversion failed: {0}")]
  Conversion(String),

  /// The version-control query failed, e.g. because no repository is present.
  #[error("Version control query failed: {0}")]
  VersionControl(String),

  /// The provided field name doesn't name a metadata field.
  ///
  /// The string parameter contains the rejected name.
  #[error("Invalid field {0:?}, see `lsstdoc::extract::Field`")]
  InvalidField(String),

  /// The configuration is invalid.
  #[error("{0}")]
  Config(String),
}
