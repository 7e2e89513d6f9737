//! Errors reported by the command line interface.

use super::*;

/// Type alias for CLI results.
pub type Result<T> = core::result::Result<T, LsstDocCliError>;

/// Errors that stop a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum LsstDocCliError {
  /// Configuration or collaborator setup failed.
  #[error(transparent)]
  LsstDoc(#[from] LsstDocError),

  /// The document could not be read.
  #[error("Could not read {}: {source}", path.display())]
  Read {
    /// The document path
    path:   PathBuf,
    /// The underlying failure
    source: std::io::Error,
  },

  /// The result could not be written as JSON.
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}
