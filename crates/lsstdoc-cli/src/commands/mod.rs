use super::*;

pub mod metadata;
pub mod occurrences;

pub use metadata::{metadata, MetadataOptions};
pub use occurrences::{occurrences, OccurrencesOptions};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Extract a document's metadata and print it as JSON
  Metadata(MetadataOptions),

  /// List every call of a field's command, marking the one that wins
  Occurrences(OccurrencesOptions),
}

/// Reads the document at `path`.
async fn read_document(path: &Path) -> Result<String> {
  debug!("Reading {}", path.display());
  tokio::fs::read_to_string(path)
    .await
    .map_err(|source| LsstDocCliError::Read { path: path.to_path_buf(), source })
}
