//! Modification timestamps from version control.
//!
//! Documents without an explicit `\date` are dated by the most recent commit
//! touching their content files.

use super::*;

/// File extensions whose history dates a document.
pub const CONTENT_EXTENSIONS: &[&str] = &["tex", "bib", "pdf", "jpg", "png", "csv"];

/// Source of last-modification timestamps for a set of files.
pub trait VersionControl: Send + Sync {
  /// The time of the most recent change to any file with one of `extensions`.
  ///
  /// `Ok(None)` means the history has no such change.
  fn last_modified(&self, extensions: &[&str]) -> Result<Option<DateTime<Utc>>>;
}

/// A [`VersionControl`] that asks `git log` for the latest commit time.
#[derive(Debug, Clone)]
pub struct Git {
  /// Working directory the `git` commands run in
  root: PathBuf,
}

impl Git {
  /// Queries the repository containing `root`.
  pub fn new(root: impl AsRef<Path>) -> Self { Self { root: root.as_ref().to_path_buf() } }
}

impl VersionControl for Git {
  fn last_modified(&self, extensions: &[&str]) -> Result<Option<DateTime<Utc>>> {
    let pathspecs = extensions.iter().map(|extension| format!("*.{extension}"));
    let output = Command::new("git")
      .arg("-C")
      .arg(&self.root)
      .args(["log", "-1", "--format=%cI", "--"])
      .args(pathspecs)
      .output()?;

    if !output.status.success() {
      return Err(LsstDocError::VersionControl(
        String::from_utf8_lossy(&output.stderr).trim().to_string(),
      ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stamp = stdout.trim();
    if stamp.is_empty() {
      debug!("No commits touch {extensions:?} under {}", self.root.display());
      return Ok(None);
    }

    DateTime::parse_from_rfc3339(stamp)
      .map(|time| Some(time.with_timezone(&Utc)))
      .map_err(|e| LsstDocError::VersionControl(format!("unexpected commit time {stamp:?}: {e}")))
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_outside_a_repository() {
    let dir = tempdir().unwrap();
    let result = Git::new(dir.path().join("missing")).last_modified(CONTENT_EXTENSIONS);
    assert!(result.is_err());
  }
}
