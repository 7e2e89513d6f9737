//! Configuration for the collaborators around the extractor.
//!
//! Every field has a default, so an empty file (or no file at all) is a valid
//! configuration.
//!
//! ```toml
//! repository_root = "docs/dmtn-131"
//! pandoc = "/usr/local/bin/pandoc"
//! github_api_url = "https://api.github.com"
//! request_timeout_secs = 10
//! ```

use std::time::Duration;

use super::*;

/// Collaborator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory inside the document's repository, used for `git` queries
  pub repository_root:      PathBuf,
  /// The `pandoc` executable
  pub pandoc:               PathBuf,
  /// Base URL of the GitHub REST API
  pub github_api_url:       String,
  /// Timeout for license lookups
  pub request_timeout_secs: u64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      repository_root:      PathBuf::from("."),
      pandoc:               PathBuf::from("pandoc"),
      github_api_url:       "https://api.github.com".to_string(),
      request_timeout_secs: 10,
    }
  }
}

impl Config {
  /// Loads a TOML configuration file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Returns the default configuration file path.
  ///
  /// - On Unix: `~/.config/lsstdoc/config.toml`
  /// - On macOS: `~/Library/Application Support/lsstdoc/config.toml`
  /// - On Windows: `%APPDATA%\lsstdoc\config.toml`
  /// - Fallback: `./lsstdoc/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("lsstdoc").join("config.toml")
  }

  /// Sets the repository root used for `git` queries.
  pub fn with_repository_root(mut self, root: impl AsRef<Path>) -> Self {
    self.repository_root = root.as_ref().to_path_buf();
    self
  }

  /// Sets the `pandoc` executable.
  pub fn with_pandoc(mut self, pandoc: impl AsRef<Path>) -> Self {
    self.pandoc = pandoc.as_ref().to_path_buf();
    self
  }

  /// Sets the GitHub API base URL.
  pub fn with_github_api_url(mut self, url: impl Into<String>) -> Self {
    self.github_api_url = url.into();
    self
  }

  /// The license lookup timeout.
  pub fn request_timeout(&self) -> Duration { Duration::from_secs(self.request_timeout_secs) }

  /// Rejects settings the collaborators cannot work with.
  fn validate(&self) -> Result<()> {
    if self.request_timeout_secs == 0 {
      return Err(LsstDocError::Config("request_timeout_secs must be positive".into()));
    }
    if !self.github_api_url.starts_with("http://") && !self.github_api_url.starts_with("https://") {
      return Err(LsstDocError::Config(format!(
        "github_api_url must be an http(s) URL, got {:?}",
        self.github_api_url
      )));
    }
    Ok(())
  }
}
