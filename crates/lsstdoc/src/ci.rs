//! Build metadata from the continuous-integration environment.
//!
//! Documents are built on GitHub Actions, which describes the build through
//! `GITHUB_*` environment variables. The values are captured once into a
//! [`CiEnvironment`] so that extraction stays a function of its inputs.

use super::*;

/// Snapshot of the CI variables the metadata record passes through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiEnvironment {
  /// `GITHUB_SERVER_URL`, e.g. `https://github.com`
  pub server_url: Option<String>,
  /// `GITHUB_REPOSITORY`, e.g. `lsst-dm/dmtn-131`
  pub repository: Option<String>,
  /// `GITHUB_RUN_ID`
  pub run_id:     Option<String>,
  /// `GITHUB_REF_NAME`, the branch or tag being built
  pub ref_name:   Option<String>,
  /// `GITHUB_SHA`
  pub sha:        Option<String>,
}

impl CiEnvironment {
  /// Reads the variables from the process environment.
  pub fn from_env() -> Self { Self::from_vars(std::env::vars()) }

  /// Builds a snapshot from explicit `(name, value)` pairs. Unknown names and
  /// empty values are ignored.
  pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
  where
    K: AsRef<str>,
    V: Into<String>, {
    let mut environment = Self::default();
    for (name, value) in vars {
      let value: String = value.into();
      if value.trim().is_empty() {
        continue;
      }
      let slot = match name.as_ref() {
        "GITHUB_SERVER_URL" => &mut environment.server_url,
        "GITHUB_REPOSITORY" => &mut environment.repository,
        "GITHUB_RUN_ID" => &mut environment.run_id,
        "GITHUB_REF_NAME" => &mut environment.ref_name,
        "GITHUB_SHA" => &mut environment.sha,
        _ => continue,
      };
      *slot = Some(value.trim().to_string());
    }
    environment
  }

  /// Server URL, defaulting to `https://github.com`.
  fn server(&self) -> &str {
    self.server_url.as_deref().unwrap_or("https://github.com").trim_end_matches('/')
  }

  /// The repository's web URL.
  pub fn repository_url(&self) -> Option<String> {
    self.repository.as_ref().map(|repository| format!("{}/{repository}", self.server()))
  }

  /// The URL of the CI run that built the document.
  pub fn ci_url(&self) -> Option<String> {
    let repository = self.repository.as_ref()?;
    let run_id = self.run_id.as_ref()?;
    Some(format!("{}/{repository}/actions/runs/{run_id}", self.server()))
  }

  /// The document version: the ref name being built, else the commit SHA.
  pub fn version(&self) -> Option<String> { self.ref_name.clone().or_else(|| self.sha.clone()) }

  /// The repository as an `(owner, name)` pair.
  pub fn repository_slug(&self) -> Option<(&str, &str)> {
    let (owner, name) = self.repository.as_deref()?.split_once('/')?;
    (!owner.is_empty() && !name.is_empty() && !name.contains('/')).then_some((owner, name))
  }
}
