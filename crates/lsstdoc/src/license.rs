//! Repository license lookups.
//!
//! The license is informational metadata, so lookups are infallible by
//! contract: transport errors, missing repositories and unrecognized licenses
//! all come back as an unknown license.

use std::time::Duration;

use super::*;

/// License information for a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
  /// SPDX identifier, e.g. `CC-BY-4.0`
  pub license_id: Option<String>,
}

/// Looks up the license of a hosted repository.
#[async_trait]
pub trait LicenseLookup: Send + Sync {
  /// The license of `owner/repo`. Never fails; unknown licenses are `None`.
  async fn lookup(&self, owner: &str, repo: &str) -> LicenseInfo;
}

/// A [`LicenseLookup`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubLicenses {
  /// Base URL of the API, e.g. `https://api.github.com`
  api_url: String,
  /// Client reused across lookups
  client:  reqwest::Client,
}

/// Subset of the `/repos/{owner}/{repo}/license` response we read.
#[derive(Debug, Deserialize)]
struct LicenseResponse {
  /// The license object
  license: LicenseBody,
}

/// License object nested in [`LicenseResponse`].
#[derive(Debug, Deserialize)]
struct LicenseBody {
  /// SPDX identifier, `NOASSERTION` when GitHub cannot tell
  spdx_id: Option<String>,
}

impl GitHubLicenses {
  /// Creates a client against `api_url` with the given request timeout.
  pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
    let client = reqwest::Client::builder()
      .user_agent(concat!("lsstdoc/", env!("CARGO_PKG_VERSION")))
      .timeout(timeout)
      .build()?;
    Ok(Self { api_url: api_url.into().trim_end_matches('/').to_string(), client })
  }

  /// Fetches the license, propagating every failure.
  async fn fetch(&self, owner: &str, repo: &str) -> Result<Option<String>> {
    let url = format!("{}/repos/{owner}/{repo}/license", self.api_url);
    debug!("Fetching license via: {url}");

    let response = self
      .client
      .get(&url)
      .header("Accept", "application/vnd.github+json")
      .send()
      .await?
      .error_for_status()?;
    let body: LicenseResponse = response.json().await?;

    Ok(body.license.spdx_id.filter(|id| id != "NOASSERTION"))
  }
}

#[async_trait]
impl LicenseLookup for GitHubLicenses {
  async fn lookup(&self, owner: &str, repo: &str) -> LicenseInfo {
    match self.fetch(owner, repo).await {
      Ok(license_id) => LicenseInfo { license_id },
      Err(e) => {
        warn!("License lookup for {owner}/{repo} failed: {e}");
        LicenseInfo::default()
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_response_decoding() {
    let body: LicenseResponse =
      serde_json::from_str(r#"{"name": "LICENSE", "license": {"key": "mit", "spdx_id": "MIT"}}"#)
        .unwrap();
    assert_eq!(body.license.spdx_id.as_deref(), Some("MIT"));
  }

  #[traced_test]
  #[tokio::test]
  async fn test_unreachable_api_degrades_to_unknown() {
    let licenses = GitHubLicenses::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let info = licenses.lookup("lsst", "dmtn-131").await;
    assert_eq!(info, LicenseInfo::default());
    assert!(logs_contain("License lookup for lsst/dmtn-131 failed"));
  }
}
