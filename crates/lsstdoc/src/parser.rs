//! Assembly of a document's metadata.
//!
//! [`MetadataParser`] owns the collaborators, runs every field extractor
//! against the same source buffer, and combines the results with the CI
//! snapshot, the rendered full text and the license lookup into one
//! [`DocumentMetadata`](crate::metadata::DocumentMetadata). The extractors are independent of one another.
//!
//! # Examples
//!
//! ```no_run
//! use lsstdoc::{ci::CiEnvironment, config::Config, extract::Field, parser::MetadataParser};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default().with_repository_root("docs/dmtn-131");
//! let parser = MetadataParser::from_config(&config)?.with_ci(CiEnvironment::from_env());
//!
//! let source = std::fs::read_to_string("docs/dmtn-131/DMTN-131.tex")?;
//! let extraction = parser.extract(&source).await;
//! if extraction.default_for(Field::Identifier).is_some() {
//!   println!("No \\setDocRef in this document");
//! }
//! # Ok(())
//! # }
//! ```

use super::*;
use crate::{
  ci::CiEnvironment,
  command::strip_comments,
  config::Config,
  convert::{OutputFormat, Pandoc, TextConverter},
  extract::{self, Field},
  license::{GitHubLicenses, LicenseLookup},
  metadata::{AppliedDefault, Extraction, MetadataBuilder},
  preamble,
  resolve::Resolved,
  vcs::{Git, VersionControl},
};

/// Unwraps a field's value, noting the default it fell back to, if any.
fn record<T>(defaults: &mut Vec<AppliedDefault>, field: Field, resolved: Resolved<T>) -> T {
  let (value, reason) = resolved.into_parts();
  if let Some(reason) = reason {
    defaults.push(AppliedDefault { field, reason });
  }
  value
}

/// Extracts [`DocumentMetadata`](crate::metadata::DocumentMetadata) from `lsstdoc` sources.
pub struct MetadataParser {
  /// LaTeX to plain text / HTML
  converter:       Box<dyn TextConverter>,
  /// Fallback modification dates
  version_control: Box<dyn VersionControl>,
  /// Repository licenses
  licenses:        Box<dyn LicenseLookup>,
  /// CI passthrough fields
  ci:              CiEnvironment,
}

impl std::fmt::Debug for MetadataParser {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MetadataParser").field("ci", &self.ci).finish_non_exhaustive()
  }
}

impl MetadataParser {
  /// Creates a parser over the given collaborators, outside of CI.
  pub fn new(
    converter: impl TextConverter + 'static,
    version_control: impl VersionControl + 'static,
    licenses: impl LicenseLookup + 'static,
  ) -> Self {
    Self {
      converter:       Box::new(converter),
      version_control: Box::new(version_control),
      licenses:        Box::new(licenses),
      ci:              CiEnvironment::default(),
    }
  }

  /// Creates a parser using `pandoc`, `git` and the GitHub API as configured.
  pub fn from_config(config: &Config) -> Result<Self> {
    Ok(Self::new(
      Pandoc::new(&config.pandoc),
      Git::new(&config.repository_root),
      GitHubLicenses::new(config.github_api_url.clone(), config.request_timeout())?,
    ))
  }

  /// Uses `ci` for the passthrough fields and the license lookup.
  pub fn with_ci(mut self, ci: CiEnvironment) -> Self {
    self.ci = ci;
    self
  }

  /// Extracts the metadata of `source`.
  ///
  /// `%` comments are stripped once up front, so commented-out calls never
  /// take part in last-occurrence-wins.
  ///
  /// Never fails: missing commands, malformed arguments and collaborator
  /// failures are reported through [`Extraction::defaults`] and the log.
  pub async fn extract(&self, source: &str) -> Extraction {
    let stripped = strip_comments(source);
    let source: &str = &stripped;
    let mut defaults = Vec::new();
    let converter = self.converter.as_ref();

    let title = record(&mut defaults, Field::Title, extract::title(source, converter));
    let authors = record(&mut defaults, Field::Authors, extract::authors(source, converter));
    let date_modified = record(
      &mut defaults,
      Field::Date,
      extract::date_modified(source, self.version_control.as_ref()),
    );
    let identifier = record(&mut defaults, Field::Identifier, extract::identifier(source));
    let abstract_text =
      record(&mut defaults, Field::Abstract, extract::abstract_text(source, converter));

    let metadata = MetadataBuilder {
      title,
      authors,
      date_modified,
      identifier,
      abstract_text,
      version: self.ci.version(),
      repository_url: self.ci.repository_url(),
      ci_url: self.ci.ci_url(),
      license_id: self.license_id().await,
      full_text: self.full_text(source),
    }
    .build();

    Extraction { metadata, defaults }
  }

  /// Looks up the repository license when the repository is known.
  async fn license_id(&self) -> Option<String> {
    let (owner, repo) = self.ci.repository_slug()?;
    self.licenses.lookup(owner, repo).await.license_id
  }

  /// Renders the whole document to plain text.
  fn full_text(&self, source: &str) -> Option<String> {
    match self.converter.convert(&preamble::with_macros(source), OutputFormat::Plain, false) {
      Ok(text) => Some(text),
      Err(e) => {
        warn!("Could not render the full document text: {e}");
        None
      },
    }
  }
}
