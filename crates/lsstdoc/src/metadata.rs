//! The assembled metadata record.
//!
//! [`DocumentMetadata`] is built once per document by
//! [`MetadataParser::extract`](crate::parser::MetadataParser::extract) and has
//! no mutating methods.

use super::*;
use crate::{convert::FormattedText, extract::Field, resolve::Fallback};

/// An author of a document.
///
/// # Examples
///
/// ```
/// use lsstdoc::metadata::Person;
///
/// let author = Person::new("Stéphane Author");
/// assert_eq!(author.name, "Stéphane Author");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  /// Full name, as rendered plain text
  pub name: String,
}

impl Person {
  /// A person called `name`.
  pub fn new(name: impl Into<String>) -> Self { Self { name: name.into() } }
}

/// Metadata of one `lsstdoc` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
  /// Plain-text title, empty when the document has none
  title:          String,
  /// Authors in source order
  authors:        Vec<Person>,
  /// Last modification time
  date_modified:  Option<DateTime<Utc>>,
  /// Document handle, e.g. `DMTN-131`
  identifier:     Option<String>,
  /// Abstract in plain text and HTML
  abstract_text:  Option<FormattedText>,
  /// Version being built (CI ref name or commit)
  version:        Option<String>,
  /// Web URL of the document's repository
  repository_url: Option<String>,
  /// URL of the CI run that built the document
  ci_url:         Option<String>,
  /// SPDX identifier of the repository's license
  license_id:     Option<String>,
  /// The full document rendered to plain text
  full_text:      Option<String>,
}

/// Builder collecting the fields of a [`DocumentMetadata`].
///
/// Only [`MetadataParser`](crate::parser::MetadataParser) and tests build
/// metadata, so the builder is crate-private.
#[derive(Debug, Default)]
pub(crate) struct MetadataBuilder {
  /// See [`DocumentMetadata::title`]
  pub title:          String,
  /// See [`DocumentMetadata::authors`]
  pub authors:        Vec<Person>,
  /// See [`DocumentMetadata::date_modified`]
  pub date_modified:  Option<DateTime<Utc>>,
  /// See [`DocumentMetadata::identifier`]
  pub identifier:     Option<String>,
  /// See [`DocumentMetadata::abstract_text`]
  pub abstract_text:  Option<FormattedText>,
  /// See [`DocumentMetadata::version`]
  pub version:        Option<String>,
  /// See [`DocumentMetadata::repository_url`]
  pub repository_url: Option<String>,
  /// See [`DocumentMetadata::ci_url`]
  pub ci_url:         Option<String>,
  /// See [`DocumentMetadata::license_id`]
  pub license_id:     Option<String>,
  /// See [`DocumentMetadata::full_text`]
  pub full_text:      Option<String>,
}

impl MetadataBuilder {
  /// Freezes the collected fields.
  pub fn build(self) -> DocumentMetadata {
    DocumentMetadata {
      title:          self.title,
      authors:        self.authors,
      date_modified:  self.date_modified,
      identifier:     self.identifier,
      abstract_text:  self.abstract_text,
      version:        self.version,
      repository_url: self.repository_url,
      ci_url:         self.ci_url,
      license_id:     self.license_id,
      full_text:      self.full_text,
    }
  }
}

impl DocumentMetadata {
  /// Plain-text title, empty when the document has none.
  pub fn title(&self) -> &str { &self.title }

  /// Authors in source order.
  pub fn authors(&self) -> &[Person] { &self.authors }

  /// Last modification time, in UTC.
  pub fn date_modified(&self) -> Option<DateTime<Utc>> { self.date_modified }

  /// Document handle.
  pub fn identifier(&self) -> Option<&str> { self.identifier.as_deref() }

  /// Abstract in plain text and HTML.
  pub fn abstract_text(&self) -> Option<&FormattedText> { self.abstract_text.as_ref() }

  /// Version being built.
  pub fn version(&self) -> Option<&str> { self.version.as_deref() }

  /// Web URL of the document's repository.
  pub fn repository_url(&self) -> Option<&str> { self.repository_url.as_deref() }

  /// URL of the CI run that built the document.
  pub fn ci_url(&self) -> Option<&str> { self.ci_url.as_deref() }

  /// SPDX identifier of the repository's license.
  pub fn license_id(&self) -> Option<&str> { self.license_id.as_deref() }

  /// The full document rendered to plain text.
  pub fn full_text(&self) -> Option<&str> { self.full_text.as_deref() }
}

/// A default that was applied while extracting a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDefault {
  /// The field that fell back
  pub field:  Field,
  /// Why it fell back
  #[serde(flatten)]
  pub reason: Fallback,
}

impl Display for AppliedDefault {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.field, self.reason)
  }
}

/// The result of extracting a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
  /// The metadata record
  pub metadata: DocumentMetadata,
  /// Every default applied, in [`Field::ALL`] order
  pub defaults: Vec<AppliedDefault>,
}

impl Extraction {
  /// The reason `field` fell back to a default, if it did.
  pub fn default_for(&self, field: Field) -> Option<&Fallback> {
    self.defaults.iter().find(|applied| applied.field == field).map(|applied| &applied.reason)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_record() {
    let metadata = MetadataBuilder::default().build();
    assert_eq!(metadata.title(), "");
    assert!(metadata.authors().is_empty());
    assert_eq!(metadata.identifier(), None);
    assert_eq!(metadata.abstract_text(), None);
  }

  #[test]
  fn test_serialized_shape() {
    let metadata = MetadataBuilder {
      title: "When clouds might be good for LSST".into(),
      authors: vec![Person::new("A. Author")],
      identifier: Some("DMTN-131".into()),
      ..Default::default()
    }
    .build();
    let json = serde_json::to_value(&metadata).unwrap();
    assert_eq!(json["title"], "When clouds might be good for LSST");
    assert_eq!(json["authors"][0]["name"], "A. Author");
    assert_eq!(json["identifier"], "DMTN-131");
    assert!(json["license_id"].is_null());
  }

  #[test]
  fn test_applied_default_display_and_json() {
    let applied = AppliedDefault { field: Field::Identifier, reason: Fallback::missing("setDocRef") };
    assert_eq!(applied.to_string(), "identifier: no \\setDocRef command found");

    let json = serde_json::to_value(&applied).unwrap();
    assert_eq!(json["field"], "identifier");
    assert_eq!(json["reason"], "missing_command");
    assert_eq!(json["command"], "setDocRef");
  }
}
