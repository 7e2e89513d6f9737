//! One extractor per metadata field.
//!
//! The recognized commands form a closed set, modeled by [`Field`]. Each
//! variant owns the [`CommandSpec`] of its command; the extractor functions run
//! the shared matcher through [`Field::resolve`] (which applies the
//! last-occurrence-wins rule) and post-process the selected call.
//!
//! Every extractor strips `%` comments before matching, returns a
//! [`Resolved`] value and logs a warning when a default applies. None of them
//! fail.
//!
//! | Field        | Command                          | Default           |
//! |--------------|----------------------------------|-------------------|
//! | `Title`      | `\title[short_title]{long_title}`| `""`              |
//! | `Authors`    | `\author{authors}`               | no authors        |
//! | `Date`       | `\date{date}`                    | last commit time  |
//! | `Identifier` | `\setDocRef{handle}`             | `None`            |
//! | `Abstract`   | `\setDocAbstract{abstract}`      | `None`            |

use std::str::FromStr;

use super::*;
use crate::{
  command::{strip_comments, ArgumentSpec, CommandSpec, Occurrences, ParsedOccurrence},
  convert::{FormattedText, OutputFormat, TextConverter},
  metadata::Person,
  preamble,
  resolve::{select_last, Fallback, Resolved},
  vcs::VersionControl,
};

mod author;
mod date;

pub use self::{
  author::{authors, split_authors},
  date::{date_modified, noon_pacific, parse_date},
};

/// `\title[short_title]{long_title}`
const TITLE: CommandSpec = CommandSpec::new("title", &[
  ArgumentSpec::optional("short_title"),
  ArgumentSpec::required("long_title"),
]);

/// `\author{authors}`
const AUTHOR: CommandSpec = CommandSpec::new("author", &[ArgumentSpec::required("authors")]);

/// `\date{date}`
const DATE: CommandSpec = CommandSpec::new("date", &[ArgumentSpec::required("date")]);

/// `\setDocRef{handle}`
const DOC_REF: CommandSpec = CommandSpec::new("setDocRef", &[ArgumentSpec::required("handle")]);

/// `\setDocAbstract{abstract}`
const DOC_ABSTRACT: CommandSpec =
  CommandSpec::new("setDocAbstract", &[ArgumentSpec::required("abstract")]);

/// The metadata fields read from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
  /// Document title
  Title,
  /// Author list
  Authors,
  /// Modification date
  Date,
  /// Document handle, e.g. `DMTN-131`
  Identifier,
  /// Abstract
  Abstract,
}

impl Field {
  /// Every field, in the order the metadata record lists them.
  pub const ALL: [Field; 5] =
    [Field::Title, Field::Authors, Field::Date, Field::Identifier, Field::Abstract];

  /// The command this field is read from.
  pub fn command(self) -> &'static CommandSpec {
    match self {
      Field::Title => &TITLE,
      Field::Authors => &AUTHOR,
      Field::Date => &DATE,
      Field::Identifier => &DOC_REF,
      Field::Abstract => &DOC_ABSTRACT,
    }
  }

  /// The argument holding the field's value.
  pub const fn argument(self) -> &'static str {
    match self {
      Field::Title => "long_title",
      Field::Authors => "authors",
      Field::Date => "date",
      Field::Identifier => "handle",
      Field::Abstract => "abstract",
    }
  }

  /// The field's lowercase name.
  pub const fn as_str(self) -> &'static str {
    match self {
      Field::Title => "title",
      Field::Authors => "authors",
      Field::Date => "date",
      Field::Identifier => "identifier",
      Field::Abstract => "abstract",
    }
  }

  /// Every well-formed call of the field's command, in document order.
  pub fn occurrences(self, source: &str) -> Occurrences<'_> { self.command().occurrences(source) }

  /// The call that determines the field: the last one in the document.
  pub fn resolve(self, source: &str) -> Option<ParsedOccurrence<'_>> {
    select_last(self.occurrences(source))
  }

  /// The raw value argument of the resolved call.
  pub fn resolve_value(self, source: &str) -> Option<&str> {
    self.resolve(source).and_then(|occurrence| occurrence.get(self.argument()))
  }

  /// Logs the missing command and returns the matching [`Fallback`].
  fn missing_reason(self) -> Fallback {
    let reason = Fallback::missing(self.command().name);
    warn!("lsstdoc has no {}: {reason}", self.as_str());
    reason
  }

  /// Logs the missing command and applies `default`.
  fn missing<T>(self, default: T) -> Resolved<T> {
    Resolved::defaulted(default, self.missing_reason())
  }
}

impl Display for Field {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Field {
  type Err = LsstDocError;

  fn from_str(s: &str) -> Result<Self> {
    match &s.to_lowercase() as &str {
      "title" => Ok(Field::Title),
      "author" | "authors" => Ok(Field::Authors),
      "date" => Ok(Field::Date),
      "identifier" | "handle" => Ok(Field::Identifier),
      "abstract" => Ok(Field::Abstract),
      s => Err(LsstDocError::InvalidField(s.to_owned())),
    }
  }
}

/// Renders a fragment to inline plain text, keeping the raw LaTeX when the
/// converter fails.
fn render_plain(latex: &str, converter: &dyn TextConverter) -> Resolved<String> {
  match converter.convert(&preamble::with_macros(latex), OutputFormat::Plain, true) {
    Ok(text) => Resolved::Found(text),
    Err(e) => {
      warn!("Could not render {latex:?}, keeping the LaTeX source: {e}");
      Resolved::defaulted(latex.to_string(), Fallback::ConversionFailed { message: e.to_string() })
    },
  }
}

/// The document title, rendered to plain text.
pub fn title(source: &str, converter: &dyn TextConverter) -> Resolved<String> {
  let source = strip_comments(source);
  match Field::Title.resolve_value(&source) {
    Some(long_title) => render_plain(long_title.trim(), converter),
    None => Field::Title.missing(String::new()),
  }
}

/// The document handle, verbatim.
pub fn identifier(source: &str) -> Resolved<Option<String>> {
  let source = strip_comments(source);
  match Field::Identifier.resolve_value(&source) {
    Some(handle) => Resolved::Found(Some(handle.trim().to_string())),
    None => Field::Identifier.missing(None),
  }
}

/// The abstract, rendered to plain text and HTML.
pub fn abstract_text(
  source: &str,
  converter: &dyn TextConverter,
) -> Resolved<Option<FormattedText>> {
  let source = strip_comments(source);
  let Some(content) = Field::Abstract.resolve_value(&source) else {
    return Field::Abstract.missing(None);
  };

  let content = content.trim();
  match FormattedText::render(content, converter) {
    Ok(text) => Resolved::Found(Some(text)),
    Err(e) => {
      warn!("Could not render the abstract, keeping the LaTeX source: {e}");
      Resolved::defaulted(Some(FormattedText::raw(content)), Fallback::ConversionFailed {
        message: e.to_string(),
      })
    },
  }
}
