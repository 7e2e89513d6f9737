//! Author list extraction.

use super::*;

/// Splits the raw `\author` argument into one LaTeX fragment per author.
///
/// Newlines and `~` become spaces, the list is split on commas, and each part
/// is split again on a standalone `and`. Empty fragments are dropped and the
/// source order is kept.
pub fn split_authors(text: &str) -> Vec<String> {
  lazy_static! {
    static ref AND: Regex = Regex::new(r"(?:^|\s+)and(?:\s+|$)").unwrap();
  }

  let normalized = text.replace(['\n', '\r', '~'], " ");
  normalized
    .trim()
    .split(',')
    .flat_map(|part| AND.split(part))
    .map(str::trim)
    .filter(|fragment| !fragment.is_empty())
    .map(str::to_string)
    .collect()
}

/// The document authors, each name rendered to plain text.
///
/// A name the converter cannot render keeps its LaTeX source; the result then
/// reports [`Fallback::ConversionFailed`] for the first such failure.
pub fn authors(source: &str, converter: &dyn TextConverter) -> Resolved<Vec<Person>> {
  let source = strip_comments(source);
  let Some(text) = Field::Authors.resolve_value(&source) else {
    return Field::Authors.missing(Vec::new());
  };

  let mut failure = None;
  let people: Vec<Person> = split_authors(text)
    .iter()
    .map(|fragment| {
      let (name, reason) = render_plain(fragment, converter).into_parts();
      if failure.is_none() {
        failure = reason;
      }
      Person::new(name)
    })
    .collect();

  match failure {
    None => Resolved::Found(people),
    Some(reason) => Resolved::defaulted(people, reason),
  }
}
