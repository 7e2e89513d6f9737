//! Resolution policy shared by every extractor.
//!
//! When a command is repeated, the last occurrence in document order wins: the
//! `lsstdoc` templates ship placeholder values that authors override further
//! down the file. When a command is absent (or its content is unusable) the
//! field's documented default applies, and the extractor reports why through
//! [`Resolved::Defaulted`].

use super::*;

/// Selects the last element of a sequence.
///
/// This is the single place the last-occurrence-wins rule lives.
pub fn select_last<I: IntoIterator>(items: I) -> Option<I::Item> { items.into_iter().last() }

/// Why a field fell back to its default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Fallback {
  /// The command never occurred in a well-formed call.
  MissingCommand {
    /// Name of the command that was looked for
    command: String,
  },
  /// `\date{\today}` was given, so no explicit date exists.
  Today,
  /// The date argument is not a `YYYY-MM-DD` calendar date.
  InvalidDate {
    /// The trimmed argument text
    raw: String,
  },
  /// The text converter failed, so the raw LaTeX was kept.
  ConversionFailed {
    /// The converter's error message
    message: String,
  },
}

impl Fallback {
  /// A [`Fallback::MissingCommand`] for `command`.
  pub fn missing(command: &str) -> Self { Self::MissingCommand { command: command.to_string() } }
}

impl Display for Fallback {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Fallback::MissingCommand { command } => write!(f, "no \\{command} command found"),
      Fallback::Today => write!(f, "date is \\today"),
      Fallback::InvalidDate { raw } => write!(f, "could not parse date {raw:?} as YYYY-MM-DD"),
      Fallback::ConversionFailed { message } => write!(f, "text conversion failed: {message}"),
    }
  }
}

/// The outcome of extracting one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
  /// The field was read from the document.
  Found(T),
  /// A default was applied.
  Defaulted {
    /// The default (or fallback) value
    value:  T,
    /// Why the default was applied
    reason: Fallback,
  },
}

impl<T> Resolved<T> {
  /// Builds a [`Resolved::Defaulted`].
  pub fn defaulted(value: T, reason: Fallback) -> Self { Self::Defaulted { value, reason } }

  /// The resolved value, whichever way it was obtained.
  pub fn value(&self) -> &T {
    match self {
      Resolved::Found(value) | Resolved::Defaulted { value, .. } => value,
    }
  }

  /// Consumes the result, returning the value.
  pub fn into_value(self) -> T {
    match self {
      Resolved::Found(value) | Resolved::Defaulted { value, .. } => value,
    }
  }

  /// The reason a default was applied, if one was.
  pub fn reason(&self) -> Option<&Fallback> {
    match self {
      Resolved::Found(_) => None,
      Resolved::Defaulted { reason, .. } => Some(reason),
    }
  }

  /// Whether the value came from the document.
  pub fn is_found(&self) -> bool { matches!(self, Resolved::Found(_)) }

  /// Splits into the value and the reason a default was applied, if any.
  pub fn into_parts(self) -> (T, Option<Fallback>) {
    match self {
      Resolved::Found(value) => (value, None),
      Resolved::Defaulted { value, reason } => (value, Some(reason)),
    }
  }

  /// Maps the value, keeping the reason.
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
    match self {
      Resolved::Found(value) => Resolved::Found(f(value)),
      Resolved::Defaulted { value, reason } => Resolved::Defaulted { value: f(value), reason },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_select_last() {
    assert_eq!(select_last(vec![1, 2, 3]), Some(3));
    assert_eq!(select_last(Vec::<u8>::new()), None);
    assert_eq!(select_last("a b c".split(' ')), Some("c"));
  }

  #[test]
  fn test_resolved_accessors() {
    let found = Resolved::Found("title");
    assert!(found.is_found());
    assert_eq!(found.reason(), None);
    assert_eq!(*found.value(), "title");

    let defaulted = Resolved::defaulted("", Fallback::missing("title"));
    assert!(!defaulted.is_found());
    assert_eq!(defaulted.reason(), Some(&Fallback::MissingCommand { command: "title".into() }));
    assert_eq!(defaulted.map(str::len).into_parts(), (0, Some(Fallback::missing("title"))));
  }

  #[test]
  fn test_fallback_display() {
    assert_eq!(Fallback::missing("setDocRef").to_string(), "no \\setDocRef command found");
    assert_eq!(
      Fallback::InvalidDate { raw: "May 2020".into() }.to_string(),
      "could not parse date \"May 2020\" as YYYY-MM-DD"
    );
  }
}
