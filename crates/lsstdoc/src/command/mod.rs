//! Locating LaTeX commands and splitting them into their arguments.
//!
//! A [`CommandSpec`] declares what one call of a command looks like: its name
//! and the ordered optional `[...]` and required `{...}` arguments that follow
//! it. [`CommandSpec::occurrences`] scans a source buffer in a single forward
//! pass and lazily yields one [`ParsedOccurrence`] per well-formed call.
//!
//! The matcher sees the source exactly as given; run [`strip_comments`] first
//! to ignore commented-out calls.
//!
//! Matching never fails. A command that is absent simply produces no
//! occurrences, and a call whose arguments are malformed (a missing required
//! argument, or a delimiter that never closes) is skipped while scanning
//! continues after its command token.
//!
//! # Examples
//!
//! ```
//! use lsstdoc::command::{ArgumentSpec, CommandSpec};
//!
//! const AUTHOR: CommandSpec = CommandSpec::new("author", &[ArgumentSpec::required("authors")]);
//!
//! let source = r"\author{Placeholder} \authorlist{ignored} \author{A.~Author}";
//! let found: Vec<_> = AUTHOR.occurrences(source).filter_map(|o| o.get("authors")).collect();
//! assert_eq!(found, ["Placeholder", "A.~Author"]);
//! ```

use super::*;

pub mod comment;
pub mod span;

pub use self::{
  comment::strip_comments,
  span::{decode, Delimiter},
};

/// One declared argument of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArgumentSpec {
  /// Key under which the argument's text is stored in a [`ParsedOccurrence`]
  pub name:      &'static str,
  /// Whether the call is discarded when this argument is missing
  pub required:  bool,
  /// Opening delimiter of the argument
  pub delimiter: Delimiter,
}

impl ArgumentSpec {
  /// A required `{...}` argument.
  pub const fn required(name: &'static str) -> Self {
    Self { name, required: true, delimiter: Delimiter::Brace }
  }

  /// An optional `[...]` argument.
  pub const fn optional(name: &'static str) -> Self {
    Self { name, required: false, delimiter: Delimiter::Bracket }
  }
}

/// Declaration of a command and the arguments that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
  /// Command name without the leading backslash
  pub name:      &'static str,
  /// Arguments in the order they must appear after the command token
  pub arguments: &'static [ArgumentSpec],
}

impl CommandSpec {
  /// Declares a command. Usable in `const` position.
  pub const fn new(name: &'static str, arguments: &'static [ArgumentSpec]) -> Self {
    Self { name, arguments }
  }

  /// Lazily yields every well-formed call of this command in `source`, in
  /// document order.
  pub fn occurrences<'s>(&self, source: &'s str) -> Occurrences<'s> {
    Occurrences { spec: *self, source, token: format!("\\{}", self.name), cursor: 0 }
  }
}

/// A single call of a command found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOccurrence<'s> {
  /// Byte range from the command's backslash to the end of its last argument
  pub span:  Range<usize>,
  /// Raw inner text of each argument that was present
  arguments: BTreeMap<&'static str, &'s str>,
}

impl<'s> ParsedOccurrence<'s> {
  /// The raw text of the argument called `name`, if it was present.
  pub fn get(&self, name: &str) -> Option<&'s str> { self.arguments.get(name).copied() }

  /// Whether the argument called `name` was present.
  pub fn contains(&self, name: &str) -> bool { self.arguments.contains_key(name) }

  /// Iterates over the present arguments as `(name, text)` pairs.
  pub fn arguments(&self) -> impl Iterator<Item = (&'static str, &'s str)> + '_ {
    self.arguments.iter().map(|(name, text)| (*name, *text))
  }
}

/// Iterator over the occurrences of a command, see [`CommandSpec::occurrences`].
#[derive(Debug, Clone)]
pub struct Occurrences<'s> {
  /// The command being matched
  spec:   CommandSpec,
  /// Text being scanned
  source: &'s str,
  /// `\` followed by the command name
  token:  String,
  /// Byte offset where the next search starts
  cursor: usize,
}

impl<'s> Occurrences<'s> {
  /// Finds the next command token at or after the cursor whose name is not a
  /// prefix of a longer command name. Returns its start offset.
  fn next_token(&mut self) -> Option<usize> {
    while self.cursor < self.source.len() {
      let start = self.cursor + self.source[self.cursor..].find(&self.token)?;
      let end = start + self.token.len();
      self.cursor = end;

      match self.source.as_bytes().get(end) {
        Some(next) if next.is_ascii_alphabetic() => continue,
        _ => return Some(start),
      }
    }
    None
  }

  /// Matches the declared arguments after a command token ending at `after`.
  ///
  /// Returns the argument map and the offset just past the last consumed
  /// argument, or `None` when the call is malformed.
  fn match_arguments(&self, after: usize) -> Option<(BTreeMap<&'static str, &'s str>, usize)> {
    let bytes = self.source.as_bytes();
    let mut arguments = BTreeMap::new();
    let mut position = after;

    for argument in self.spec.arguments {
      let mut next = position;
      while bytes.get(next).is_some_and(u8::is_ascii_whitespace) {
        next += 1;
      }

      if bytes.get(next) != Some(&argument.delimiter.open()) {
        if argument.required {
          trace!("\\{} is missing its required `{}` argument", self.spec.name, argument.name);
          return None;
        }
        continue;
      }

      let Some(span) = span::balanced(self.source, next, argument.delimiter) else {
        debug!(
          "\\{} has an unterminated `{}` argument at byte {next}",
          self.spec.name, argument.name
        );
        return None;
      };
      arguments.insert(argument.name, decode(self.source, &span));
      position = span.end;
    }

    Some((arguments, position))
  }
}

impl<'s> Iterator for Occurrences<'s> {
  type Item = ParsedOccurrence<'s>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let start = self.next_token()?;
      if let Some((arguments, end)) = self.match_arguments(self.cursor) {
        self.cursor = end;
        return Some(ParsedOccurrence { span: start..end, arguments });
      }
    }
  }
}
