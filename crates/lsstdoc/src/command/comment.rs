//! Removal of `%` comments.

use std::borrow::Cow;

use super::*;

/// Strips every `%` comment from `source`.
///
/// A comment runs from an unescaped `%` up to and including the line break,
/// so `\author{%` followed by a name on the next line reads as
/// `\author{name`. A `%` preceded by an odd run of backslashes is a literal
/// percent sign and is kept. Sources without comments are borrowed as-is.
///
/// # Examples
///
/// ```
/// use lsstdoc::command::strip_comments;
///
/// let source = "\\setDocRef{DMTN-131}\n% \\setDocRef{DMTN-000}\n5\\% of the budget";
/// assert_eq!(strip_comments(source), "\\setDocRef{DMTN-131}\n5\\% of the budget");
/// ```
pub fn strip_comments(source: &str) -> Cow<'_, str> {
  if !source.split_inclusive('\n').any(|line| comment_start(line).is_some()) {
    return Cow::Borrowed(source);
  }

  let mut stripped = String::with_capacity(source.len());
  for line in source.split_inclusive('\n') {
    match comment_start(line) {
      Some(start) => stripped.push_str(&line[..start]),
      None => stripped.push_str(line),
    }
  }
  trace!("Stripped {} bytes of comments", source.len() - stripped.len());
  Cow::Owned(stripped)
}

/// Byte offset of the first unescaped `%` in `line`.
fn comment_start(line: &str) -> Option<usize> {
  let mut backslashes = 0usize;
  for (index, byte) in line.bytes().enumerate() {
    match byte {
      b'\\' => backslashes += 1,
      b'%' if backslashes % 2 == 0 => return Some(index),
      _ => backslashes = 0,
    }
  }
  None
}
