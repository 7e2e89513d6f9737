//! Balanced-span scanning and argument decoding.

use super::*;

/// Opening delimiter of a command argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delimiter {
  /// `{...}`, used by required arguments
  Brace,
  /// `[...]`, used by optional arguments
  Bracket,
}

impl Delimiter {
  /// The opening byte of this delimiter.
  pub const fn open(self) -> u8 {
    match self {
      Delimiter::Brace => b'{',
      Delimiter::Bracket => b'[',
    }
  }

  /// The matching closing byte of this delimiter.
  pub const fn close(self) -> u8 {
    match self {
      Delimiter::Brace => b'}',
      Delimiter::Bracket => b']',
    }
  }
}

impl Display for Delimiter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Delimiter::Brace => write!(f, "{{"),
      Delimiter::Bracket => write!(f, "["),
    }
  }
}

/// Finds the balanced span opening at `start`.
///
/// `start` must index an opening `delimiter`. Only delimiters of the same kind
/// change the depth, and a delimiter preceded by an odd run of backslashes is
/// escaped. Returns the range covering both outer delimiters, or `None` when
/// the text ends before the depth returns to zero.
pub(crate) fn balanced(source: &str, start: usize, delimiter: Delimiter) -> Option<Range<usize>> {
  let bytes = source.as_bytes();
  debug_assert_eq!(bytes.get(start), Some(&delimiter.open()));

  let mut depth = 0usize;
  let mut backslashes = 0usize;
  for (offset, &byte) in bytes[start..].iter().enumerate() {
    let escaped = backslashes % 2 == 1;
    if byte == b'\\' {
      backslashes += 1;
      continue;
    }
    backslashes = 0;
    if escaped {
      continue;
    }

    if byte == delimiter.open() {
      depth += 1;
    } else if byte == delimiter.close() {
      depth -= 1;
      if depth == 0 {
        return Some(start..start + offset + 1);
      }
    }
  }

  None
}

/// Returns the raw text between the outer delimiters of a matched span.
///
/// Nothing is trimmed or unescaped; that is left to each field's extractor.
pub fn decode<'s>(source: &'s str, span: &Range<usize>) -> &'s str {
  &source[span.start + 1..span.end - 1]
}
