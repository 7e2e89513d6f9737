//! Rendering LaTeX fragments to plain text and HTML.
//!
//! Conversion is delegated to a [`TextConverter`]. The provided [`Pandoc`]
//! implementation pipes the fragment through the `pandoc` executable.
//!
//! # Examples
//!
//! ```no_run
//! use lsstdoc::convert::{FormattedText, OutputFormat, Pandoc, TextConverter};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pandoc = Pandoc::new("pandoc");
//! let plain = pandoc.convert(r"St\'{e}phane", OutputFormat::Plain, true)?;
//! assert_eq!(plain, "Stéphane");
//!
//! let abstract_text = FormattedText::render(r"A \emph{short} abstract.", &pandoc)?;
//! println!("{}", abstract_text.html);
//! # Ok(())
//! # }
//! ```

use std::io::Write;

use super::*;

/// Target format of a conversion. The source format is always LaTeX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  /// Plain text with markup removed
  Plain,
  /// An HTML fragment
  Html,
}

impl OutputFormat {
  /// The format's name as understood by `pandoc --to`.
  pub fn as_str(&self) -> &'static str {
    match self {
      OutputFormat::Plain => "plain",
      OutputFormat::Html => "html",
    }
  }
}

impl Display for OutputFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Converts LaTeX markup to another text format.
pub trait TextConverter: Send + Sync {
  /// Converts `content` to `format`.
  ///
  /// With `strip_paragraph` set, a single paragraph wrapper around the
  /// output (`<p>...</p>` for HTML, surrounding blank lines for plain text)
  /// is removed so the result can be embedded inline.
  fn convert(&self, content: &str, format: OutputFormat, strip_paragraph: bool) -> Result<String>;
}

/// A [`TextConverter`] backed by the `pandoc` executable.
#[derive(Debug, Clone)]
pub struct Pandoc {
  /// Path to, or name of, the executable
  program: PathBuf,
}

impl Pandoc {
  /// Uses `program` as the `pandoc` executable.
  pub fn new(program: impl AsRef<Path>) -> Self { Self { program: program.as_ref().to_path_buf() } }
}

impl Default for Pandoc {
  fn default() -> Self { Self::new("pandoc") }
}

impl TextConverter for Pandoc {
  fn convert(&self, content: &str, format: OutputFormat, strip_paragraph: bool) -> Result<String> {
    trace!("Converting {} bytes of LaTeX to {format}", content.len());
    let mut child = Command::new(&self.program)
      .args(["--from", "latex", "--to", format.as_str(), "--wrap", "none"])
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()?;

    // Always reap the child, even when it stopped reading early.
    let written = match child.stdin.take() {
      Some(mut stdin) => stdin.write_all(content.as_bytes()),
      None => Ok(()),
    };
    let output = child.wait_with_output()?;

    if !output.status.success() {
      return Err(LsstDocError::Conversion(format!(
        "{} exited with {}: {}",
        self.program.display(),
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
      )));
    }

    written?;

    let text = String::from_utf8(output.stdout)
      .map_err(|e| LsstDocError::Conversion(format!("output is not UTF-8: {e}")))?;
    Ok(if strip_paragraph { strip_paragraph_wrapper(&text, format) } else { text })
  }
}

/// Removes the paragraph wrapper `pandoc` puts around a single paragraph.
pub fn strip_paragraph_wrapper(text: &str, format: OutputFormat) -> String {
  let text = text.trim();
  match format {
    OutputFormat::Plain => text.to_string(),
    OutputFormat::Html => text
      .strip_prefix("<p>")
      .and_then(|rest| rest.strip_suffix("</p>"))
      .filter(|inner| !inner.contains("<p>"))
      .unwrap_or(text)
      .to_string(),
  }
}

/// A piece of text available both as plain text and as HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedText {
  /// The LaTeX the renderings were produced from
  pub source: String,
  /// Plain-text rendering
  pub plain:  String,
  /// HTML rendering
  pub html:   String,
}

impl FormattedText {
  /// Renders `latex` with the `lsstdoc` macros prepended.
  pub fn render(latex: &str, converter: &dyn TextConverter) -> Result<Self> {
    let source = preamble::with_macros(latex);
    Ok(Self {
      source: latex.to_string(),
      plain:  converter.convert(&source, OutputFormat::Plain, false)?.trim().to_string(),
      html:   converter.convert(&source, OutputFormat::Html, false)?.trim().to_string(),
    })
  }

  /// Uses `latex` unchanged for both renderings.
  pub fn raw(latex: &str) -> Self {
    Self { source: latex.to_string(), plain: latex.to_string(), html: latex.to_string() }
  }
}
