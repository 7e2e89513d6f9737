//! The `occurrences` command: inspect the matcher without any collaborators.
//!
//! Comments are stripped first, as during extraction, so byte offsets refer to
//! the uncommented source unless `--keep-comments` is given.

use lsstdoc::{command::strip_comments, extract::Field};

use super::*;

/// Options for [`Commands::Occurrences`].
#[derive(Args, Clone)]
pub struct OccurrencesOptions {
  /// The LaTeX source of the document
  pub path: PathBuf,

  /// The field to look for (title, authors, date, identifier, abstract)
  pub field: Field,

  /// Also list calls inside `%` comments. Byte offsets then refer to the file as written.
  #[arg(long)]
  pub keep_comments: bool,
}

/// Function for the [`Commands::Occurrences`] in the CLI.
pub async fn occurrences(options: OccurrencesOptions) -> Result<()> {
  let OccurrencesOptions { path, field, keep_comments } = options;
  let source = read_document(&path).await?;
  let source = if keep_comments { source } else { strip_comments(&source).into_owned() };

  let found: Vec<_> = field.occurrences(&source).collect();
  let command = field.command().name;
  if found.is_empty() {
    println!("{} No \\{command} command in {}", style(WARNING_PREFIX).yellow(), path.display());
    return Ok(());
  }

  println!(
    "{} {} \\{command} command(s) in {}",
    style(INFO_PREFIX).cyan(),
    found.len(),
    style(path.display()).yellow()
  );
  let last = found.len() - 1;
  for (index, occurrence) in found.iter().enumerate() {
    let (branch, continuation) =
      if index == last { (TREE_LEAF, "   ") } else { (TREE_BRANCH, CONTINUE_PREFIX) };
    let selected = if index == last { style(" (selected)").green().bold() } else { style("") };
    println!(
      "{} #{} at bytes {}..{}{selected}",
      style(branch).dim(),
      index + 1,
      occurrence.span.start,
      occurrence.span.end,
    );
    for (name, value) in occurrence.arguments() {
      println!("{}{}: {:?}", style(continuation).dim(), style(name).green().bold(), value);
    }
  }
  Ok(())
}
