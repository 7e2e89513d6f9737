//! The `metadata` command: full extraction with the configured collaborators.

use lsstdoc::{ci::CiEnvironment, parser::MetadataParser};

use super::*;

/// Options for [`Commands::Metadata`].
#[derive(Args, Clone)]
pub struct MetadataOptions {
  /// The LaTeX source of the document
  pub path: PathBuf,

  /// Directory inside the document's git repository. Defaults to the configured root, or the
  /// document's directory.
  #[arg(long)]
  pub root: Option<PathBuf>,

  /// Ignore the GitHub Actions environment (no version, URLs or license lookup)
  #[arg(long)]
  pub no_ci: bool,
}

/// Function for the [`Commands::Metadata`] in the CLI.
pub async fn metadata(config: Config, options: MetadataOptions) -> Result<()> {
  let MetadataOptions { path, root, no_ci } = options;
  let source = read_document(&path).await?;

  let root = root.or_else(|| {
    (config.repository_root == Config::default().repository_root)
      .then(|| path.parent().filter(|dir| !dir.as_os_str().is_empty()).map(Path::to_path_buf))
      .flatten()
  });
  let config = match root {
    Some(root) => config.with_repository_root(root),
    None => config,
  };
  trace!("Dating the document from {}", config.repository_root.display());

  let ci = if no_ci { CiEnvironment::default() } else { CiEnvironment::from_env() };
  let parser = MetadataParser::from_config(&config)?.with_ci(ci);
  let extraction = parser.extract(&source).await;

  for applied in &extraction.defaults {
    eprintln!("{} {}", style(WARNING_PREFIX).yellow(), style(applied).yellow());
  }
  if extraction.defaults.is_empty() {
    eprintln!("{} Every field found in {}", style(INFO_PREFIX).cyan(), style(path.display()).yellow());
  }

  println!("{}", serde_json::to_string_pretty(&extraction.metadata)?);
  Ok(())
}
