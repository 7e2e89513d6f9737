//! Metadata extraction for LaTeX documents written with the `lsstdoc` class.
//!
//! `lsstdoc` reads the source of a technical note and pulls out its
//! bibliographic metadata:
//!
//! - Title, from `\title[short]{long}`
//! - Authors, from `\author{...}`
//! - Modification date, from `\date{...}` or the repository history
//! - Document handle, from `\setDocRef{...}`
//! - Abstract, from `\setDocAbstract{...}`
//!
//! # Features
//!
//! - **Command matching**: locate every occurrence of a named command together with its optional
//!   `[...]` and required `{...}` arguments, honoring nested and escaped delimiters
//! - **Comment aware**: `%` comments are stripped before matching, keeping escaped `\%`
//! - **Last occurrence wins**: later redefinitions override earlier placeholder values
//! - **Explicit defaults**: every field reports whether it was found or which default applied
//! - **Pluggable collaborators**: text conversion, version-control timestamps and license lookups
//!   sit behind traits, with `pandoc`, `git` and GitHub implementations provided
//!
//! # Getting Started
//!
//! ```no_run
//! use lsstdoc::{config::Config, parser::MetadataParser};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let source = std::fs::read_to_string("DMTN-131.tex")?;
//!   let parser = MetadataParser::from_config(&Config::default())?;
//!
//!   let extraction = parser.extract(&source).await;
//!   println!("Title: {}", extraction.metadata.title());
//!   for default in &extraction.defaults {
//!     println!("{default}");
//!   }
//!   Ok(())
//! }
//! ```
//!
//! Matching a command directly:
//!
//! ```
//! use lsstdoc::command::{ArgumentSpec, CommandSpec};
//!
//! const TITLE: CommandSpec = CommandSpec::new("title", &[
//!   ArgumentSpec::optional("short_title"),
//!   ArgumentSpec::required("long_title"),
//! ]);
//!
//! let source = r"\title[Clouds]{When clouds might be {good}}";
//! let occurrence = TITLE.occurrences(source).next().unwrap();
//! assert_eq!(occurrence.get("short_title"), Some("Clouds"));
//! assert_eq!(occurrence.get("long_title"), Some("When clouds might be {good}"));
//! ```
//!
//! # Module Organization
//!
//! - [`command`]: Comment stripping, command matching and argument decoding
//! - [`resolve`]: Last-occurrence-wins selection and the [`Resolved`](resolve::Resolved) type
//! - [`extract`]: One extractor per metadata field
//! - [`metadata`]: The assembled [`DocumentMetadata`](metadata::DocumentMetadata) record
//! - [`parser`]: Assembly of all fields with the collaborators
//! - [`convert`], [`vcs`], [`license`], [`ci`]: Collaborators
//! - [`config`]: Configuration loading
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::BTreeMap,
  fmt::Display,
  ops::Range,
  path::{Path, PathBuf},
  process::{Command, Stdio},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod ci;
pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod license;
pub mod metadata;
pub mod parser;
pub mod preamble;
pub mod resolve;
pub mod vcs;

use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use lsstdoc::prelude::*;
///
/// fn render(converter: &dyn TextConverter, latex: &str) -> Result<String, LsstDocError> {
///   converter.convert(latex, OutputFormat::Plain, true)
/// }
/// ```
pub mod prelude {
  pub use crate::{
    convert::{OutputFormat, TextConverter},
    error::LsstDocError,
    license::LicenseLookup,
    resolve::{Fallback, Resolved},
    vcs::VersionControl,
  };
}
