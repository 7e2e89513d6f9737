//! Macro definitions prepended to LaTeX fragments before conversion.
//!
//! Extracted fragments routinely use the `lsstdoc` class macros (`\LSST`,
//! `\DM`, ...). The converter knows nothing about the class, so each fragment
//! is rendered with these definitions in front of it.

/// Redefinitions of the `lsstdoc` macros in terms the converter understands.
pub const LSSTDOC_MACROS: &str = r"\providecommand{\tightlist}{\setlength{\itemsep}{0pt}\setlength{\parskip}{0pt}}
\providecommand{\xspace}{}
\providecommand{\LSST}{LSST}
\providecommand{\Rubin}{Rubin}
\providecommand{\RubinObs}{Rubin Observatory}
\providecommand{\DM}{Data Management}
\providecommand{\DMS}{Data Management System}
\providecommand{\SQuaRE}{SQuaRE}
\providecommand{\Butler}{Butler}
\providecommand{\SciPlat}{Science Platform}
\providecommand{\project}{Rubin Observatory}
\providecommand{\product}[1]{\emph{#1}}
\providecommand{\docRef}{}
\providecommand{\setDocRef}[1]{}
\providecommand{\setDocAbstract}[1]{}
\providecommand{\setDocChangeRecord}[1]{}
\providecommand{\setDocCompact}[1]{}
\providecommand{\setDocCurator}[1]{}
\providecommand{\setDocUpstreamLocation}[1]{}
\providecommand{\setDocUpstreamVersion}[1]{}
\providecommand{\addtohist}[4]{}
\providecommand{\citeds}[2][]{\texttt{#2}}
\providecommand{\citedsp}[2][]{(\texttt{#2})}
\providecommand{\jira}[1]{#1}
\providecommand{\ghrepo}[1]{#1}
\providecommand{\ticket}[1]{#1}
";

/// Returns `fragment` with [`LSSTDOC_MACROS`] in front of it.
pub fn with_macros(fragment: &str) -> String {
  let mut source = String::with_capacity(LSSTDOC_MACROS.len() + fragment.len() + 1);
  source.push_str(LSSTDOC_MACROS);
  source.push('\n');
  source.push_str(fragment);
  source
}
