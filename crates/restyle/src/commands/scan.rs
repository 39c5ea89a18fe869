//! `restyle scan`: list every declaration with its resolved rule.
//!
//! Also home to [`ScanOptions`], which every command that reads a file
//! shares.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use restyle_scan::{tokenize, Declaration, RuleResolver, Span};
use tracing::debug;

use super::{read_file, CommandError, LoadedRules, Output};

/// How `scan` prints declarations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One aligned line per declaration.
    #[default]
    Text,
    /// Tab-separated, with a header row; columns follow the host protocol.
    Tsv,
}

impl OutputFormat {
    /// Parse from command line string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(OutputFormat::Text),
            "tsv" => Some(OutputFormat::Tsv),
            _ => None,
        }
    }
}

/// Options shared by the file commands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Rule table asset to load instead of the bundled rules (`--rules=`).
    pub rules: Option<PathBuf>,
    /// `--format=`; `None` means text.
    pub format: Option<OutputFormat>,
    /// Output file (`-o`); stdout when `None`.
    pub output: Option<PathBuf>,
    /// Where `rewrite` writes children declarations (`--children=`).
    pub children: Option<PathBuf>,
}

impl ScanOptions {
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Merge another set of options into this one; set fields in `other`
    /// win.
    pub fn merge(&mut self, other: &Self) {
        if other.rules.is_some() {
            self.rules.clone_from(&other.rules);
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.output.is_some() {
            self.output.clone_from(&other.output);
        }
        if other.children.is_some() {
            self.children.clone_from(&other.children);
        }
    }
}

/// Parse command-line flags into [`ScanOptions`].
///
/// Positional arguments and `-o <path>` (which needs lookahead) are handled
/// by the caller; unknown flags are reported and ignored.
pub fn parse_scan_options(args: &[String]) -> ScanOptions {
    let mut options = ScanOptions::default();

    for arg in args {
        if let Some(path) = arg.strip_prefix("--rules=") {
            options.rules = Some(PathBuf::from(path));
        } else if let Some(format) = arg.strip_prefix("--format=") {
            if let Some(format) = OutputFormat::from_str(format) {
                options.format = Some(format);
            } else {
                eprintln!("warning: unknown format '{format}', using text");
            }
        } else if let Some(output) = arg.strip_prefix("-o=") {
            options.output = Some(PathBuf::from(output));
        } else if let Some(output) = arg.strip_prefix("--output=") {
            options.output = Some(PathBuf::from(output));
        } else if let Some(children) = arg.strip_prefix("--children=") {
            options.children = Some(PathBuf::from(children));
        } else {
            eprintln!("warning: unknown option '{arg}'");
        }
    }

    options
}

/// Scan a file and report its declarations.
pub fn scan_file(path: &Path, options: &ScanOptions) -> Result<(), CommandError> {
    let content = read_file(path)?;
    let source: Vec<u16> = content.encode_utf16().collect();
    let rules = LoadedRules::load(options.rules.as_deref())?;

    Output::open(options.output.as_deref())?.write_with(|out| {
        write_declarations(&source, rules.resolver(), options.format(), out)
    })
}

/// Scan `source` and write one record per declaration to `out`.
pub fn write_declarations(
    source: &[u16],
    resolver: RuleResolver<'_>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> io::Result<()> {
    let mut declarations = Vec::new();
    tokenize(source, resolver, &mut |declaration: Declaration| {
        declarations.push(declaration);
    });
    debug!(count = declarations.len(), "scanned declarations");

    if format == OutputFormat::Tsv {
        writeln!(
            out,
            "start\tend\trule_id\tsemicolon_end\tis_important\tname\tvalue"
        )?;
    }

    for declaration in &declarations {
        let name = text(source, declaration.name);
        let value = text(source, declaration.value);
        match format {
            OutputFormat::Text => {
                let important = if declaration.is_important {
                    " !important"
                } else {
                    ""
                };
                let range = Span::new(declaration.name.start, declaration.semicolon_end);
                writeln!(
                    out,
                    "{:<12} {name}: {value}{important}  {}",
                    range.to_string(),
                    declaration.outcome,
                )?;
            }
            OutputFormat::Tsv => {
                let span = declaration.full_span();
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    span.start,
                    span.end,
                    declaration.outcome.id(),
                    declaration.semicolon_end,
                    u8::from(declaration.is_important),
                    escape_tsv(&name),
                    escape_tsv(&value),
                )?;
            }
        }
    }

    Ok(())
}

fn text(source: &[u16], span: Span) -> String {
    String::from_utf16_lossy(span.slice(source))
}

/// Keep one record per line.
fn escape_tsv(field: &str) -> String {
    field
        .replace('\\', "\\\\")
        .replace('\t', "\\t")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
