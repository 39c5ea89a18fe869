//! Command handlers for the restyle CLI.
//!
//! Each submodule implements one command. Shared plumbing (reading inputs,
//! opening the output sink, loading a rule table) lives here in the module
//! root. Handlers return [`CommandError`]; the binary prints it and exits 1.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use restyle_rules::{BuildError, RuleResolver, RuleTable, TableError};
use thiserror::Error;
use tracing::debug;

use crate::rules::RuleSet;

mod build_rules;
mod rewrite;
pub mod scan;
mod tokens;

pub use build_rules::build_rules;
pub use rewrite::rewrite_file;
pub use scan::{parse_scan_options, scan_file, write_declarations, OutputFormat, ScanOptions};
pub use tokens::{dump_tokens, write_tokens};

/// Why a command failed.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("cannot find file '{}'", .path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied reading '{}'", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("'{}' contains invalid UTF-8 data", .path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("error reading '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid rule table '{}': {source}", .path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("cannot build rule set: {0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Usage(&'static str),
}

fn read_error(path: &Path, err: io::Error) -> CommandError {
    let path = path.to_path_buf();
    match err.kind() {
        io::ErrorKind::NotFound => CommandError::NotFound { path },
        io::ErrorKind::PermissionDenied => CommandError::PermissionDenied { path },
        io::ErrorKind::InvalidData => CommandError::InvalidUtf8 { path },
        _ => CommandError::Read { path, source: err },
    }
}

/// Read a source file as text.
pub(crate) fn read_file(path: &Path) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|err| read_error(path, err))
}

/// Read a binary asset.
pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>, CommandError> {
    std::fs::read(path).map_err(|err| read_error(path, err))
}

/// The rules a command scans against.
#[derive(Debug)]
pub(crate) enum LoadedRules {
    Bundled(RuleSet),
    /// A validated asset loaded with `--rules`. There is no side table, so
    /// only ids are known.
    Asset(Vec<u8>),
}

impl LoadedRules {
    /// The asset at `path`, or the bundled rule set when `None`.
    ///
    /// Unlike the host boundary, which scans with no rules when handed a bad
    /// table, the CLI rejects it.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, CommandError> {
        let Some(path) = path else {
            return Ok(LoadedRules::Bundled(RuleSet::bundled()?));
        };
        let bytes = read_bytes(path)?;
        RuleTable::parse(&bytes).map_err(|source| CommandError::Table {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "loaded rule table");
        Ok(LoadedRules::Asset(bytes))
    }

    pub(crate) fn resolver(&self) -> RuleResolver<'_> {
        match self {
            LoadedRules::Bundled(rules) => rules.resolver(),
            LoadedRules::Asset(bytes) => RuleResolver::from_bytes(bytes),
        }
    }
}

/// Where a command writes its report.
pub(crate) struct Output {
    path: PathBuf,
    sink: Box<dyn Write>,
}

impl Output {
    /// `path`, or stdout when `None`.
    pub(crate) fn open(path: Option<&Path>) -> Result<Self, CommandError> {
        match path {
            Some(path) => {
                let file = File::create(path).map_err(|source| CommandError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(Self {
                    path: path.to_path_buf(),
                    sink: Box::new(BufWriter::new(file)),
                })
            }
            None => Ok(Self {
                path: PathBuf::from("<stdout>"),
                sink: Box::new(io::stdout().lock()),
            }),
        }
    }

    /// Run `write` against the sink and flush, tagging failures with the
    /// output path.
    pub(crate) fn write_with(
        mut self,
        write: impl FnOnce(&mut dyn Write) -> io::Result<()>,
    ) -> Result<(), CommandError> {
        write(&mut *self.sink)
            .and_then(|()| self.sink.flush())
            .map_err(|source| CommandError::Write {
                path: self.path,
                source,
            })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
