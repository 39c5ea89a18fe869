//! Versioned rule table asset: header validation and the two trie views.

use thiserror::Error;

use crate::trie::{Trie, NODE_BYTES};

/// Asset magic, `RSTR`.
pub const MAGIC: [u8; 4] = *b"RSTR";

/// The only format version this crate reads and writes.
pub const FORMAT_VERSION: u16 = 1;

/// Header bytes before the first node.
pub const HEADER_LEN: usize = 16;

/// Why an asset was rejected.
///
/// Each variant has a stable [`code`](TableError::code) so the host boundary
/// can report it as an integer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("rule table is shorter than its {HEADER_LEN}-byte header")]
    TooShort,

    #[error("rule table does not start with the RSTR magic")]
    BadMagic,

    #[error("unsupported rule table version {0} (expected {FORMAT_VERSION})")]
    UnsupportedVersion(u16),

    #[error("rule table truncated: header promises {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },
}

impl TableError {
    pub fn code(&self) -> u32 {
        match self {
            TableError::TooShort => 1,
            TableError::BadMagic => 2,
            TableError::UnsupportedVersion(_) => 3,
            TableError::Truncated { .. } => 4,
        }
    }
}

/// Validated, borrowed view over a rule table asset.
#[derive(Clone, Copy, Debug)]
pub struct RuleTable<'a> {
    rename: Trie<'a>,
    replace: Trie<'a>,
}

impl<'a> RuleTable<'a> {
    /// A table with no rules.
    pub const fn empty() -> RuleTable<'static> {
        RuleTable {
            rename: Trie::EMPTY,
            replace: Trie::EMPTY,
        }
    }

    /// Validate the header and split the node region into the two tries.
    ///
    /// Only the header and total length are checked here; node contents are
    /// bounds-checked on every lookup instead.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, TableError> {
        let header: &[u8; HEADER_LEN] = bytes
            .get(..HEADER_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or(TableError::TooShort)?;

        if header[0..4] != MAGIC {
            return Err(TableError::BadMagic);
        }
        let version = u16::from_le_bytes([header[4], header[5]]);
        if version != FORMAT_VERSION {
            return Err(TableError::UnsupportedVersion(version));
        }
        let rename_count = u32::from_le_bytes([header[8], header[9], header[10], header[11]]);
        let replace_count = u32::from_le_bytes([header[12], header[13], header[14], header[15]]);

        let truncated = || TableError::Truncated {
            expected: usize::MAX,
            actual: bytes.len(),
        };
        let rename_len = (rename_count as usize)
            .checked_mul(NODE_BYTES)
            .ok_or_else(truncated)?;
        let replace_len = (replace_count as usize)
            .checked_mul(NODE_BYTES)
            .ok_or_else(truncated)?;
        let expected = HEADER_LEN
            .checked_add(rename_len)
            .and_then(|n| n.checked_add(replace_len))
            .ok_or_else(truncated)?;
        if bytes.len() < expected {
            return Err(TableError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }

        let rename_end = HEADER_LEN + rename_len;
        Ok(Self {
            rename: Trie::new(&bytes[HEADER_LEN..rename_end]),
            replace: Trie::new(&bytes[rename_end..expected]),
        })
    }

    #[inline]
    pub fn rename(&self) -> Trie<'a> {
        self.rename
    }

    #[inline]
    pub fn replace(&self) -> Trie<'a> {
        self.replace
    }

    pub fn is_empty(&self) -> bool {
        self.rename.node_count() == 0 && self.replace.node_count() == 0
    }
}

impl Default for RuleTable<'_> {
    fn default() -> Self {
        RuleTable::empty()
    }
}
