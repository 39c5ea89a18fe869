//! Rename / replace resolution over a [`RuleTable`].

use std::fmt;

use tracing::debug;

use crate::table::RuleTable;

/// Rule identifier understood by the host's side table. 0 is "no rule".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u32);

impl RuleId {
    pub const NONE: RuleId = RuleId(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        RuleId(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the table says about one declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RuleOutcome {
    #[default]
    None,
    Rename(RuleId),
    Replace(RuleId),
}

impl RuleOutcome {
    /// The id as it crosses the host boundary; 0 for `None`.
    #[inline]
    pub fn id(self) -> RuleId {
        match self {
            RuleOutcome::None => RuleId::NONE,
            RuleOutcome::Rename(id) | RuleOutcome::Replace(id) => id,
        }
    }
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleOutcome::None => f.write_str("none"),
            RuleOutcome::Rename(id) => write!(f, "rename({id})"),
            RuleOutcome::Replace(id) => write!(f, "replace({id})"),
        }
    }
}

/// Pure, allocation-free resolver. Cheap to copy and share across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleResolver<'a> {
    table: RuleTable<'a>,
}

impl<'a> RuleResolver<'a> {
    pub fn new(table: RuleTable<'a>) -> Self {
        Self { table }
    }

    /// A resolver that knows no rules.
    pub fn empty() -> RuleResolver<'static> {
        RuleResolver {
            table: RuleTable::empty(),
        }
    }

    /// Validate `bytes` as a table asset; a rejected asset resolves nothing.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        match RuleTable::parse(bytes) {
            Ok(table) => Self::new(table),
            Err(err) => {
                debug!(%err, code = err.code(), len = bytes.len(), "rule table rejected");
                Self::new(RuleTable::empty())
            }
        }
    }

    pub fn table(&self) -> RuleTable<'a> {
        self.table
    }

    /// Rename id for property `name`, or [`RuleId::NONE`].
    #[inline]
    pub fn resolve_rename(&self, name: &[u16]) -> RuleId {
        RuleId(self.table.rename().lookup(0, name))
    }

    /// Replace id for the `(name, value)` pair, or [`RuleId::NONE`].
    #[inline]
    pub fn resolve_replace(&self, name: &[u16], value: &[u16]) -> RuleId {
        let replace = self.table.replace();
        match replace.lookup(0, name) {
            0 => RuleId::NONE,
            sub_root => RuleId(replace.lookup(sub_root, value)),
        }
    }

    /// Rename wins over replace.
    pub fn resolve(&self, name: &[u16], value: &[u16]) -> RuleOutcome {
        let rename = self.resolve_rename(name);
        if !rename.is_none() {
            return RuleOutcome::Rename(rename);
        }
        let replace = self.resolve_replace(name, value);
        if replace.is_none() {
            RuleOutcome::None
        } else {
            RuleOutcome::Replace(replace)
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
