//! Host boundary for restyle.
//!
//! The exported C-ABI functions live in [`ffi`]; this module holds the
//! target-independent half so it can be tested natively: mapping a
//! [`Declaration`] onto the five integers the host callback receives, and
//! validating a rule table for the host.
//!
//! # Protocol version 1
//!
//! For every declaration the host's `restyle_on_declaration` import is
//! called with `(start, end, rule_id, semicolon_end, is_important)`:
//!
//! - `start`: offset of the property name.
//! - `end`: offset just past the value (before any `!important`).
//! - `rule_id`: rename or replace id, 0 when no rule applies.
//! - `semicolon_end`: just past `;`, the buffer length, or the closing `}`.
//! - `is_important`: 1 or 0.
//!
//! Offsets are UTF-16 code units into the buffer the host passed in.

use restyle_rules::{RuleResolver, RuleTable};
use restyle_scan::{tokenize, Declaration};

pub mod ffi;

/// Version of the callback shape above.
pub const PROTOCOL_VERSION: i32 = 1;

/// Status codes returned to the host.
pub mod status {
    /// The rule table validated.
    pub const OK: i32 = 0;
    // Non-zero codes are `restyle_rules::TableError::code()`.
}

/// The five callback arguments for one declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostDeclaration {
    pub start: i32,
    pub end: i32,
    pub rule_id: i32,
    pub semicolon_end: i32,
    pub is_important: i32,
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl From<Declaration> for HostDeclaration {
    fn from(declaration: Declaration) -> Self {
        Self {
            start: to_i32(declaration.name.start),
            end: to_i32(declaration.value.end),
            rule_id: to_i32(declaration.outcome.id().get()),
            semicolon_end: to_i32(declaration.semicolon_end),
            is_important: i32::from(declaration.is_important),
        }
    }
}

/// Scan `source` against the table in `rules`, reporting each declaration
/// in protocol form. A rejected table scans with no rules.
pub fn scan(source: &[u16], rules: &[u8], mut emit: impl FnMut(HostDeclaration)) {
    let resolver = RuleResolver::from_bytes(rules);
    tokenize(source, resolver, &mut |declaration: Declaration| {
        emit(HostDeclaration::from(declaration));
    });
}

/// [`status::OK`] if `rules` is a valid table, else its error code.
pub fn rules_status(rules: &[u8]) -> i32 {
    match RuleTable::parse(rules) {
        Ok(_) => status::OK,
        Err(err) => i32::try_from(err.code()).unwrap_or(i32::MAX),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
