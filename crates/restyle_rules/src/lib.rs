//! Rule tables for restyle.
//!
//! A rule table is a little-endian binary asset holding two tries:
//!
//! - **rename**: property name → rename id.
//! - **replace**: property name → root of a value-keyed sub-trie, which maps
//!   the declaration value → replace id.
//!
//! Rename and replace ids share one id space; the host keeps a side table
//! from id to rename target or replacement declarations.
//!
//! Everything on the lookup path is a borrowed, `Copy` view over the asset
//! bytes: no allocation, no global state, and any malformed reference reads
//! as "no rule".
//!
//! # Asset layout (version 1)
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0      | 4    | magic `RSTR` |
//! | 4      | 2    | format version |
//! | 6      | 2    | reserved (0) |
//! | 8      | 4    | rename node count |
//! | 12     | 4    | replace node count |
//! | 16     | ...  | rename nodes, then replace nodes |
//!
//! Each node is [`NODE_WORDS`](trie::NODE_WORDS) `u32` words: occupancy
//! map, other unit, next alternate node, then 27 `(value, child)` pairs.

mod builder;
mod resolver;
mod table;
pub mod trie;

pub use builder::{BuildError, OwnedRuleTable, RuleTableBuilder};
pub use resolver::{RuleId, RuleOutcome, RuleResolver};
pub use table::{RuleTable, TableError, FORMAT_VERSION, HEADER_LEN, MAGIC};
pub use trie::Trie;
