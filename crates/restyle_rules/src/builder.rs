//! Ahead-of-time construction of rule table assets.
//!
//! Not on the scan path: the builder allocates freely and is used by the
//! driver's bundled rule set, the `build-rules` command, and tests.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::table::{RuleTable, FORMAT_VERSION, HEADER_LEN, MAGIC};
use crate::trie::{child_word, symbol, value_word, NODE_WORDS, OTHER, SYMBOLS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("rule keys must be non-empty")]
    EmptyKey,

    #[error("rule ids must be non-zero (0 means \"no rule\")")]
    ZeroId,

    #[error("rule table exceeds the u32 node limit")]
    TooManyNodes,
}

#[derive(Clone, Debug)]
struct NodeBuf {
    char_map: u32,
    other_unit: u16,
    next_other: u32,
    slots: [(u32, u32); SYMBOLS],
}

impl NodeBuf {
    fn new() -> Self {
        Self {
            char_map: 0,
            other_unit: 0,
            next_other: 0,
            slots: [(0, 0); SYMBOLS],
        }
    }
}

/// A node pool under construction. Node 0 is the first root.
#[derive(Debug)]
struct Pool {
    nodes: Vec<NodeBuf>,
}

impl Pool {
    fn new() -> Self {
        Self {
            nodes: vec![NodeBuf::new()],
        }
    }

    fn push(&mut self) -> Result<u32, BuildError> {
        let index = u32::try_from(self.nodes.len()).map_err(|_| BuildError::TooManyNodes)?;
        self.nodes.push(NodeBuf::new());
        Ok(index)
    }

    /// Insert `key → value` under `root`. A repeated key keeps the last value.
    fn insert(&mut self, root: u32, key: &str, value: u32) -> Result<(), BuildError> {
        let units: Vec<u16> = key.encode_utf16().collect();
        let Some((&last, body)) = units.split_last() else {
            return Err(BuildError::EmptyKey);
        };
        let mut node = root as usize;
        for &unit in body {
            let (holder, sym) = self.claim(node, unit)?;
            let child = match self.nodes[holder].slots[sym].1 {
                0 => {
                    let child = self.push()?;
                    self.nodes[holder].slots[sym].1 = child;
                    child
                }
                child => child,
            };
            node = child as usize;
        }
        let (holder, sym) = self.claim(node, last)?;
        self.nodes[holder].slots[sym].0 = value;
        Ok(())
    }

    /// Mark `unit` present at `node` and return the node holding its slot.
    ///
    /// A non-letter other than the one `node` already holds goes to the
    /// alternate chain, which grows by one node per distinct unit.
    fn claim(&mut self, node: usize, unit: u16) -> Result<(usize, usize), BuildError> {
        let sym = symbol(unit);
        if sym != OTHER {
            self.nodes[node].char_map |= 1 << sym;
            return Ok((node, sym));
        }

        let mut holder = node;
        loop {
            let entry = &mut self.nodes[holder];
            if entry.char_map & (1 << OTHER) == 0 {
                entry.char_map |= 1 << OTHER;
                entry.other_unit = unit;
                return Ok((holder, OTHER));
            }
            if entry.other_unit == unit {
                return Ok((holder, OTHER));
            }
            let next_other = entry.next_other;
            holder = match next_other {
                0 => {
                    let next = self.push()?;
                    self.nodes[holder].next_other = next;
                    next as usize
                }
                next => next as usize,
            };
        }
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        for node in &self.nodes {
            let mut words = [0u32; NODE_WORDS];
            words[0] = node.char_map;
            words[1] = u32::from(node.other_unit);
            words[2] = node.next_other;
            for (sym, &(value, child)) in node.slots.iter().enumerate() {
                words[value_word(sym)] = value;
                words[child_word(sym)] = child;
            }
            for word in words {
                out.extend_from_slice(&word.to_le_bytes());
            }
        }
    }
}

/// Collects rename and replace rules and encodes them as an asset.
///
/// ```
/// use restyle_rules::{RuleResolver, RuleTableBuilder};
///
/// let table = RuleTableBuilder::new()
///     .rename("color", 7)
///     .replace("display", "linear", 9)
///     .build()
///     .unwrap();
/// let resolver = RuleResolver::new(table.as_table());
/// let name: Vec<u16> = "Color".encode_utf16().collect();
/// assert_eq!(resolver.resolve_rename(&name).get(), 7);
/// ```
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    rename: Vec<(String, u32)>,
    replace: Vec<(String, Vec<(String, u32)>)>,
    replace_index: FxHashMap<String, usize>,
}

impl RuleTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map property `name` to rename id `id`.
    #[must_use]
    pub fn rename(mut self, name: &str, id: u32) -> Self {
        self.add_rename(name, id);
        self
    }

    /// Map the `(name, value)` pair to replace id `id`.
    #[must_use]
    pub fn replace(mut self, name: &str, value: &str, id: u32) -> Self {
        self.add_replace(name, value, id);
        self
    }

    pub fn add_rename(&mut self, name: &str, id: u32) {
        self.rename.push((name.to_owned(), id));
    }

    pub fn add_replace(&mut self, name: &str, value: &str, id: u32) {
        let index = match self.replace_index.get(name) {
            Some(&index) => index,
            None => {
                let index = self.replace.len();
                self.replace.push((name.to_owned(), Vec::new()));
                self.replace_index.insert(name.to_owned(), index);
                index
            }
        };
        self.replace[index].1.push((value.to_owned(), id));
    }

    /// Encode both tries. Output is deterministic for a given insertion
    /// order.
    pub fn build(&self) -> Result<OwnedRuleTable, BuildError> {
        let mut rename = Pool::new();
        for (name, id) in &self.rename {
            if *id == 0 {
                return Err(BuildError::ZeroId);
            }
            rename.insert(0, name, *id)?;
        }

        let mut replace = Pool::new();
        for (name, values) in &self.replace {
            let sub_root = replace.push()?;
            for (value, id) in values {
                if *id == 0 {
                    return Err(BuildError::ZeroId);
                }
                replace.insert(sub_root, value, *id)?;
            }
            replace.insert(0, name, sub_root)?;
        }

        let rename_count =
            u32::try_from(rename.nodes.len()).map_err(|_| BuildError::TooManyNodes)?;
        let replace_count =
            u32::try_from(replace.nodes.len()).map_err(|_| BuildError::TooManyNodes)?;

        let node_bytes = (rename.nodes.len() + replace.nodes.len()) * NODE_WORDS * 4;
        let mut bytes = Vec::with_capacity(HEADER_LEN + node_bytes);
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&rename_count.to_le_bytes());
        bytes.extend_from_slice(&replace_count.to_le_bytes());
        rename.encode_into(&mut bytes);
        replace.encode_into(&mut bytes);

        Ok(OwnedRuleTable { bytes })
    }
}

/// An encoded asset produced by [`RuleTableBuilder::build`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedRuleTable {
    bytes: Vec<u8>,
}

impl OwnedRuleTable {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Borrowed view. Falls back to the empty table if the bytes somehow
    /// fail validation.
    pub fn as_table(&self) -> RuleTable<'_> {
        RuleTable::parse(&self.bytes).unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
