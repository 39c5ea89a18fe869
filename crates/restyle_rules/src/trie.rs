//! 27-symbol exact-match trie over a read-only node array.
//!
//! ASCII letters fold to symbols 0-25; every other code unit is symbol 26.
//! Symbol 26 alone would make `-` and `:` indistinguishable, so each node
//! also records the non-letter code unit it accepts (`other_unit`), and a
//! lookup compares it exactly. Letters match case-insensitively; all other
//! code units match case-sensitively.
//!
//! A node that needs more than one non-letter links an alternate node
//! (`next_other`). An alternate carries only the OTHER symbol: its own
//! `other_unit` and the slot for it, plus a link to the next alternate.
//!
//! A slot carries both a terminal value and a child reference, so a key may
//! be a prefix of another (`flex` and `flex-direction`). Child `0` means
//! "no child": the root is node 0 and is never anyone's child.

/// Size of the symbol alphabet.
pub const SYMBOLS: usize = 27;

/// Symbol for every non-letter code unit.
pub const OTHER: usize = 26;

/// `u32` words per node: occupancy map, other unit, next alternate,
/// 27 × (value, child).
pub const NODE_WORDS: usize = 3 + 2 * SYMBOLS;

/// Bytes per node.
pub const NODE_BYTES: usize = NODE_WORDS * 4;

const CHAR_MAP: usize = 0;
const OTHER_UNIT: usize = 1;
const NEXT_OTHER: usize = 2;

/// Map one code unit to its trie symbol.
#[inline]
pub fn symbol(unit: u16) -> usize {
    match unit {
        0x61..=0x7A => usize::from(unit - 0x61),
        0x41..=0x5A => usize::from(unit - 0x41),
        _ => OTHER,
    }
}

#[inline]
pub fn value_word(symbol: usize) -> usize {
    3 + 2 * symbol
}

#[inline]
pub fn child_word(symbol: usize) -> usize {
    4 + 2 * symbol
}

/// Borrowed view over a run of encoded nodes.
#[derive(Clone, Copy, Debug)]
pub struct Trie<'a> {
    nodes: &'a [u8],
    node_count: u32,
}

impl<'a> Trie<'a> {
    /// A trie with no nodes; every lookup yields 0.
    pub const EMPTY: Trie<'static> = Trie {
        nodes: &[],
        node_count: 0,
    };

    /// View `nodes` as an array of encoded nodes. A trailing partial node is
    /// ignored.
    pub fn new(nodes: &'a [u8]) -> Self {
        let node_count = u32::try_from(nodes.len() / NODE_BYTES).unwrap_or(u32::MAX);
        Self { nodes, node_count }
    }

    #[inline]
    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    /// Read word `word` of node `node`, or `None` if either is out of range.
    #[inline]
    fn word(&self, node: u32, word: usize) -> Option<u32> {
        if node >= self.node_count {
            return None;
        }
        let offset = (node as usize)
            .checked_mul(NODE_BYTES)?
            .checked_add(word * 4)?;
        let bytes: [u8; 4] = self.nodes.get(offset..offset + 4)?.try_into().ok()?;
        Some(u32::from_le_bytes(bytes))
    }

    /// Exact-match lookup of `key` starting at node `root`.
    ///
    /// Returns the stored value, or 0 when the key is absent, empty, or any
    /// reference along the walk falls outside the table.
    pub fn lookup(&self, root: u32, key: &[u16]) -> u32 {
        let Some((&last, body)) = key.split_last() else {
            return 0;
        };
        let mut node = root;
        for &unit in body {
            let Some((holder, sym)) = self.step(node, unit) else {
                return 0;
            };
            match self.word(holder, child_word(sym)) {
                Some(child) if child != 0 => node = child,
                _ => return 0,
            }
        }
        self.step(node, last)
            .and_then(|(holder, sym)| self.word(holder, value_word(sym)))
            .unwrap_or(0)
    }

    /// The node holding the slot for `unit` at `node`, and its symbol.
    ///
    /// Letters live in `node` itself. A non-letter may live in `node` or in
    /// one of its alternates; the chain walk is capped at the node count so
    /// a cyclic table still terminates.
    #[inline]
    fn step(&self, node: u32, unit: u16) -> Option<(u32, usize)> {
        let sym = symbol(unit);
        if sym != OTHER {
            let char_map = self.word(node, CHAR_MAP)?;
            return (char_map & (1 << sym) != 0).then_some((node, sym));
        }

        let mut holder = node;
        for _ in 0..self.node_count {
            let char_map = self.word(holder, CHAR_MAP)?;
            if char_map & (1 << OTHER) != 0 && self.word(holder, OTHER_UNIT)? == u32::from(unit) {
                return Some((holder, OTHER));
            }
            match self.word(holder, NEXT_OTHER)? {
                0 => return None,
                next => holder = next,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests;
