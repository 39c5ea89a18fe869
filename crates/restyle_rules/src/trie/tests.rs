use super::*;

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Encode raw nodes: `(char_map, other_unit, next_other, [(symbol, value, child)])`.
fn encode(nodes: &[(u32, u32, u32, &[(usize, u32, u32)])]) -> Vec<u8> {
    let mut out = Vec::new();
    for &(char_map, other, next_other, slots) in nodes {
        let mut words = [0u32; NODE_WORDS];
        words[0] = char_map;
        words[1] = other;
        words[2] = next_other;
        for &(sym, value, child) in slots {
            words[value_word(sym)] = value;
            words[child_word(sym)] = child;
        }
        for word in words {
            out.extend_from_slice(&word.to_le_bytes());
        }
    }
    out
}

// === Symbols ===

#[test]
fn letters_fold_to_same_symbol() {
    assert_eq!(symbol(u16::from(b'a')), 0);
    assert_eq!(symbol(u16::from(b'A')), 0);
    assert_eq!(symbol(u16::from(b'z')), 25);
    assert_eq!(symbol(u16::from(b'Z')), 25);
}

#[test]
fn non_letters_are_other() {
    for unit in [u16::from(b'-'), u16::from(b'0'), u16::from(b'_'), 0x00E9, 0] {
        assert_eq!(symbol(unit), OTHER);
    }
}

#[test]
fn node_is_57_words() {
    assert_eq!(NODE_WORDS, 57);
    assert_eq!(NODE_BYTES, 228);
}

// === Lookup ===

/// "ab" → 5, "a-" → 6, "a" → 4.
fn small_trie() -> Vec<u8> {
    let a = symbol(u16::from(b'a'));
    let b = symbol(u16::from(b'b'));
    encode(&[
        (1 << a, 0, 0, &[(a, 4, 1)]),
        (
            (1 << b) | (1 << OTHER),
            u32::from(b'-'),
            0,
            &[(b, 5, 0), (OTHER, 6, 0)],
        ),
    ])
}

#[test]
fn lookup_finds_keys_and_prefixes() {
    let bytes = small_trie();
    let trie = Trie::new(&bytes);
    assert_eq!(trie.node_count(), 2);
    assert_eq!(trie.lookup(0, &units("a")), 4);
    assert_eq!(trie.lookup(0, &units("ab")), 5);
    assert_eq!(trie.lookup(0, &units("a-")), 6);
}

#[test]
fn letters_are_case_insensitive() {
    let bytes = small_trie();
    let trie = Trie::new(&bytes);
    assert_eq!(trie.lookup(0, &units("AB")), 5);
    assert_eq!(trie.lookup(0, &units("aB")), 5);
}

#[test]
fn other_unit_compared_exactly() {
    let bytes = small_trie();
    let trie = Trie::new(&bytes);
    assert_eq!(trie.lookup(0, &units("a_")), 0);
    assert_eq!(trie.lookup(0, &units("a:")), 0);
}

#[test]
fn absent_and_overlong_keys_yield_zero() {
    let bytes = small_trie();
    let trie = Trie::new(&bytes);
    assert_eq!(trie.lookup(0, &units("b")), 0);
    assert_eq!(trie.lookup(0, &units("abc")), 0);
    assert_eq!(trie.lookup(0, &[]), 0);
}

// === Alternates ===

/// "1" → 1, "2" → 2, "2x" → 3, with "2" held by an alternate of the root.
fn alternate_trie() -> Vec<u8> {
    let x = symbol(u16::from(b'x'));
    encode(&[
        (1 << OTHER, u32::from(b'1'), 1, &[(OTHER, 1, 0)]),
        (1 << OTHER, u32::from(b'2'), 0, &[(OTHER, 2, 2)]),
        (1 << x, 0, 0, &[(x, 3, 0)]),
    ])
}

#[test]
fn alternate_chain_holds_further_non_letters() {
    let bytes = alternate_trie();
    let trie = Trie::new(&bytes);
    assert_eq!(trie.lookup(0, &units("1")), 1);
    assert_eq!(trie.lookup(0, &units("2")), 2);
    assert_eq!(trie.lookup(0, &units("2x")), 3);
    assert_eq!(trie.lookup(0, &units("3")), 0);
    assert_eq!(trie.lookup(0, &units("1x")), 0);
}

#[test]
fn cyclic_alternate_chain_terminates() {
    let bytes = encode(&[
        (1 << OTHER, u32::from(b'1'), 1, &[(OTHER, 1, 0)]),
        (1 << OTHER, u32::from(b'2'), 2, &[(OTHER, 2, 0)]),
        (1 << OTHER, u32::from(b'3'), 1, &[(OTHER, 3, 0)]),
    ]);
    let trie = Trie::new(&bytes);
    assert_eq!(trie.lookup(0, &units("3")), 3);
    assert_eq!(trie.lookup(0, &units("4")), 0);
}

// === Fail closed ===

#[test]
fn empty_trie_yields_zero() {
    assert_eq!(Trie::EMPTY.lookup(0, &units("a")), 0);
}

#[test]
fn out_of_range_root_yields_zero() {
    let bytes = small_trie();
    let trie = Trie::new(&bytes);
    assert_eq!(trie.lookup(7, &units("a")), 0);
    assert_eq!(trie.lookup(u32::MAX, &units("a")), 0);
}

#[test]
fn dangling_child_yields_zero() {
    let a = symbol(u16::from(b'a'));
    let bytes = encode(&[(1 << a, 0, 0, &[(a, 0, 99)])]);
    let trie = Trie::new(&bytes);
    assert_eq!(trie.lookup(0, &units("ab")), 0);
}

#[test]
fn partial_trailing_node_is_ignored() {
    let mut bytes = small_trie();
    bytes.truncate(NODE_BYTES + 10);
    let trie = Trie::new(&bytes);
    assert_eq!(trie.node_count(), 1);
    assert_eq!(trie.lookup(0, &units("a")), 4);
    assert_eq!(trie.lookup(0, &units("ab")), 0);
}
