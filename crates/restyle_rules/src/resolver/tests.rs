use super::*;
use crate::{OwnedRuleTable, RuleTableBuilder};
use proptest::prelude::*;

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn sample() -> OwnedRuleTable {
    RuleTableBuilder::new()
        .rename("color", 7)
        .rename("flex-direction", 1)
        .replace("display", "linear", 20)
        .replace("display", "flex", 21)
        .replace("color", "red", 99)
        .build()
        .unwrap()
}

// === Rename ===

#[test]
fn rename_resolves_case_insensitively() {
    let table = sample();
    let resolver = RuleResolver::new(table.as_table());
    assert_eq!(resolver.resolve_rename(&units("color")), RuleId::new(7));
    assert_eq!(resolver.resolve_rename(&units("Color")), RuleId::new(7));
    assert_eq!(resolver.resolve_rename(&units("COLOR")), RuleId::new(7));
    assert_eq!(resolver.resolve_rename(&units("colour")), RuleId::NONE);
}

#[test]
fn zero_length_input_is_no_rule() {
    let table = sample();
    let resolver = RuleResolver::new(table.as_table());
    assert!(resolver.resolve_rename(&[]).is_none());
    assert!(resolver.resolve_replace(&[], &[]).is_none());
    assert!(resolver.resolve_replace(&units("display"), &[]).is_none());
    assert_eq!(resolver.resolve(&[], &[]), RuleOutcome::None);
}

// === Replace ===

#[test]
fn replace_needs_both_name_and_value() {
    let table = sample();
    let resolver = RuleResolver::new(table.as_table());
    assert_eq!(
        resolver.resolve_replace(&units("display"), &units("linear")),
        RuleId::new(20)
    );
    assert_eq!(
        resolver.resolve_replace(&units("DISPLAY"), &units("Flex")),
        RuleId::new(21)
    );
    assert!(resolver
        .resolve_replace(&units("display"), &units("grid"))
        .is_none());
    assert!(resolver
        .resolve_replace(&units("height"), &units("linear"))
        .is_none());
}

// === Combined ===

#[test]
fn rename_takes_precedence() {
    let table = sample();
    let resolver = RuleResolver::new(table.as_table());
    assert_eq!(
        resolver.resolve(&units("color"), &units("red")),
        RuleOutcome::Rename(RuleId::new(7))
    );
    assert_eq!(
        resolver.resolve(&units("display"), &units("linear")),
        RuleOutcome::Replace(RuleId::new(20))
    );
    assert_eq!(
        resolver.resolve(&units("width"), &units("1px")),
        RuleOutcome::None
    );
}

#[test]
fn outcome_collapses_to_id() {
    assert_eq!(RuleOutcome::None.id(), RuleId::NONE);
    assert_eq!(RuleOutcome::Rename(RuleId::new(3)).id().get(), 3);
    assert_eq!(RuleOutcome::Replace(RuleId::new(4)).id().get(), 4);
    assert_eq!(RuleOutcome::Replace(RuleId::new(4)).to_string(), "replace(4)");
    assert_eq!(RuleOutcome::None.to_string(), "none");
}

// === Fail closed ===

#[test]
fn empty_resolver_knows_nothing() {
    let resolver = RuleResolver::empty();
    assert_eq!(
        resolver.resolve(&units("color"), &units("red")),
        RuleOutcome::None
    );
}

#[test]
fn rejected_bytes_resolve_nothing() {
    let resolver = RuleResolver::from_bytes(b"not a rule table");
    assert!(resolver.table().is_empty());
    assert!(resolver.resolve_rename(&units("color")).is_none());
}

#[test]
fn valid_bytes_resolve() {
    let table = sample();
    let resolver = RuleResolver::from_bytes(table.as_bytes());
    assert_eq!(resolver.resolve_rename(&units("color")), RuleId::new(7));
}

// === Property Tests ===

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.-]{0,12}"
}

proptest! {
    #[test]
    fn configured_keys_resolve_and_absent_keys_do_not(
        keys in prop::collection::btree_set(key(), 1..24),
        probe in key(),
    ) {
        let mut builder = RuleTableBuilder::new();
        for (index, key) in keys.iter().enumerate() {
            builder.add_rename(key, u32::try_from(index + 1).unwrap());
        }
        let table = builder.build().unwrap();
        let resolver = RuleResolver::new(table.as_table());

        for (index, key) in keys.iter().enumerate() {
            let expected = RuleId::new(u32::try_from(index + 1).unwrap());
            prop_assert_eq!(resolver.resolve_rename(&units(key)), expected);
            prop_assert_eq!(
                resolver.resolve_rename(&units(&key.to_ascii_uppercase())),
                expected
            );
        }
        if !keys.contains(&probe) {
            prop_assert!(resolver.resolve_rename(&units(&probe)).is_none());
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(
        bytes in prop::collection::vec(any::<u8>(), 0..600),
        key in prop::collection::vec(any::<u16>(), 0..8),
    ) {
        let mut bytes = bytes;
        if bytes.len() >= 16 {
            bytes[..4].copy_from_slice(b"RSTR");
            bytes[4] = 1;
            bytes[5] = 0;
        }
        let resolver = RuleResolver::from_bytes(&bytes);
        let _ = resolver.resolve(&key, &key);
    }
}
