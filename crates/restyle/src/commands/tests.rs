use super::*;
use pretty_assertions::assert_eq;
use restyle_rules::{RuleOutcome, RuleTableBuilder};

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

// === Reading ===

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.css");
    let err = read_file(&path).unwrap_err();
    assert!(matches!(err, CommandError::NotFound { .. }));
    assert_eq!(
        err.to_string(),
        format!("cannot find file '{}'", path.display())
    );
}

#[test]
fn invalid_utf8_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.css");
    std::fs::write(&path, [0x63, 0xFF, 0xFE]).unwrap();
    assert!(matches!(
        read_file(&path).unwrap_err(),
        CommandError::InvalidUtf8 { .. }
    ));
}

#[test]
fn read_file_returns_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.css");
    std::fs::write(&path, "color: red;").unwrap();
    assert_eq!(read_file(&path).unwrap(), "color: red;");
}

// === Rules ===

#[test]
fn no_path_loads_bundled_rules() {
    let rules = LoadedRules::load(None).unwrap();
    assert!(matches!(rules, LoadedRules::Bundled(_)));
    let outcome = rules
        .resolver()
        .resolve(&units("display"), &units("linear"));
    assert!(matches!(outcome, RuleOutcome::Replace(_)));
}

#[test]
fn asset_path_loads_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.bin");
    let table = RuleTableBuilder::new().rename("color", 3).build().unwrap();
    std::fs::write(&path, table.as_bytes()).unwrap();

    let rules = LoadedRules::load(Some(&path)).unwrap();
    assert_eq!(
        rules.resolver().resolve(&units("color"), &units("red")),
        RuleOutcome::Rename(restyle_rules::RuleId::new(3))
    );
    // The bundled rules are not merged in.
    assert_eq!(
        rules.resolver().resolve(&units("display"), &units("linear")),
        RuleOutcome::None
    );
}

#[test]
fn invalid_asset_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.bin");
    std::fs::write(&path, b"NOPE............").unwrap();

    let Err(CommandError::Table { source, .. }) = LoadedRules::load(Some(&path)) else {
        panic!("expected a table error");
    };
    assert_eq!(source, TableError::BadMagic);
}

// === Output ===

#[test]
fn output_writes_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    Output::open(Some(&path))
        .unwrap()
        .write_with(|out| out.write_all(b"hello\n"))
        .unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
}

#[test]
fn output_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("out.txt");
    assert!(matches!(
        Output::open(Some(&path)),
        Err(CommandError::Write { .. })
    ));
}

#[test]
fn usage_error_displays_message() {
    assert_eq!(
        CommandError::Usage("needs a file").to_string(),
        "needs a file"
    );
}
