// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Rewriting whole stylesheets with the bundled rule set.

use pretty_assertions::assert_eq;
use restyle::rewrite::{rewrite, rewrite_units, rewrite_with_children};
use restyle::rules::{RuleSet, RENAME_RULES, REPLACE_RULES};

fn joined(decls: &[(&str, &str)], suffix: &str) -> String {
    decls
        .iter()
        .map(|(name, value)| format!("{name}:{value}{suffix}"))
        .collect::<Vec<_>>()
        .join(";")
}

#[test]
fn every_rename_rule_applies() {
    let rules = RuleSet::bundled().unwrap();
    for (name, target) in RENAME_RULES {
        let basis = if *name == "linear-weight" {
            ";--lynx-linear-weight-basis:0"
        } else {
            ""
        };
        assert_eq!(
            rewrite(&format!("{name}: 2px;"), &rules),
            format!("{target}:2px{basis};")
        );
        assert_eq!(rewrite(&format!("{name}: 0;"), &rules), format!("{target}:0;"));
    }
}

#[test]
fn every_replace_rule_applies() {
    let rules = RuleSet::bundled().unwrap();
    for (name, values) in REPLACE_RULES {
        for (value, replacement) in *values {
            assert_eq!(
                rewrite(&format!("{name}:{value};"), &rules),
                format!("{};", joined(replacement, "")),
                "{name}: {value}"
            );
            assert_eq!(
                rewrite(&format!("{name}:{value} !important;"), &rules),
                format!("{};", joined(replacement, " !important")),
                "{name}: {value} !important"
            );
        }
    }
}

#[test]
fn stylesheet() {
    let rules = RuleSet::bundled().unwrap();
    let source = "\
@media (min-width: 600px) {
  .list {
    display: linear;
    linear-orientation: horizontal;
    list-main-axis-gap: 8px;
    color: #333;
  }
}
.item:hover { linear-layout-gravity: center; }
";
    let expected = "\
@media (min-width: 600px) {
  .list {
    --lynx-display-toggle:var(--lynx-display-linear);--lynx-display:linear;display:flex;
    --lynx-linear-orientation:horizontal;--lynx-linear-orientation-toggle:var(--lynx-linear-orientation-horizontal);
    --list-main-axis-gap:8px;
    --lynx-text-bg-color:initial;-webkit-background-clip:initial;background-clip:initial;color:#333;
  }
}
.item:hover { --align-self-row:center;--align-self-column:center; }
";
    assert_eq!(rewrite(source, &rules), expected);
}

#[test]
fn weighted_list_with_children() {
    let rules = RuleSet::bundled().unwrap();
    let source = "\
.row { linear-weight-sum: 3; display: linear; }
.cell { linear-weight: 2; }
.gap { linear-weight: 0; }
";
    let rewritten = rewrite_with_children(source, &rules);
    assert_eq!(
        rewritten.style,
        "\
.row { linear-weight-sum: 3; --lynx-display-toggle:var(--lynx-display-linear);--lynx-display:linear;display:flex; }
.cell { --lynx-linear-weight:2;--lynx-linear-weight-basis:0; }
.gap { --lynx-linear-weight:0; }
"
    );
    assert_eq!(rewritten.children, "--lynx-linear-weight-sum:3;");
}

#[test]
fn second_pass_leaves_custom_properties() {
    let rules = RuleSet::bundled().unwrap();
    let once = rewrite("display: flex; flex-grow: 1; direction: lynx-rtl;", &rules);
    assert_eq!(
        once,
        "--lynx-display-toggle:var(--lynx-display-flex);--lynx-display:flex;display:flex; --flex-grow:1; direction:rtl;"
    );
    // `display:flex` is itself a replace key, so a second pass expands again;
    // everything else is stable.
    let twice = rewrite("--flex-grow:1; direction:rtl;", &rules);
    assert_eq!(twice, "--flex-grow:1; direction:rtl;");
}

#[test]
fn lone_surrogate_becomes_replacement_character() {
    let rules = RuleSet::bundled().unwrap();
    let mut units: Vec<u16> = "content: \"".encode_utf16().collect();
    units.push(0xD800);
    units.extend("\"; flex: 1;".encode_utf16());
    assert_eq!(
        rewrite_units(&units, &rules),
        "content: \"\u{FFFD}\"; --flex:1;"
    );
}
