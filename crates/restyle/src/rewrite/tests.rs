use super::*;
use pretty_assertions::assert_eq;

fn bundled(source: &str) -> String {
    let rules = RuleSet::bundled().unwrap();
    rewrite(source, &rules)
}

// ─── Inline styles ──────────────────────────────────────────────────

#[test]
fn untouched_declaration_is_copied() {
    assert_eq!(bundled("height:1px;"), "height:1px;");
}

#[test]
fn mixed_rename_and_replace() {
    assert_eq!(
        bundled("height:1px;display:linear;flex-direction:row;width:100px;"),
        "height:1px;--lynx-display-toggle:var(--lynx-display-linear);--lynx-display:linear;display:flex;--flex-direction:row;width:100px;"
    );
}

#[test]
fn replace_after_blank() {
    assert_eq!(
        bundled("display: linear;"),
        "--lynx-display-toggle:var(--lynx-display-linear);--lynx-display:linear;display:flex;"
    );
}

#[test]
fn linear_direction_maps_to_orientation() {
    assert_eq!(
        bundled("linear-direction:row;"),
        "--lynx-linear-orientation:horizontal;--lynx-linear-orientation-toggle:var(--lynx-linear-orientation-horizontal);"
    );
}

#[test]
fn important_propagates_to_each_replacement() {
    assert_eq!(
        bundled("display: linear !important;"),
        "--lynx-display-toggle:var(--lynx-display-linear) !important;--lynx-display:linear !important;display:flex !important;"
    );
}

#[test]
fn important_on_rename() {
    assert_eq!(
        bundled("flex-grow: 1 !IMPORTANT;"),
        "--flex-grow:1 !important;"
    );
    assert_eq!(bundled("flex-grow:1!important"), "--flex-grow:1 !important");
}

#[test]
fn trivia_around_terminator_is_kept() {
    assert_eq!(bundled(" flex-wrap : wrap ;"), " --flex-wrap:wrap ;");
}

#[test]
fn value_keeps_its_case_on_rename() {
    assert_eq!(bundled("Flex-Basis: Auto;"), "--flex-basis:Auto;");
}

#[test]
fn last_declaration_without_semicolon() {
    assert_eq!(
        bundled("width:1px;justify-content:start"),
        "width:1px;justify-content:flex-start"
    );
}

#[test]
fn rename_keeps_function_values() {
    assert_eq!(
        bundled("flex-basis: calc(100% - var(--gap, 4px));"),
        "--flex-basis:calc(100% - var(--gap, 4px));"
    );
}

// ─── Stylesheets ────────────────────────────────────────────────────

#[test]
fn declarations_inside_blocks() {
    assert_eq!(
        bundled(".a { linear-cross-gravity: center } .b{flex:1}"),
        ".a { align-items:center } .b{--flex:1}"
    );
}

#[test]
fn selectors_and_comments_are_untouched() {
    let source = "/* display: linear; */ a:hover { margin: 0; }";
    assert_eq!(bundled(source), source);
}

#[test]
fn malformed_declarations_are_untouched() {
    let source = "display: \"linear";
    assert_eq!(bundled(source), source);
}

#[test]
fn unknown_replace_value_is_untouched() {
    assert_eq!(bundled("display: grid;"), "display: grid;");
}

#[test]
fn non_ascii_text_survives() {
    assert_eq!(
        bundled("content: \"é→😀\"; flex-shrink: 0;"),
        "content: \"é→😀\"; --flex-shrink:0;"
    );
}

#[test]
fn empty_source() {
    assert_eq!(bundled(""), "");
}

// ─── Special rules ──────────────────────────────────────────────────

fn bundled_with_children(source: &str) -> Rewritten {
    let rules = RuleSet::bundled().unwrap();
    rewrite_with_children(source, &rules)
}

#[test]
fn color_resets_text_background() {
    assert_eq!(
        bundled("color:blue;"),
        "--lynx-text-bg-color:initial;-webkit-background-clip:initial;background-clip:initial;color:blue;"
    );
}

#[test]
fn color_keeps_surrounding_trivia() {
    assert_eq!(
        bundled(" color : blue ;"),
        " --lynx-text-bg-color:initial;-webkit-background-clip:initial;background-clip:initial;color:blue ;"
    );
}

#[test]
fn color_important() {
    assert_eq!(
        bundled(" color : blue !important ;"),
        " --lynx-text-bg-color:initial !important;-webkit-background-clip:initial !important;background-clip:initial !important;color:blue !important ;"
    );
}

#[test]
fn color_gradient_clips_text() {
    assert_eq!(
        bundled(" color : linear-gradient(pink, blue) ;"),
        " color:transparent;-webkit-background-clip:text;background-clip:text;--lynx-text-bg-color:linear-gradient(pink, blue) ;"
    );
}

#[test]
fn color_gradient_important() {
    assert_eq!(
        bundled(" color : linear-gradient(pink, blue) !important ;"),
        " color:transparent !important;-webkit-background-clip:text !important;background-clip:text !important;--lynx-text-bg-color:linear-gradient(pink, blue) !important ;"
    );
}

#[test]
fn color_after_other_declaration() {
    assert_eq!(
        bundled("font-size: 24px; color: blue"),
        "font-size: 24px; --lynx-text-bg-color:initial;-webkit-background-clip:initial;background-clip:initial;color:blue"
    );
}

#[test]
fn color_name_is_case_insensitive() {
    assert_eq!(
        bundled("COLOR:red;"),
        "--lynx-text-bg-color:initial;-webkit-background-clip:initial;background-clip:initial;color:red;"
    );
}

#[test]
fn background_color_is_untouched() {
    assert_eq!(bundled("background-color: red;"), "background-color: red;");
}

#[test]
fn linear_weight_zero() {
    assert_eq!(bundled("linear-weight: 0;"), "--lynx-linear-weight:0;");
}

#[test]
fn linear_weight_non_zero_resets_basis() {
    assert_eq!(
        bundled("linear-weight: 1;"),
        "--lynx-linear-weight:1;--lynx-linear-weight-basis:0;"
    );
    assert_eq!(
        bundled("linear-weight: 1 !important;"),
        "--lynx-linear-weight:1 !important;--lynx-linear-weight-basis:0 !important;"
    );
}

#[test]
fn linear_weight_after_replace() {
    assert_eq!(
        bundled("linear-direction:row;linear-weight: 0;"),
        "--lynx-linear-orientation:horizontal;--lynx-linear-orientation-toggle:var(--lynx-linear-orientation-horizontal);--lynx-linear-weight:0;"
    );
}

#[test]
fn linear_weight_sum_goes_to_children() {
    let rewritten = bundled_with_children("linear-weight-sum: 1;");
    assert_eq!(rewritten.style, "linear-weight-sum: 1;");
    assert_eq!(rewritten.children, "--lynx-linear-weight-sum:1;");

    let rewritten = bundled_with_children("linear-weight-sum: 2 !important; flex: 1;");
    assert_eq!(rewritten.style, "linear-weight-sum: 2 !important; --flex:1;");
    assert_eq!(rewritten.children, "--lynx-linear-weight-sum:2 !important;");
}

#[test]
fn no_children_without_weight_sum() {
    assert_eq!(bundled_with_children("display: linear;").children, "");
}

// ─── Custom rule sets ───────────────────────────────────────────────

#[test]
fn custom_rules_apply() {
    let rules = RuleSet::build(
        &[("color", "--text-color")],
        &[("float", &[("left", &[("justify-self", "start"), ("float", "none")])])],
    )
    .unwrap();
    assert_eq!(
        rewrite("color: blue; float: LEFT;", &rules),
        "--text-color:blue; justify-self:start;float:none;"
    );
}

#[test]
fn rewrite_end_without_important_is_value_end() {
    let rules = RuleSet::bundled().unwrap();
    let source: Vec<u16> = "flex: 1 ;".encode_utf16().collect();
    let mut seen = Vec::new();
    tokenize(&source, rules.resolver(), &mut |d: Declaration| seen.push(d));
    assert_eq!(rewrite_end(&source, &seen[0]), 7);
}

#[test]
fn rewrite_end_covers_important() {
    let rules = RuleSet::bundled().unwrap();
    let source: Vec<u16> = "flex: 1 ! important /* c */ ;".encode_utf16().collect();
    let mut seen = Vec::new();
    tokenize(&source, rules.resolver(), &mut |d: Declaration| seen.push(d));
    assert!(seen[0].is_important);
    assert_eq!(rewrite_end(&source, &seen[0]), 19);
}
