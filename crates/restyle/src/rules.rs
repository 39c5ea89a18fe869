//! Bundled rule set for the runtime's legacy layout properties.
//!
//! The rule table only answers "which id applies"; the [`RuleSet`] also
//! keeps the side table a host needs to act on that id. Ids are assigned in
//! declaration order, renames first, starting at 1.
//!
//! A few properties need more than an exact table match. Those are
//! [`SpecialRule`]s, applied by the host on top of the table outcome.

use std::fmt;

use restyle_lexer_core::char_class::eq_ignore_ascii_case;
use restyle_rules::{BuildError, OwnedRuleTable, RuleId, RuleResolver, RuleTableBuilder};
use tracing::debug;

/// Replacement declarations, in emission order.
pub type Replacement = &'static [(&'static str, &'static str)];

/// Replace rules for one property: value → replacement.
pub type ValueRules = &'static [(&'static str, Replacement)];

/// What a host does with a declaration whose outcome carries an id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleAction {
    /// Emit the declaration under this property name, value unchanged.
    Rename(&'static str),
    /// Emit these declarations instead.
    Replace(Replacement),
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleAction::Rename(target) => write!(f, "rename to {target}"),
            RuleAction::Replace(decls) => {
                f.write_str("replace with ")?;
                for (i, (name, value)) in decls.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, "{name}:{value}")?;
                }
                Ok(())
            }
        }
    }
}

// ─── Bundled rules ──────────────────────────────────────────────────

pub const RENAME_RULES: &[(&str, &str)] = &[
    ("linear-weight", "--lynx-linear-weight"),
    ("flex-direction", "--flex-direction"),
    ("flex-wrap", "--flex-wrap"),
    ("flex-grow", "--flex-grow"),
    ("flex-shrink", "--flex-shrink"),
    ("flex-basis", "--flex-basis"),
    ("list-main-axis-gap", "--list-main-axis-gap"),
    ("list-cross-axis-gap", "--list-cross-axis-gap"),
    ("flex", "--flex"),
];

const ORIENTATION_HORIZONTAL: Replacement = &[
    ("--lynx-linear-orientation", "horizontal"),
    (
        "--lynx-linear-orientation-toggle",
        "var(--lynx-linear-orientation-horizontal)",
    ),
];

const ORIENTATION_HORIZONTAL_REVERSE: Replacement = &[
    ("--lynx-linear-orientation", "horizontal-reverse"),
    (
        "--lynx-linear-orientation-toggle",
        "var(--lynx-linear-orientation-horizontal-reverse)",
    ),
];

const ORIENTATION_VERTICAL: Replacement = &[
    ("--lynx-linear-orientation", "vertical"),
    (
        "--lynx-linear-orientation-toggle",
        "var(--lynx-linear-orientation-vertical)",
    ),
];

const ORIENTATION_VERTICAL_REVERSE: Replacement = &[
    ("--lynx-linear-orientation", "vertical-reverse"),
    (
        "--lynx-linear-orientation-toggle",
        "var(--lynx-linear-orientation-vertical-reverse)",
    ),
];

/// Columns: column, column-reverse, row, row-reverse.
const fn gravity(
    column: &'static str,
    column_reverse: &'static str,
    row: &'static str,
    row_reverse: &'static str,
) -> [(&'static str, &'static str); 4] {
    [
        ("--justify-content-column", column),
        ("--justify-content-column-reverse", column_reverse),
        ("--justify-content-row", row),
        ("--justify-content-row-reverse", row_reverse),
    ]
}

const fn layout_gravity(
    row: &'static str,
    column: &'static str,
) -> [(&'static str, &'static str); 2] {
    [("--align-self-row", row), ("--align-self-column", column)]
}

pub const REPLACE_RULES: &[(&str, ValueRules)] = &[
    (
        "display",
        &[
            (
                "linear",
                &[
                    ("--lynx-display-toggle", "var(--lynx-display-linear)"),
                    ("--lynx-display", "linear"),
                    ("display", "flex"),
                ],
            ),
            (
                "flex",
                &[
                    ("--lynx-display-toggle", "var(--lynx-display-flex)"),
                    ("--lynx-display", "flex"),
                    ("display", "flex"),
                ],
            ),
        ],
    ),
    ("direction", &[("lynx-rtl", &[("direction", "rtl")])]),
    (
        "linear-orientation",
        &[
            ("horizontal", ORIENTATION_HORIZONTAL),
            ("horizontal-reverse", ORIENTATION_HORIZONTAL_REVERSE),
            ("vertical", ORIENTATION_VERTICAL),
            ("vertical-reverse", ORIENTATION_VERTICAL_REVERSE),
        ],
    ),
    (
        "linear-direction",
        &[
            ("row", ORIENTATION_HORIZONTAL),
            ("row-reverse", ORIENTATION_HORIZONTAL_REVERSE),
            ("column", ORIENTATION_VERTICAL),
            ("column-reverse", ORIENTATION_VERTICAL_REVERSE),
        ],
    ),
    (
        "linear-gravity",
        &[
            ("top", &gravity("flex-start", "flex-end", "flex-start", "flex-start")),
            ("bottom", &gravity("flex-end", "flex-start", "flex-start", "flex-start")),
            ("left", &gravity("flex-start", "flex-start", "flex-start", "flex-end")),
            ("right", &gravity("flex-start", "flex-start", "flex-end", "flex-start")),
            ("center-vertical", &gravity("center", "center", "flex-start", "flex-start")),
            ("center-horizontal", &gravity("flex-start", "flex-start", "center", "center")),
            ("start", &gravity("flex-start", "flex-start", "flex-start", "flex-start")),
            ("end", &gravity("flex-end", "flex-end", "flex-end", "flex-end")),
            ("center", &gravity("center", "center", "center", "center")),
            (
                "space-between",
                &gravity("space-between", "space-between", "space-between", "space-between"),
            ),
        ],
    ),
    (
        "linear-cross-gravity",
        &[
            ("start", &[("align-items", "start")]),
            ("end", &[("align-items", "end")]),
            ("center", &[("align-items", "center")]),
            ("stretch", &[("align-items", "stretch")]),
        ],
    ),
    (
        "linear-layout-gravity",
        &[
            ("none", &layout_gravity("auto", "auto")),
            ("stretch", &layout_gravity("stretch", "stretch")),
            ("top", &layout_gravity("start", "auto")),
            ("bottom", &layout_gravity("end", "auto")),
            ("left", &layout_gravity("auto", "start")),
            ("right", &layout_gravity("auto", "end")),
            ("start", &layout_gravity("start", "start")),
            ("end", &layout_gravity("end", "end")),
            ("center", &layout_gravity("center", "center")),
            ("center-vertical", &layout_gravity("center", "start")),
            ("center-horizontal", &layout_gravity("start", "center")),
            ("fill-vertical", &layout_gravity("stretch", "auto")),
            ("fill-horizontal", &layout_gravity("auto", "stretch")),
        ],
    ),
    (
        "justify-content",
        &[
            ("start", &[("justify-content", "flex-start")]),
            ("end", &[("justify-content", "flex-end")]),
            ("left", &[("justify-content", "--lynx-invalid-invalid-invalid")]),
            ("right", &[("justify-content", "--lynx-invalid-invalid-invalid")]),
        ],
    ),
];

// ─── Special rules ──────────────────────────────────────────────────

/// Value of a declaration emitted by a [`SpecialRule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialValue {
    Literal(&'static str),
    /// The triggering declaration's own value.
    Declared,
}

/// Declarations emitted by a [`SpecialRule`], in order.
pub type SpecialDeclarations = &'static [(&'static str, SpecialValue)];

pub const COLOR_GRADIENT: SpecialDeclarations = &[
    ("color", SpecialValue::Literal("transparent")),
    ("-webkit-background-clip", SpecialValue::Literal("text")),
    ("background-clip", SpecialValue::Literal("text")),
    ("--lynx-text-bg-color", SpecialValue::Declared),
];

pub const COLOR_PLAIN: SpecialDeclarations = &[
    ("--lynx-text-bg-color", SpecialValue::Literal("initial")),
    ("-webkit-background-clip", SpecialValue::Literal("initial")),
    ("background-clip", SpecialValue::Literal("initial")),
    ("color", SpecialValue::Declared),
];

pub const LINEAR_WEIGHT_BASIS: SpecialDeclarations =
    &[("--lynx-linear-weight-basis", SpecialValue::Literal("0"))];

pub const LINEAR_WEIGHT_SUM_CHILDREN: SpecialDeclarations =
    &[("--lynx-linear-weight-sum", SpecialValue::Declared)];

/// Value-dependent handling for one property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialRule {
    /// Gradient text: `linear-gradient(...)` values become a clipped text
    /// background; any other value resets it. Only when no table rule
    /// applies.
    Color,
    /// A non-zero weight also resets the basis.
    LinearWeight,
    /// Mirrored onto the element's children.
    LinearWeightSum,
}

impl SpecialRule {
    pub const ALL: [SpecialRule; 3] = [
        SpecialRule::Color,
        SpecialRule::LinearWeight,
        SpecialRule::LinearWeightSum,
    ];

    pub fn property(self) -> &'static str {
        match self {
            SpecialRule::Color => "color",
            SpecialRule::LinearWeight => "linear-weight",
            SpecialRule::LinearWeightSum => "linear-weight-sum",
        }
    }

    /// The rule for property `name`; letters compare case-insensitively,
    /// like the rule table.
    pub fn for_property(name: &[u16]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rule| eq_ignore_ascii_case(name, rule.property()))
    }

    /// Declarations emitted after whatever the table's action produced.
    ///
    /// `has_action` says whether the table matched the declaration.
    pub fn declarations(self, value: &[u16], has_action: bool) -> SpecialDeclarations {
        match self {
            SpecialRule::Color if has_action => &[],
            SpecialRule::Color if starts_with_ascii(value, "linear-gradient") => COLOR_GRADIENT,
            SpecialRule::Color => COLOR_PLAIN,
            SpecialRule::LinearWeight if is_zero(value) => &[],
            SpecialRule::LinearWeight => LINEAR_WEIGHT_BASIS,
            SpecialRule::LinearWeightSum => &[],
        }
    }

    /// Declarations for the element's children.
    pub fn children(self) -> SpecialDeclarations {
        match self {
            SpecialRule::LinearWeightSum => LINEAR_WEIGHT_SUM_CHILDREN,
            SpecialRule::Color | SpecialRule::LinearWeight => &[],
        }
    }
}

fn is_zero(value: &[u16]) -> bool {
    matches!(value, [unit] if *unit == u16::from(b'0'))
}

/// Case-sensitive prefix test against an ASCII literal.
fn starts_with_ascii(units: &[u16], prefix: &str) -> bool {
    units.len() >= prefix.len()
        && units
            .iter()
            .zip(prefix.bytes())
            .all(|(&unit, byte)| unit == u16::from(byte))
}

// ─── Rule set ───────────────────────────────────────────────────────

/// A compiled rule table plus the side table from id to action.
#[derive(Clone, Debug)]
pub struct RuleSet {
    table: OwnedRuleTable,
    /// `actions[id - 1]` is the action for `id`.
    actions: Vec<RuleAction>,
}

impl RuleSet {
    /// Compile the bundled legacy layout rules.
    pub fn bundled() -> Result<Self, BuildError> {
        Self::build(RENAME_RULES, REPLACE_RULES)
    }

    /// Compile arbitrary rename and replace rules.
    pub fn build(
        renames: &[(&str, &'static str)],
        replaces: &[(&str, ValueRules)],
    ) -> Result<Self, BuildError> {
        let mut builder = RuleTableBuilder::new();
        let mut actions = Vec::with_capacity(renames.len());

        for &(name, target) in renames {
            actions.push(RuleAction::Rename(target));
            builder.add_rename(name, next_id(&actions));
        }
        for &(name, values) in replaces {
            for &(value, replacement) in values {
                actions.push(RuleAction::Replace(replacement));
                builder.add_replace(name, value, next_id(&actions));
            }
        }

        let table = builder.build()?;
        debug!(
            rules = actions.len(),
            bytes = table.as_bytes().len(),
            "compiled rule set"
        );
        Ok(Self { table, actions })
    }

    pub fn table(&self) -> &OwnedRuleTable {
        &self.table
    }

    pub fn resolver(&self) -> RuleResolver<'_> {
        RuleResolver::new(self.table.as_table())
    }

    /// The action for `id`; `None` for [`RuleId::NONE`] or an unknown id.
    pub fn action(&self, id: RuleId) -> Option<RuleAction> {
        let index = usize::try_from(id.get()).ok()?.checked_sub(1)?;
        self.actions.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Id of the action just pushed.
fn next_id(actions: &[RuleAction]) -> u32 {
    u32::try_from(actions.len()).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
