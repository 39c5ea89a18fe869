//! Reference host rewriter.
//!
//! Applies the outcomes the scanner reports to the source text, the way an
//! embedding host would: a renamed declaration keeps its value under the new
//! property name, a replaced declaration expands to its replacement list, and
//! `!important` is carried onto every emitted declaration. [`SpecialRule`]s
//! then append their own declarations, and may emit declarations for the
//! element's children. Text outside rewritten declarations is copied
//! verbatim, including the terminating `;` and any trivia around it.
//!
//! ```
//! use restyle::rewrite::rewrite;
//! use restyle::rules::RuleSet;
//!
//! let rules = RuleSet::bundled().unwrap();
//! assert_eq!(
//!     rewrite("height:1px;flex-direction:row;", &rules),
//!     "height:1px;--flex-direction:row;"
//! );
//! ```

use restyle_lexer_core::{TokenKind, Tokenizer};
use restyle_scan::{tokenize, Declaration, DeclarationSink};
use tracing::debug;

use crate::rules::{RuleAction, RuleSet, SpecialDeclarations, SpecialRule, SpecialValue};

const SEMICOLON: u16 = 0x3B;

/// Result of [`rewrite_with_children`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rewritten {
    /// The rewritten source.
    pub style: String,
    /// Declarations for the element's children, each `name:value;`.
    pub children: String,
}

/// Rewrite `source` against `rules`, dropping children declarations.
pub fn rewrite(source: &str, rules: &RuleSet) -> String {
    rewrite_with_children(source, rules).style
}

/// Rewrite a UTF-16 buffer. Unpaired surrogates become U+FFFD.
pub fn rewrite_units(source: &[u16], rules: &RuleSet) -> String {
    rewrite_units_with_children(source, rules).style
}

pub fn rewrite_with_children(source: &str, rules: &RuleSet) -> Rewritten {
    let units: Vec<u16> = source.encode_utf16().collect();
    rewrite_units_with_children(&units, rules)
}

pub fn rewrite_units_with_children(source: &[u16], rules: &RuleSet) -> Rewritten {
    let mut rewriter = Rewriter::new(source, rules);
    tokenize(source, rules.resolver(), &mut rewriter);
    rewriter.finish()
}

/// Text of an emitted value.
#[derive(Clone, Copy)]
enum Text<'a> {
    Source(&'a [u16]),
    Static(&'static str),
}

impl<'a> Text<'a> {
    fn of(value: SpecialValue, declared: &'a [u16]) -> Self {
        match value {
            SpecialValue::Literal(text) => Text::Static(text),
            SpecialValue::Declared => Text::Source(declared),
        }
    }

    fn push_to(self, out: &mut Vec<u16>) {
        match self {
            Text::Source(units) => out.extend_from_slice(units),
            Text::Static(text) => out.extend(text.encode_utf16()),
        }
    }
}

fn push_declaration(out: &mut Vec<u16>, name: &str, value: Text<'_>, is_important: bool) {
    out.extend(name.encode_utf16());
    out.push(u16::from(b':'));
    value.push_to(out);
    if is_important {
        out.extend(" !important".encode_utf16());
    }
}

struct Rewriter<'a> {
    source: &'a [u16],
    rules: &'a RuleSet,
    out: Vec<u16>,
    children: Vec<u16>,
    /// Everything before this offset has been written to `out`.
    copied: u32,
    rewritten: usize,
}

impl<'a> Rewriter<'a> {
    fn new(source: &'a [u16], rules: &'a RuleSet) -> Self {
        Self {
            source,
            rules,
            out: Vec::with_capacity(source.len() + 16),
            children: Vec::new(),
            copied: 0,
            rewritten: 0,
        }
    }

    fn copy_to(&mut self, end: u32) {
        let start = self.copied as usize;
        let end = (end as usize).min(self.source.len());
        if start < end {
            self.out.extend_from_slice(&self.source[start..end]);
            self.copied = u32::try_from(end).unwrap_or(u32::MAX);
        }
    }

    /// Emit one declaration of a rewrite that began at `out[start]`,
    /// separating it from the previous one with `;`.
    fn emit(&mut self, start: usize, name: &str, value: Text<'_>, is_important: bool) {
        if self.out.len() > start {
            self.out.push(SEMICOLON);
        }
        push_declaration(&mut self.out, name, value, is_important);
    }

    fn finish(mut self) -> Rewritten {
        let len = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
        self.copy_to(len);
        debug!(
            rewritten = self.rewritten,
            children = !self.children.is_empty(),
            "rewrite complete"
        );
        Rewritten {
            style: String::from_utf16_lossy(&self.out),
            children: String::from_utf16_lossy(&self.children),
        }
    }
}

impl DeclarationSink for Rewriter<'_> {
    fn on_declaration(&mut self, declaration: Declaration) {
        let source = self.source;
        let value = declaration.value.slice(source);
        let important = declaration.is_important;
        let action = self.rules.action(declaration.outcome.id());
        let special = SpecialRule::for_property(declaration.name.slice(source));

        if let Some(rule) = special {
            for &(name, emitted) in rule.children() {
                push_declaration(&mut self.children, name, Text::of(emitted, value), important);
                self.children.push(SEMICOLON);
            }
        }

        let extra: SpecialDeclarations = match special {
            Some(rule) => rule.declarations(value, action.is_some()),
            None => &[],
        };
        if action.is_none() && extra.is_empty() {
            return;
        }

        let end = rewrite_end(source, &declaration);
        self.copy_to(declaration.name.start);
        let start = self.out.len();

        match action {
            Some(RuleAction::Rename(target)) => {
                self.emit(start, target, Text::Source(value), important);
            }
            Some(RuleAction::Replace(decls)) => {
                for &(name, text) in decls {
                    self.emit(start, name, Text::Static(text), important);
                }
            }
            None => {}
        }
        for &(name, emitted) in extra {
            self.emit(start, name, Text::of(emitted, value), important);
        }

        self.copied = end;
        self.rewritten += 1;
    }
}

/// End of the text a rewrite replaces: the value, plus a trailing
/// `!important` when present. Trivia and the terminator stay in place.
fn rewrite_end(source: &[u16], declaration: &Declaration) -> u32 {
    let start = declaration.value.end;
    if !declaration.is_important {
        return start;
    }
    let end = (declaration.semicolon_end as usize).min(source.len());
    let Some(tail) = source.get(start as usize..end) else {
        return start;
    };

    let mut tokens = Tokenizer::new(tail);
    let mut last = 0;
    loop {
        let token = tokens.next_token();
        match token.kind {
            TokenKind::Eof | TokenKind::Semicolon | TokenKind::RightBrace => break,
            kind if kind.is_trivia() => {}
            _ => last = tokens.pos(),
        }
    }
    start + last
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
