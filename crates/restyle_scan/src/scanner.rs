//! Groups tokens into declarations.
//!
//! # Recovery
//!
//! Nothing aborts. When a construct stops looking like a declaration the
//! scanner skips to the next top-level `;`, `{`, or `}` and starts over.
//! A `{` is entered rather than skipped, so `a:hover { color: red }` yields
//! the inner declaration. A declaration whose value carries a lexical error
//! or an unclosed block at EOF is dropped.

use restyle_lexer_core::char_class::{self, eq_ignore_ascii_case};
use restyle_lexer_core::{Span, Token, TokenKind, Tokenizer};
use restyle_rules::RuleResolver;
use tracing::{debug, trace};

use crate::declaration::{Declaration, DeclarationSink};

/// Scan `source` and report every declaration to `sink` in source order.
pub fn tokenize(source: &[u16], resolver: RuleResolver<'_>, sink: &mut impl DeclarationSink) {
    DeclarationScanner::new(source, resolver).run(sink);
}

/// Open `{`, `(`/function, and `[` blocks inside one value.
///
/// Separators only end a value at the top level; `rgba(0, 0, 0, .5)` keeps
/// its commas and `url(data:...;base64,...)` keeps its semicolon.
#[derive(Clone, Copy, Debug, Default)]
struct BlockDepth {
    brace: u32,
    paren: u32,
    bracket: u32,
}

impl BlockDepth {
    fn is_top_level(self) -> bool {
        self.brace == 0 && self.paren == 0 && self.bracket == 0
    }

    /// Stray closers at depth 0 are ignored.
    fn apply(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::Function | TokenKind::LeftParen => self.paren += 1,
            TokenKind::LeftBracket => self.bracket += 1,
            TokenKind::LeftBrace => self.brace += 1,
            TokenKind::RightParen => self.paren = self.paren.saturating_sub(1),
            TokenKind::RightBracket => self.bracket = self.bracket.saturating_sub(1),
            TokenKind::RightBrace => self.brace = self.brace.saturating_sub(1),
            _ => {}
        }
    }
}

/// Trailing `!important` detection over the significant tokens of a value.
#[derive(Clone, Copy, Debug)]
enum Bang {
    None,
    /// Saw a top-level `!`; `before` is the value end preceding it.
    Bang { before: Option<u32> },
    /// Saw `! important`; holds unless another significant token follows.
    Important { before: Option<u32> },
}

/// How the value of a declaration ended.
enum ValueEnd {
    /// `;`, `}`, or EOF: the declaration is complete.
    Terminated { semicolon_end: u32 },
    /// A top-level `{`: the candidate was a selector.
    Block,
}

/// Stateful scanner over one buffer. State lives on the stack; the only
/// reference to the buffer is through the tokenizer.
pub struct DeclarationScanner<'a> {
    tokens: Tokenizer<'a>,
    resolver: RuleResolver<'a>,
}

impl<'a> DeclarationScanner<'a> {
    pub fn new(source: &'a [u16], resolver: RuleResolver<'a>) -> Self {
        Self {
            tokens: Tokenizer::new(source),
            resolver,
        }
    }

    /// Scan to EOF.
    pub fn run(mut self, sink: &mut impl DeclarationSink) {
        loop {
            let (start, token) = self.next_significant();
            match token.kind {
                TokenKind::Eof => return,
                TokenKind::Ident => self.declaration(start, token, sink),
                // Entering or leaving a block, or an empty statement.
                TokenKind::LeftBrace | TokenKind::RightBrace | TokenKind::Semicolon => {}
                kind => {
                    debug!(offset = start, %kind, "not a declaration; skipping statement");
                    self.recover(token);
                }
            }
        }
    }

    /// Next token with its start offset.
    #[inline]
    fn next(&mut self) -> (u32, Token) {
        let start = self.tokens.pos();
        (start, self.tokens.next_token())
    }

    /// Next token that is not whitespace, a comment, `<!--`, or `-->`.
    fn next_significant(&mut self) -> (u32, Token) {
        loop {
            let (start, token) = self.next();
            match token.kind {
                TokenKind::Whitespace | TokenKind::Comment | TokenKind::Cdo | TokenKind::Cdc => {}
                _ => return (start, token),
            }
        }
    }

    /// Skip through the next top-level `;`, `{`, or `}` (or to EOF),
    /// starting with the already-consumed `first`.
    fn recover(&mut self, first: Token) {
        let mut depth = BlockDepth::default();
        let mut token = first;
        loop {
            match token.kind {
                TokenKind::Eof => return,
                TokenKind::Semicolon | TokenKind::LeftBrace | TokenKind::RightBrace
                    if depth.is_top_level() =>
                {
                    return;
                }
                kind => depth.apply(kind),
            }
            token = self.tokens.next_token();
        }
    }

    fn declaration(&mut self, name_start: u32, name: Token, sink: &mut impl DeclarationSink) {
        let name = Span::new(name_start, name_start + name.len);

        let (colon_start, colon) = self.next_significant();
        if colon.kind != TokenKind::Colon {
            debug!(offset = colon_start, kind = %colon.kind, "expected ':' after property name");
            self.recover(colon);
            return;
        }

        let mut depth = BlockDepth::default();
        let mut bang = Bang::None;
        let mut value_start: Option<u32> = None;
        let mut value_end: Option<u32> = None;
        let mut malformed = false;

        let end = loop {
            let (start, token) = self.next();
            let top_level = depth.is_top_level();
            match token.kind {
                TokenKind::Eof => {
                    if !top_level {
                        debug!(offset = start, "block still open at EOF; dropping declaration");
                        return;
                    }
                    break ValueEnd::Terminated {
                        semicolon_end: self.tokens.source_len(),
                    };
                }
                TokenKind::Semicolon if top_level => {
                    break ValueEnd::Terminated {
                        semicolon_end: start + token.len,
                    };
                }
                TokenKind::RightBrace if top_level => {
                    break ValueEnd::Terminated {
                        semicolon_end: start,
                    };
                }
                TokenKind::LeftBrace if top_level => break ValueEnd::Block,
                TokenKind::Whitespace | TokenKind::Comment => continue,
                kind => {
                    if kind.is_error() || token.is_unterminated() {
                        malformed = true;
                    }
                    bang = if top_level {
                        self.advance_bang(bang, start, token, value_end)
                    } else {
                        Bang::None
                    };
                    depth.apply(kind);
                    value_start.get_or_insert(start);
                    value_end = Some(start + token.len);
                }
            }
        };

        let semicolon_end = match end {
            ValueEnd::Terminated { semicolon_end } => semicolon_end,
            ValueEnd::Block => {
                debug!(offset = name.start, "'{{' inside value; treating as a rule");
                return;
            }
        };

        let (is_important, value_end) = match bang {
            Bang::Important { before } => (true, before),
            Bang::None | Bang::Bang { .. } => (false, value_end),
        };
        let (Some(value_start), Some(value_end)) = (value_start, value_end) else {
            debug!(offset = name.start, "empty value; dropping declaration");
            return;
        };
        if malformed {
            debug!(offset = name.start, "malformed token in value; dropping declaration");
            return;
        }

        let value = Span::new(value_start, value_end);
        let outcome = self.resolver.resolve(
            self.tokens.slice(name.start, name.end),
            self.tokens.slice(value.start, value.end),
        );
        trace!(
            name = %name,
            value = %value,
            important = is_important,
            semicolon_end,
            outcome = %outcome,
            "declaration"
        );
        sink.on_declaration(Declaration {
            name,
            value,
            is_important,
            outcome,
            semicolon_end,
        });
    }

    /// Feed one significant top-level value token to the `!important`
    /// recognizer.
    fn advance_bang(&self, bang: Bang, start: u32, token: Token, value_end: Option<u32>) -> Bang {
        match (token.kind, bang) {
            (TokenKind::Delim, _)
                if self.tokens.slice(start, start + token.len)
                    == [char_class::EXCLAMATION_MARK] =>
            {
                Bang::Bang { before: value_end }
            }
            (TokenKind::Ident, Bang::Bang { before })
                if eq_ignore_ascii_case(
                    self.tokens.slice(start, start + token.len),
                    "important",
                ) =>
            {
                Bang::Important { before }
            }
            _ => Bang::None,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
