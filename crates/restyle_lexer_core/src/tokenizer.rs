//! Hand-written CSS tokenizer producing `(TokenKind, len, flags)` records.
//!
//! Follows the consumers of CSS Syntax Level 3 §4.3 without the
//! preprocessing pass: CR, CRLF and FF are recognized where a newline is
//! expected, and `U+0000` is an ordinary (non-name) code unit. Values are
//! never decoded; a token only reports how far it reaches. The one exception
//! is a function name carrying escapes, which is decoded on the fly to test
//! for `url(`.
//!
//! # Design
//!
//! Main dispatch matches on the current code unit once it fits in a byte;
//! everything above `0xFF` is a name code unit and goes straight to the
//! ident consumer. Each arm calls a focused method that advances the cursor
//! and returns a [`Token`]. Every non-EOF arm consumes at least one code
//! unit, which bounds the total work by the buffer length.

use crate::char_class::{
    self, is_digit, is_hex_digit, is_name, is_newline, is_non_printable, is_quote,
    is_valid_escape, is_whitespace, starts_identifier, starts_number,
};
use crate::cursor::Cursor;
use crate::tag::{Token, TokenFlags, TokenKind};

const RIGHT_PAREN: u16 = char_class::RIGHT_PARENTHESIS;

/// Pure, allocation-free tokenizer over a borrowed UTF-16 buffer.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(units: &'a [u16]) -> Self {
        Self {
            cursor: Cursor::new(units),
        }
    }

    /// Offset of the next token.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        self.cursor.source_len()
    }

    /// Code units in `start..end`, clamped to the buffer.
    #[inline]
    pub fn slice(&self, start: u32, end: u32) -> &'a [u16] {
        self.cursor.slice(start, end)
    }

    /// Produce the next token.
    ///
    /// Returns [`TokenKind::Eof`] with `len == 0` once the buffer is
    /// exhausted; later calls keep returning it.
    pub fn next_token(&mut self) -> Token {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return Token::new(TokenKind::Eof, 0);
        }
        let unit = self.cursor.current();
        let Ok(byte) = u8::try_from(unit) else {
            return self.ident_like(start);
        };
        match byte {
            b' ' | b'\t' | b'\n' | b'\r' | 0x0C => self.whitespace(start),
            b'"' | b'\'' => self.string(start, unit),
            b'#' => self.hash(start),
            b'(' => self.single(start, TokenKind::LeftParen),
            b')' => self.single(start, TokenKind::RightParen),
            b'+' => self.plus(start),
            b',' => self.single(start, TokenKind::Comma),
            b'-' => self.minus(start),
            b'.' => self.full_stop(start),
            b'/' => self.solidus(start),
            b':' => self.single(start, TokenKind::Colon),
            b';' => self.single(start, TokenKind::Semicolon),
            b'<' => self.less_than(start),
            b'@' => self.at_sign(start),
            b'[' => self.single(start, TokenKind::LeftBracket),
            b']' => self.single(start, TokenKind::RightBracket),
            b'{' => self.single(start, TokenKind::LeftBrace),
            b'}' => self.single(start, TokenKind::RightBrace),
            b'\\' => self.reverse_solidus(start),
            b'0'..=b'9' => self.numeric(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | 0x80..=0xFF => self.ident_like(start),
            _ => self.single(start, TokenKind::Delim),
        }
    }

    #[inline]
    fn token(&self, start: u32, kind: TokenKind) -> Token {
        Token::new(kind, self.cursor.pos() - start)
    }

    #[inline]
    fn single(&mut self, start: u32, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.token(start, kind)
    }

    // ─── Trivia ────────────────────────────────────────────────────

    fn whitespace(&mut self, start: u32) -> Token {
        self.cursor.eat_whitespace();
        self.token(start, TokenKind::Whitespace)
    }

    fn solidus(&mut self, start: u32) -> Token {
        if self.cursor.peek() != u16::from(b'*') {
            return self.single(start, TokenKind::Delim);
        }
        self.cursor.advance_n(2);
        loop {
            if self.cursor.is_eof() {
                return self
                    .token(start, TokenKind::Comment)
                    .with_flags(TokenFlags::UNTERMINATED);
            }
            if self.cursor.current() == u16::from(b'*') && self.cursor.peek() == u16::from(b'/') {
                self.cursor.advance_n(2);
                return self.token(start, TokenKind::Comment);
            }
            self.cursor.advance();
        }
    }

    // ─── Punctuation with lookahead ────────────────────────────────

    fn plus(&mut self, start: u32) -> Token {
        if self.starts_number() {
            self.numeric(start)
        } else {
            self.single(start, TokenKind::Delim)
        }
    }

    fn minus(&mut self, start: u32) -> Token {
        if self.starts_number() {
            return self.numeric(start);
        }
        if self.cursor.peek() == u16::from(b'-') && self.cursor.peek2() == u16::from(b'>') {
            self.cursor.advance_n(3);
            return self.token(start, TokenKind::Cdc);
        }
        if self.starts_identifier() {
            return self.ident_like(start);
        }
        self.single(start, TokenKind::Delim)
    }

    fn full_stop(&mut self, start: u32) -> Token {
        if self.starts_number() {
            self.numeric(start)
        } else {
            self.single(start, TokenKind::Delim)
        }
    }

    fn less_than(&mut self, start: u32) -> Token {
        if self.cursor.peek() == u16::from(b'!')
            && self.cursor.peek2() == u16::from(b'-')
            && self.cursor.peek3() == u16::from(b'-')
        {
            self.cursor.advance_n(4);
            return self.token(start, TokenKind::Cdo);
        }
        self.single(start, TokenKind::Delim)
    }

    fn at_sign(&mut self, start: u32) -> Token {
        let (first, second, third) =
            (self.cursor.peek(), self.cursor.peek2(), self.cursor.peek3());
        if !starts_identifier(first, second, third) {
            return self.single(start, TokenKind::Delim);
        }
        self.cursor.advance();
        let flags = self.consume_name();
        self.token(start, TokenKind::AtKeyword).with_flags(flags)
    }

    fn hash(&mut self, start: u32) -> Token {
        let (first, second) = (self.cursor.peek(), self.cursor.peek2());
        if !(is_name(first) || is_valid_escape(first, second)) {
            return self.single(start, TokenKind::Delim);
        }
        self.cursor.advance();
        let flags = self.consume_name();
        self.token(start, TokenKind::Hash).with_flags(flags)
    }

    fn reverse_solidus(&mut self, start: u32) -> Token {
        if is_valid_escape(self.cursor.current(), self.cursor.peek()) {
            self.ident_like(start)
        } else {
            self.single(start, TokenKind::Delim)
        }
    }

    // ─── Names ─────────────────────────────────────────────────────

    /// Ident, function, or url token (§4.3.4).
    fn ident_like(&mut self, start: u32) -> Token {
        let flags = self.consume_name();
        if self.cursor.current() != u16::from(b'(') {
            return self.token(start, TokenKind::Ident).with_flags(flags);
        }
        let name = self.cursor.slice_from(start);
        self.cursor.advance();
        let is_url = if flags.contains(TokenFlags::ESCAPED) {
            char_class::name_eq_ignore_ascii_case(name, "url")
        } else {
            char_class::eq_ignore_ascii_case(name, "url")
        };
        if is_url {
            let mut probe = self.cursor;
            probe.eat_whitespace();
            if !is_quote(probe.current()) {
                return self.url(start);
            }
        }
        self.token(start, TokenKind::Function).with_flags(flags)
    }

    /// Consume name code units and escapes (§4.3.11).
    fn consume_name(&mut self) -> TokenFlags {
        let mut flags = TokenFlags::empty();
        while !self.cursor.is_eof() {
            let unit = self.cursor.current();
            if is_name(unit) {
                self.cursor.advance();
            } else if is_valid_escape(unit, self.cursor.peek()) {
                self.cursor.advance();
                self.escape_body();
                flags |= TokenFlags::ESCAPED;
            } else {
                break;
            }
        }
        flags
    }

    /// Consume what follows a `\` (§4.3.7): up to six hex digits plus one
    /// optional whitespace (CRLF counts as one), or one literal code point.
    fn escape_body(&mut self) {
        if is_hex_digit(self.cursor.current()) {
            let mut digits = 0;
            while digits < 6 && is_hex_digit(self.cursor.current()) {
                self.cursor.advance();
                digits += 1;
            }
            if is_whitespace(self.cursor.current()) {
                if self.cursor.current() == char_class::CARRIAGE_RETURN
                    && self.cursor.peek() == char_class::LINE_FEED
                {
                    self.cursor.advance_n(2);
                } else {
                    self.cursor.advance();
                }
            }
        } else if is_surrogate_pair(self.cursor.current(), self.cursor.peek()) {
            self.cursor.advance_n(2);
        } else {
            self.cursor.advance();
        }
    }

    // ─── Numbers ───────────────────────────────────────────────────

    fn starts_number(&self) -> bool {
        starts_number(
            self.cursor.current(),
            self.cursor.peek(),
            self.cursor.peek2(),
        )
    }

    fn starts_identifier(&self) -> bool {
        starts_identifier(
            self.cursor.current(),
            self.cursor.peek(),
            self.cursor.peek2(),
        )
    }

    /// Number, percentage, or dimension (§4.3.3).
    fn numeric(&mut self, start: u32) -> Token {
        let sign = self.cursor.current();
        if sign == char_class::PLUS_SIGN || sign == char_class::HYPHEN_MINUS {
            self.cursor.advance();
        }
        self.cursor.eat_while(is_digit);
        if self.cursor.current() == char_class::FULL_STOP && is_digit(self.cursor.peek()) {
            self.cursor.advance();
            self.cursor.eat_while(is_digit);
        }
        if matches!(self.cursor.current(), 0x45 | 0x65) {
            let next = self.cursor.peek();
            let signed = next == char_class::PLUS_SIGN || next == char_class::HYPHEN_MINUS;
            if is_digit(next) || (signed && is_digit(self.cursor.peek2())) {
                self.cursor.advance_n(if signed { 2 } else { 1 });
                self.cursor.eat_while(is_digit);
            }
        }

        if self.starts_identifier() {
            let flags = self.consume_name();
            self.token(start, TokenKind::Dimension).with_flags(flags)
        } else if self.cursor.current() == char_class::PERCENT_SIGN {
            self.single(start, TokenKind::Percentage)
        } else {
            self.token(start, TokenKind::Number)
        }
    }

    // ─── Strings & URLs ────────────────────────────────────────────

    /// String token (§4.3.5). An unescaped newline ends it as `BadString`
    /// without consuming the newline.
    fn string(&mut self, start: u32, quote: u16) -> Token {
        self.cursor.advance();
        let mut flags = TokenFlags::empty();
        loop {
            if self.cursor.is_eof() {
                return self
                    .token(start, TokenKind::String)
                    .with_flags(flags | TokenFlags::UNTERMINATED);
            }
            let unit = self.cursor.current();
            if unit == quote {
                self.cursor.advance();
                return self.token(start, TokenKind::String).with_flags(flags);
            }
            if is_newline(unit) {
                return self.token(start, TokenKind::BadString).with_flags(flags);
            }
            self.cursor.advance();
            if unit == char_class::REVERSE_SOLIDUS && !self.cursor.is_eof() {
                flags |= TokenFlags::ESCAPED;
                if is_newline(self.cursor.current()) {
                    self.cursor.eat_newline();
                } else {
                    self.escape_body();
                }
            }
        }
    }

    /// Unquoted url token (§4.3.6). The cursor sits just past `url(`.
    fn url(&mut self, start: u32) -> Token {
        let mut flags = TokenFlags::empty();
        self.cursor.eat_whitespace();
        loop {
            if self.cursor.is_eof() {
                return self
                    .token(start, TokenKind::Url)
                    .with_flags(flags | TokenFlags::UNTERMINATED);
            }
            let unit = self.cursor.current();
            if unit == RIGHT_PAREN {
                self.cursor.advance();
                return self.token(start, TokenKind::Url).with_flags(flags);
            }
            if is_whitespace(unit) {
                self.cursor.eat_whitespace();
                if self.cursor.is_eof() {
                    return self
                        .token(start, TokenKind::Url)
                        .with_flags(flags | TokenFlags::UNTERMINATED);
                }
                if self.cursor.current() == RIGHT_PAREN {
                    self.cursor.advance();
                    return self.token(start, TokenKind::Url).with_flags(flags);
                }
                return self.bad_url(start, flags);
            }
            if is_quote(unit) || unit == char_class::LEFT_PARENTHESIS || is_non_printable(unit) {
                return self.bad_url(start, flags);
            }
            if unit == char_class::REVERSE_SOLIDUS {
                if !is_valid_escape(unit, self.cursor.peek()) {
                    return self.bad_url(start, flags);
                }
                self.cursor.advance();
                self.escape_body();
                flags |= TokenFlags::ESCAPED;
                continue;
            }
            self.cursor.advance();
        }
    }

    /// Consume the remnants of a bad url (§4.3.14) up to, not including,
    /// the next unescaped `)`.
    fn bad_url(&mut self, start: u32, flags: TokenFlags) -> Token {
        while !self.cursor.is_eof() {
            let unit = self.cursor.current();
            if unit == RIGHT_PAREN {
                break;
            }
            if is_valid_escape(unit, self.cursor.peek()) {
                self.cursor.advance();
                self.escape_body();
            } else {
                self.cursor.advance();
            }
        }
        self.token(start, TokenKind::BadUrl).with_flags(flags)
    }
}

#[inline]
fn is_surrogate_pair(high: u16, low: u16) -> bool {
    (0xD800..=0xDBFF).contains(&high) && (0xDC00..=0xDFFF).contains(&low)
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

/// Tokenize a whole buffer, excluding the trailing `Eof`.
///
/// Allocates the result vector; the scan path uses [`Tokenizer`] directly.
pub fn tokenize_units(units: &[u16]) -> Vec<Token> {
    Tokenizer::new(units).collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
