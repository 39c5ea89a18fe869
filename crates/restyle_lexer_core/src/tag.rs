//! Token kinds and the `(kind, len, flags)` token record.
//!
//! Discriminants are grouped into semantic ranges:
//!
//! | Range   | Group        |
//! |---------|--------------|
//! | 0-15    | Names & literals |
//! | 16-31   | Numerics     |
//! | 32-63   | Punctuation  |
//! | 64-79   | Trivia       |
//! | 240-254 | Lexical errors |
//! | 255     | Eof          |

use bitflags::bitflags;

/// CSS token kind (CSS Syntax Level 3, §4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // Names & literals
    Ident = 0,
    Function = 1,
    AtKeyword = 2,
    Hash = 3,
    String = 4,
    Url = 5,
    Delim = 6,

    // Numerics
    Number = 16,
    Percentage = 17,
    Dimension = 18,

    // Punctuation
    Colon = 32,
    Semicolon = 33,
    Comma = 34,
    LeftBracket = 35,
    RightBracket = 36,
    LeftParen = 37,
    RightParen = 38,
    LeftBrace = 39,
    RightBrace = 40,
    Cdo = 41,
    Cdc = 42,

    // Trivia
    Whitespace = 64,
    Comment = 65,

    // Lexical errors
    BadString = 240,
    BadUrl = 241,

    Eof = 255,
}

const _: () = assert!(std::mem::size_of::<TokenKind>() == 1);

impl TokenKind {
    /// Fixed source text for tokens that always have the same spelling.
    pub fn lexeme(self) -> Option<&'static str> {
        match self {
            Self::Colon => Some(":"),
            Self::Semicolon => Some(";"),
            Self::Comma => Some(","),
            Self::LeftBracket => Some("["),
            Self::RightBracket => Some("]"),
            Self::LeftParen => Some("("),
            Self::RightParen => Some(")"),
            Self::LeftBrace => Some("{"),
            Self::RightBrace => Some("}"),
            Self::Cdo => Some("<!--"),
            Self::Cdc => Some("-->"),
            _ => None,
        }
    }

    /// Whitespace or comment.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Self::BadString | Self::BadUrl)
    }

    /// Stable name used by the token dump.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ident => "ident",
            Self::Function => "function",
            Self::AtKeyword => "at-keyword",
            Self::Hash => "hash",
            Self::String => "string",
            Self::Url => "url",
            Self::Delim => "delim",
            Self::Number => "number",
            Self::Percentage => "percentage",
            Self::Dimension => "dimension",
            Self::Colon => "colon",
            Self::Semicolon => "semicolon",
            Self::Comma => "comma",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Cdo => "cdo",
            Self::Cdc => "cdc",
            Self::Whitespace => "whitespace",
            Self::Comment => "comment",
            Self::BadString => "bad-string",
            Self::BadUrl => "bad-url",
            Self::Eof => "eof",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Per-token lexical facts the scanner needs without re-reading text.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// A string, url, or comment ran into EOF before its terminator.
        const UNTERMINATED = 1 << 0;
        /// The token body contains at least one escape sequence.
        const ESCAPED = 1 << 1;
    }
}

/// One token: kind, length in code units, and lexical flags.
///
/// The start offset is implicit: the tokenizer's position before the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub len: u32,
    pub flags: TokenFlags,
}

const _: () = assert!(std::mem::size_of::<Token>() <= 8);

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, len: u32) -> Self {
        Self {
            kind,
            len,
            flags: TokenFlags::empty(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        self.flags.contains(TokenFlags::UNTERMINATED)
    }
}
