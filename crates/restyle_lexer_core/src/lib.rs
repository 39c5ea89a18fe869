//! Low-level CSS tokenizer for restyle.
//!
//! Scans a caller-owned UTF-16 buffer (`&[u16]`) and produces
//! `(TokenKind, len)` pairs with zero heap allocation. The crate does not
//! group tokens into declarations or consult any rule table; that happens in
//! `restyle_scan`.
//!
//! # Layers
//!
//! - [`char_class`]: O(1) classification of one code unit.
//! - [`Cursor`]: bounds-checked offset into the borrowed buffer.
//! - [`Tokenizer`]: the CSS Syntax Level 3 token consumers.
//!
//! # Example
//!
//! ```
//! use restyle_lexer_core::{Tokenizer, TokenKind};
//!
//! let source: Vec<u16> = "width: 10px".encode_utf16().collect();
//! let kinds: Vec<TokenKind> = Tokenizer::new(&source).map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Ident, TokenKind::Colon, TokenKind::Whitespace, TokenKind::Dimension]
//! );
//! ```

pub mod char_class;
mod cursor;
mod span;
mod tag;
mod tokenizer;

pub use cursor::Cursor;
pub use span::Span;
pub use tag::{Token, TokenFlags, TokenKind};
pub use tokenizer::{tokenize_units, Tokenizer};
