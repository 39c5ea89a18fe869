//! Declaration scanner for restyle.
//!
//! [`tokenize`] walks a UTF-16 buffer token by token, recognizes
//! `name: value [!important]` declarations, resolves each against a
//! [`RuleResolver`], and hands the result to a [`DeclarationSink`] in source
//! order. Nothing on this path allocates.
//!
//! ```
//! use restyle_rules::{RuleResolver, RuleTableBuilder};
//! use restyle_scan::{tokenize, Declaration};
//!
//! let table = RuleTableBuilder::new().rename("color", 7).build().unwrap();
//! let source: Vec<u16> = "Color: RED !important;".encode_utf16().collect();
//!
//! let mut seen = Vec::new();
//! tokenize(&source, RuleResolver::new(table.as_table()), &mut |d: Declaration| seen.push(d));
//!
//! assert_eq!(seen.len(), 1);
//! assert!(seen[0].is_important);
//! assert_eq!(seen[0].outcome.id().get(), 7);
//! ```

mod declaration;
mod scanner;

pub use declaration::{Declaration, DeclarationSink};
pub use restyle_lexer_core::Span;
pub use restyle_rules::{RuleId, RuleOutcome, RuleResolver};
pub use scanner::{tokenize, DeclarationScanner};
