//! Code-unit classification (CSS Syntax Level 3, §4.2 definitions).
//!
//! Every UTF-16 code unit maps to exactly one [`CharClass`] using range
//! comparisons only. The predicates are what the tokenizer branches on;
//! [`classify`] is the coarse view used for dispatch tables and tests.
//!
//! The code unit `0` doubles as the EOF marker: [`Cursor`](crate::Cursor)
//! returns it for any read past the end of the buffer. An interior `U+0000`
//! classifies the same way; the cursor tells the two apart by position.

/// Coarse class of one UTF-16 code unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CharClass {
    /// `0`: end of input (or an interior NUL).
    Eof,
    /// Space, tab, LF, CR, FF.
    Whitespace,
    /// `0`-`9`.
    Digit,
    /// `a`-`z` and `A`-`Z`, folded to one class.
    Letter,
    /// `-`, `_`, and every code unit `>= 0x80`.
    NameContinue,
    /// `\`.
    EscapeStart,
    /// `"` or `'`.
    Quote,
    /// U+0001–U+0008, U+000B, U+000E–U+001F, U+007F.
    NonPrintable,
    /// Everything else (punctuation and symbols).
    Other,
}

pub const TAB: u16 = 0x09;
pub const LINE_FEED: u16 = 0x0A;
pub const FORM_FEED: u16 = 0x0C;
pub const CARRIAGE_RETURN: u16 = 0x0D;
pub const SPACE: u16 = 0x20;
pub const QUOTATION_MARK: u16 = 0x22;
pub const NUMBER_SIGN: u16 = 0x23;
pub const PERCENT_SIGN: u16 = 0x25;
pub const APOSTROPHE: u16 = 0x27;
pub const LEFT_PARENTHESIS: u16 = 0x28;
pub const RIGHT_PARENTHESIS: u16 = 0x29;
pub const ASTERISK: u16 = 0x2A;
pub const PLUS_SIGN: u16 = 0x2B;
pub const HYPHEN_MINUS: u16 = 0x2D;
pub const FULL_STOP: u16 = 0x2E;
pub const SOLIDUS: u16 = 0x2F;
pub const LESS_THAN_SIGN: u16 = 0x3C;
pub const EXCLAMATION_MARK: u16 = 0x21;
pub const GREATER_THAN_SIGN: u16 = 0x3E;
pub const REVERSE_SOLIDUS: u16 = 0x5C;
pub const LOW_LINE: u16 = 0x5F;

/// Classify one code unit.
#[inline]
pub fn classify(unit: u16) -> CharClass {
    match unit {
        0 => CharClass::Eof,
        TAB | LINE_FEED | FORM_FEED | CARRIAGE_RETURN | SPACE => CharClass::Whitespace,
        0x30..=0x39 => CharClass::Digit,
        0x41..=0x5A | 0x61..=0x7A => CharClass::Letter,
        HYPHEN_MINUS | LOW_LINE | 0x80..=u16::MAX => CharClass::NameContinue,
        REVERSE_SOLIDUS => CharClass::EscapeStart,
        QUOTATION_MARK | APOSTROPHE => CharClass::Quote,
        0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F => CharClass::NonPrintable,
        _ => CharClass::Other,
    }
}

#[inline]
pub fn is_digit(unit: u16) -> bool {
    (0x30..=0x39).contains(&unit)
}

#[inline]
pub fn is_hex_digit(unit: u16) -> bool {
    is_digit(unit) || (0x41..=0x46).contains(&unit) || (0x61..=0x66).contains(&unit)
}

#[inline]
pub fn is_letter(unit: u16) -> bool {
    (0x41..=0x5A).contains(&unit) || (0x61..=0x7A).contains(&unit)
}

/// A letter, `_`, or any non-ASCII code unit.
#[inline]
pub fn is_name_start(unit: u16) -> bool {
    is_letter(unit) || unit == LOW_LINE || unit >= 0x80
}

/// A name-start code unit, a digit, or `-`.
#[inline]
pub fn is_name(unit: u16) -> bool {
    is_name_start(unit) || is_digit(unit) || unit == HYPHEN_MINUS
}

/// LF, CR, or FF (the input is not preprocessed, so all three count).
#[inline]
pub fn is_newline(unit: u16) -> bool {
    matches!(unit, LINE_FEED | CARRIAGE_RETURN | FORM_FEED)
}

#[inline]
pub fn is_whitespace(unit: u16) -> bool {
    is_newline(unit) || unit == TAB || unit == SPACE
}

#[inline]
pub fn is_quote(unit: u16) -> bool {
    unit == QUOTATION_MARK || unit == APOSTROPHE
}

#[inline]
pub fn is_non_printable(unit: u16) -> bool {
    matches!(unit, 0x00..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F)
}

/// §4.3.8: `first` is `\` and `second` is neither a newline nor EOF.
#[inline]
pub fn is_valid_escape(first: u16, second: u16) -> bool {
    first == REVERSE_SOLIDUS && second != 0 && !is_newline(second)
}

/// §4.3.9: would these three code units start an ident sequence?
pub fn starts_identifier(first: u16, second: u16, third: u16) -> bool {
    match first {
        HYPHEN_MINUS => {
            is_name_start(second) || second == HYPHEN_MINUS || is_valid_escape(second, third)
        }
        REVERSE_SOLIDUS => is_valid_escape(first, second),
        _ => is_name_start(first),
    }
}

/// §4.3.10: would these three code units start a number?
pub fn starts_number(first: u16, second: u16, third: u16) -> bool {
    match first {
        PLUS_SIGN | HYPHEN_MINUS => {
            is_digit(second) || (second == FULL_STOP && is_digit(third))
        }
        FULL_STOP => is_digit(second),
        _ => is_digit(first),
    }
}

/// Lowercase an ASCII letter; every other code unit is returned unchanged.
#[inline]
pub fn fold_ascii(unit: u16) -> u16 {
    if (0x41..=0x5A).contains(&unit) {
        unit | 0x20
    } else {
        unit
    }
}

/// Compare a code-unit slice against an ASCII-lowercase literal, folding
/// ASCII letters only.
pub fn eq_ignore_ascii_case(units: &[u16], lowercase: &str) -> bool {
    units.len() == lowercase.len()
        && units
            .iter()
            .zip(lowercase.bytes())
            .all(|(&unit, byte)| fold_ascii(unit) == u16::from(byte))
}

/// Like [`eq_ignore_ascii_case`], but compares the name with its escapes
/// decoded, so `u\72l` matches `url`. `units` must be a consumed name.
pub fn name_eq_ignore_ascii_case(units: &[u16], lowercase: &str) -> bool {
    let mut expected = lowercase.bytes();
    let mut i = 0;
    while i < units.len() {
        let (code, next) = decode_name_unit(units, i);
        i = next;
        let matches = expected.next().is_some_and(|byte| {
            u16::try_from(code).is_ok_and(|unit| fold_ascii(unit) == u16::from(byte))
        });
        if !matches {
            return false;
        }
    }
    expected.next().is_none()
}

/// Decode the code point at `i`, returning it and the index just past it.
fn decode_name_unit(units: &[u16], i: usize) -> (u32, usize) {
    let unit = units[i];
    let Some(&first) = units.get(i + 1).filter(|_| unit == REVERSE_SOLIDUS) else {
        return (u32::from(unit), i + 1);
    };
    if !is_hex_digit(first) {
        return (u32::from(first), i + 2);
    }
    let mut code = 0u32;
    let mut end = i + 1;
    while end < units.len() && end - (i + 1) < 6 && is_hex_digit(units[end]) {
        code = code * 16 + hex_value(units[end]);
        end += 1;
    }
    match units.get(end) {
        Some(&CARRIAGE_RETURN) if units.get(end + 1) == Some(&LINE_FEED) => end += 2,
        Some(&ws) if is_whitespace(ws) => end += 1,
        _ => {}
    }
    (code, end)
}

#[inline]
fn hex_value(unit: u16) -> u32 {
    char::from_u32(u32::from(unit))
        .and_then(|c| c.to_digit(16))
        .unwrap_or(0)
}
