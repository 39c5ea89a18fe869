//! Bounds-checked cursor over a borrowed UTF-16 buffer.
//!
//! Reads past the end yield the EOF code unit `0` instead of panicking.
//! Advancing clamps at the buffer length, so `0 <= pos <= len` holds at
//! every observation point and `pos` never decreases.
//!
//! # Interior NUL
//!
//! A `U+0000` inside the buffer also reads as `0`. The cursor distinguishes
//! it from EOF by comparing `pos` against the buffer length; see
//! [`is_eof()`](Cursor::is_eof).

use crate::char_class;

/// Cursor over a caller-owned `&[u16]`.
///
/// [`Copy`], so the tokenizer can snapshot and restore it for lookahead.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    units: &'a [u16],
    pos: u32,
    len: u32,
}

/// &[u16] = 16 (fat pointer), u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a cursor at position 0.
    ///
    /// Buffers longer than `u32::MAX` code units are truncated to the first
    /// `u32::MAX` units; offsets on the host boundary are 32-bit.
    pub fn new(units: &'a [u16]) -> Self {
        let len = u32::try_from(units.len()).unwrap_or(u32::MAX);
        Self {
            units,
            pos: 0,
            len,
        }
    }

    /// Code unit at `pos + offset`, or `0` past the end.
    #[inline]
    fn at(&self, offset: u32) -> u16 {
        let index = self.pos.saturating_add(offset);
        if index < self.len {
            self.units.get(index as usize).copied().unwrap_or(0)
        } else {
            0
        }
    }

    /// Code unit at the current position, `0` at EOF.
    #[inline]
    pub fn current(&self) -> u16 {
        self.at(0)
    }

    #[inline]
    pub fn peek(&self) -> u16 {
        self.at(1)
    }

    #[inline]
    pub fn peek2(&self) -> u16 {
        self.at(2)
    }

    /// Three ahead; only `<!--` needs this much lookahead.
    #[inline]
    pub fn peek3(&self) -> u16 {
        self.at(3)
    }

    /// Advance one code unit. No-op at EOF.
    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.len {
            self.pos += 1;
        }
    }

    /// Advance `n` code units, clamped to the buffer length.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos = self.pos.saturating_add(n).min(self.len);
    }

    /// `true` once every code unit has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.len
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        self.len
    }

    /// The code units in `start..end`, clamped to the buffer.
    pub fn slice(&self, start: u32, end: u32) -> &'a [u16] {
        let end = end.min(self.len) as usize;
        let start = (start as usize).min(end);
        self.units.get(start..end).unwrap_or(&[])
    }

    /// The code units from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a [u16] {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` holds for the current code unit and the cursor
    /// is not at EOF.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u16) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Skip a run of CSS whitespace.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(char_class::is_whitespace);
    }

    /// Advance past one newline, treating CRLF as a single newline.
    pub fn eat_newline(&mut self) {
        if self.current() == char_class::CARRIAGE_RETURN && self.peek() == char_class::LINE_FEED {
            self.advance_n(2);
        } else if char_class::is_newline(self.current()) {
            self.advance();
        }
    }
}
