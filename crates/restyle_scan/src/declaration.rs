use restyle_lexer_core::Span;
use restyle_rules::RuleOutcome;

/// One recognized `name: value [!important]` construct.
///
/// All offsets are UTF-16 code units into the scanned buffer and satisfy
/// `name.start <= name.end <= value.start <= value.end <= semicolon_end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: Span,
    /// Value with leading/trailing trivia and `!important` excluded.
    pub value: Span,
    pub is_important: bool,
    pub outcome: RuleOutcome,
    /// Just past the terminating `;`, the buffer length at EOF, or the
    /// offset of the `}` that closed the enclosing block.
    pub semicolon_end: u32,
}

impl Declaration {
    /// Name start through value end; the range a host rewrites.
    pub fn full_span(&self) -> Span {
        Span::new(self.name.start, self.value.end)
    }
}

/// Receives declarations in source order. Called synchronously; must not
/// start a nested scan of the same buffer.
pub trait DeclarationSink {
    fn on_declaration(&mut self, declaration: Declaration);
}

impl<F> DeclarationSink for F
where
    F: FnMut(Declaration),
{
    #[inline]
    fn on_declaration(&mut self, declaration: Declaration) {
        self(declaration);
    }
}
