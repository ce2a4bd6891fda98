use std::fmt;

/// A dollar-quote delimiter such as `$$` or `$body$`, borrowed from the input.
///
/// Two tags are equal only when their full text matches, so `$$` and `$a$`
/// never close each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DollarTag<'a>(&'a str);

impl<'a> DollarTag<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        debug_assert!(text.len() >= 2 && text.starts_with('$') && text.ends_with('$'));
        Self(text)
    }

    /// Full tag text, including both `$` delimiters.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// The identifier between the delimiters. Empty for `$$`.
    pub fn identifier(&self) -> &'a str {
        &self.0[1..self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DollarTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The lexical context the scanner is in at a given position.
///
/// Exactly one context is active at a time, and the dollar-quote variant
/// carries the tag that will close it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexicalState<'a> {
    #[default]
    Normal,
    InLineComment,
    InBlockComment,
    InSingleQuotedLiteral,
    InDoubleQuotedIdentifier,
    InDollarQuote(DollarTag<'a>),
}

impl LexicalState<'_> {
    /// Returns true for every context except [`LexicalState::Normal`].
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Returns true while the scanner is inside a comment.
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::InLineComment | Self::InBlockComment)
    }
}

impl fmt::Display for LexicalState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal text"),
            Self::InLineComment => f.write_str("unterminated line comment"),
            Self::InBlockComment => f.write_str("unterminated block comment"),
            Self::InSingleQuotedLiteral => f.write_str("unterminated string literal"),
            Self::InDoubleQuotedIdentifier => f.write_str("unterminated quoted identifier"),
            Self::InDollarQuote(tag) => write!(f, "unterminated dollar-quoted block {}", tag),
        }
    }
}
