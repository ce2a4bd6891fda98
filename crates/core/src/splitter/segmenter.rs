use tracing::{debug, warn};

use super::normalize::Statement;
use super::state::LexicalState;
use super::tag::read_dollar_tag;

/// A raw slice of the input up to and including its boundary `;`.
///
/// The final segment of an input that does not end in `;` has no terminator;
/// the normalizer appends one when it becomes a [`Statement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    text: &'a str,
    terminated: bool,
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// True when the segment was closed by a `;`, false when it ran to the end of input.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn into_statement(self) -> Option<Statement> {
        Statement::normalize(self.text)
    }
}

impl AsRef<str> for Segment<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

/// Single-pass scanner that yields statement segments lazily, left to right.
///
/// Scanning works on bytes. Every byte the state machine reacts to is ASCII,
/// so each slice boundary lands on a UTF-8 character boundary and multi-byte
/// text is carried through untouched.
///
/// Segments that contain nothing but whitespace and comments are skipped.
/// Once the iterator is exhausted, [`Segmenter::terminal_state`] tells whether
/// the input ended inside a quote, comment or dollar-quoted block.
#[derive(Debug, Clone)]
pub struct Segmenter<'a> {
    text: &'a str,
    pos: usize,
    /// Start of the statement currently being accumulated.
    start: usize,
    state: LexicalState<'a>,
    /// Whether the accumulator holds anything besides whitespace and comments.
    has_content: bool,
    finished: bool,
}

impl<'a> Segmenter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            start: 0,
            state: LexicalState::Normal,
            has_content: false,
            finished: false,
        }
    }

    /// The lexical context at the current scan position.
    ///
    /// After the iterator returns `None` this is the context the input ended
    /// in; anything other than [`LexicalState::Normal`] usually means the
    /// upstream text was malformed.
    pub fn terminal_state(&self) -> LexicalState<'a> {
        self.state
    }

    fn step(&mut self) -> Option<Segment<'a>> {
        let bytes = self.text.as_bytes();
        let byte = bytes[self.pos];
        let next = bytes.get(self.pos + 1).copied();

        match self.state {
            LexicalState::InLineComment => {
                if byte == b'\n' {
                    self.state = LexicalState::Normal;
                }
                self.pos += 1;
            }
            LexicalState::InBlockComment => {
                if byte == b'*' && next == Some(b'/') {
                    self.state = LexicalState::Normal;
                    self.pos += 2;
                } else {
                    self.pos += 1;
                }
            }
            LexicalState::InDollarQuote(tag) => {
                // A `$` that does not start the exact opening tag is body text.
                if bytes[self.pos..].starts_with(tag.as_str().as_bytes()) {
                    self.state = LexicalState::Normal;
                    self.pos += tag.len();
                } else {
                    self.pos += 1;
                }
            }
            LexicalState::InSingleQuotedLiteral => self.step_quoted(b'\'', byte, next),
            LexicalState::InDoubleQuotedIdentifier => self.step_quoted(b'"', byte, next),
            LexicalState::Normal => return self.step_normal(byte, next),
        }

        None
    }

    fn step_quoted(&mut self, quote: u8, byte: u8, next: Option<u8>) {
        if byte == quote {
            // Doubled quote is an escape and keeps us inside.
            if next == Some(quote) {
                self.pos += 2;
                return;
            }
            self.state = LexicalState::Normal;
        }
        self.pos += 1;
    }

    fn step_normal(&mut self, byte: u8, next: Option<u8>) -> Option<Segment<'a>> {
        match (byte, next) {
            (b'-', Some(b'-')) => {
                self.state = LexicalState::InLineComment;
                self.pos += 2;
            }
            (b'/', Some(b'*')) => {
                self.state = LexicalState::InBlockComment;
                self.pos += 2;
            }
            (b'$', _) => {
                self.has_content = true;
                match read_dollar_tag(self.text, self.pos) {
                    Some(tag) => {
                        self.state = LexicalState::InDollarQuote(tag);
                        self.pos += tag.len();
                    }
                    None => self.pos += 1,
                }
            }
            (b'\'', _) => {
                self.has_content = true;
                self.state = LexicalState::InSingleQuotedLiteral;
                self.pos += 1;
            }
            (b'"', _) => {
                self.has_content = true;
                self.state = LexicalState::InDoubleQuotedIdentifier;
                self.pos += 1;
            }
            (b';', _) => {
                // The terminator stays in place so a trailing line comment
                // cannot swallow it once the segment is trimmed.
                let text = &self.text[self.start..=self.pos];
                self.pos += 1;
                self.start = self.pos;
                return self.emit(text, true);
            }
            _ => {
                if !byte.is_ascii_whitespace() {
                    self.has_content = true;
                }
                self.pos += 1;
            }
        }

        None
    }

    fn emit(&mut self, text: &'a str, terminated: bool) -> Option<Segment<'a>> {
        if !std::mem::take(&mut self.has_content) {
            if !text.trim().is_empty() {
                debug!(segment = text, "skipping comment-only segment");
            }
            return None;
        }

        debug!(terminated, len = text.len(), "statement boundary");
        Some(Segment { text, terminated })
    }
}

impl<'a> Iterator for Segmenter<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            if let Some(segment) = self.step() {
                return Some(segment);
            }
        }

        if self.finished {
            return None;
        }
        self.finished = true;

        if self.state.is_open() {
            warn!(
                context = %self.state,
                "input ended inside an open lexical context; remaining text is kept in the final statement"
            );
        }

        let text = &self.text[self.start..];
        self.start = self.text.len();
        self.emit(text, false)
    }
}

impl std::iter::FusedIterator for Segmenter<'_> {}
