//! Lexical segmentation of raw SQL text into executable statements.
//!
//! The splitter never parses SQL. It tracks just enough lexical context to
//! know whether a `;` is a statement boundary:
//!
//! - [`state`]: the mutually exclusive scanner contexts and dollar-quote tags
//! - [`tag`]: recognition of `$tag$` delimiters
//! - [`segmenter`]: the single-pass scanner producing raw segments
//! - [`normalize`]: trimming and terminating segments into [`Statement`]s
//!
//! Malformed quoting is never an error here. An unclosed quote, comment or
//! dollar-quoted block simply absorbs the rest of the input into the final
//! statement, and the open context is reported through
//! [`Segmentation::open_context`] and a `warn` event.

pub mod normalize;
pub mod segmenter;
pub mod state;
pub mod tag;

pub use normalize::{normalize, Statement};
pub use segmenter::{Segment, Segmenter};
pub use state::{DollarTag, LexicalState};
pub use tag::read_dollar_tag;

/// Result of splitting one block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation<'a> {
    statements: Vec<Statement>,
    terminal_state: LexicalState<'a>,
}

impl<'a> Segmentation<'a> {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }

    /// The context the scanner was in when the input ended.
    pub fn terminal_state(&self) -> LexicalState<'a> {
        self.terminal_state
    }

    /// The unclosed context, if the input ended inside one.
    pub fn open_context(&self) -> Option<LexicalState<'a>> {
        self.terminal_state.is_open().then_some(self.terminal_state)
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Splits `sql` into normalized statements, in input order.
///
/// # Arguments
/// * `sql` - Any number of SQL or procedural-SQL statements
///
/// # Returns
/// The statements together with the lexical state the input ended in.
/// Empty or whitespace-only input yields no statements.
pub fn split(sql: &str) -> Segmentation<'_> {
    let mut segmenter = Segmenter::new(sql);
    let statements = segmenter
        .by_ref()
        .filter_map(Segment::into_statement)
        .collect();

    Segmentation {
        statements,
        terminal_state: segmenter.terminal_state(),
    }
}

/// Shorthand for [`split`] when the terminal state is not needed.
pub fn split_statements(sql: &str) -> Vec<Statement> {
    split(sql).into_statements()
}
