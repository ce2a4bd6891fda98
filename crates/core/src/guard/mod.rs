//! Destructive-statement guard.
//!
//! The guard is a plain case-insensitive substring scan over the whole text of
//! each statement. It does not tokenize, so a keyword inside a string literal,
//! identifier or comment is still a match.

mod keywords;

pub use keywords::DEFAULT_FORBIDDEN_KEYWORDS;

use tracing::warn;

use crate::error::{GuardError, GuardResult};

/// Ordered set of forbidden keyword phrases, stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordGuard {
    keywords: Vec<String>,
}

impl Default for KeywordGuard {
    fn default() -> Self {
        Self::new(DEFAULT_FORBIDDEN_KEYWORDS)
    }
}

impl KeywordGuard {
    /// Builds a guard from `keywords`, replacing the default set.
    ///
    /// Blank entries and duplicates (compared case-insensitively) are ignored;
    /// the first occurrence fixes the checking order.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keywords
            .into_iter()
            .fold(Self { keywords: Vec::new() }, |guard, keyword| guard.with_keyword(keyword))
    }

    /// Appends one keyword to the end of the checking order.
    pub fn with_keyword(mut self, keyword: impl AsRef<str>) -> Self {
        let keyword = keyword.as_ref().trim().to_uppercase();
        if !keyword.is_empty() && !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Returns the first keyword, in checking order, contained in `statement`.
    pub fn matches(&self, statement: &str) -> Option<&str> {
        let normalized = statement.to_uppercase();
        self.keywords().find(|keyword| normalized.contains(keyword))
    }

    /// Checks `statements` in order and fails on the first one that contains a
    /// forbidden keyword.
    ///
    /// # Errors
    /// Returns [`GuardError::Forbidden`] carrying the statement's position and
    /// full text. A failure rejects the whole batch.
    pub fn check<S: AsRef<str>>(&self, statements: &[S]) -> GuardResult<()> {
        for (index, statement) in statements.iter().enumerate() {
            let statement = statement.as_ref();
            if let Some(keyword) = self.matches(statement) {
                warn!(index, keyword, "blocked destructive statement");
                return Err(GuardError::forbidden(index, statement, keyword));
            }
        }
        Ok(())
    }
}
