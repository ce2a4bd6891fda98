use std::fmt;
use std::ops::Deref;

use serde::Serialize;

/// A trimmed, non-empty statement that always ends with `;`.
///
/// The only way to build one is [`Statement::normalize`], so every value of
/// this type upholds those guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Statement(String);

impl Statement {
    /// Trims `raw`, returns `None` if nothing is left, and appends a `;` when
    /// the text does not already end with one.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let mut text = String::with_capacity(trimmed.len() + 1);
        text.push_str(trimmed);
        if !text.ends_with(';') {
            text.push(';');
        }
        Some(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Normalizes every segment in order, dropping the ones that are empty.
///
/// Running this over statements that are already normalized returns them
/// unchanged.
pub fn normalize<I, S>(segments: I) -> Vec<Statement>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .filter_map(|segment| Statement::normalize(segment.as_ref()))
        .collect()
}

impl Deref for Statement {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Statement> for String {
    fn from(statement: Statement) -> Self {
        statement.0
    }
}

impl PartialEq<str> for Statement {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Statement {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
