//! Turning request payloads into a checked statement batch.
//!
//! Upstream planners send either raw text under `sql` or a `statements` field
//! that is a list of strings or a single block of text. [`Payload::coerce`]
//! resolves those into one list and [`prepare`] is the gate every batch must
//! pass before it reaches an executor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GuardError, GuardResult};
use crate::guard::KeywordGuard;
use crate::splitter::{normalize, split, Statement};

/// The `statements` field of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatementsField {
    List(Vec<String>),
    Text(String),
}

/// Body of an execution request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub statements: Option<StatementsField>,
    #[serde(default)]
    pub sql: Option<String>,
}

impl Payload {
    pub fn from_sql(sql: impl Into<String>) -> Self {
        Self {
            statements: None,
            sql: Some(sql.into()),
        }
    }

    pub fn from_statements<I, S>(statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            statements: Some(StatementsField::List(
                statements.into_iter().map(Into::into).collect(),
            )),
            sql: None,
        }
    }

    /// Resolves the payload into one list of statement strings.
    ///
    /// Non-blank `sql` text wins and is split. Otherwise a non-empty
    /// `statements` list is returned as given (blank entries are left for
    /// [`validate`] to reject), and a non-blank `statements` string is split.
    /// Anything else yields an empty list.
    pub fn coerce(&self) -> Vec<String> {
        if let Some(sql) = self.sql.as_deref().filter(|sql| !sql.trim().is_empty()) {
            return split_to_strings(sql);
        }

        match &self.statements {
            Some(StatementsField::List(list)) => list.clone(),
            Some(StatementsField::Text(text)) if !text.trim().is_empty() => split_to_strings(text),
            _ => Vec::new(),
        }
    }
}

fn split_to_strings(sql: &str) -> Vec<String> {
    split(sql)
        .into_statements()
        .into_iter()
        .map(Statement::into_string)
        .collect()
}

/// Rejects an empty batch and any blank entry in it.
pub fn validate<S: AsRef<str>>(statements: &[S]) -> GuardResult<()> {
    if statements.is_empty() {
        return Err(GuardError::EmptyBatch);
    }

    match statements
        .iter()
        .position(|statement| statement.as_ref().trim().is_empty())
    {
        Some(index) => Err(GuardError::BlankStatement { index }),
        None => Ok(()),
    }
}

/// Validates, normalizes and guards a batch.
///
/// Either every statement is returned, normalized and in order, or nothing
/// is: there is no partial result.
///
/// # Errors
/// - [`GuardError::EmptyBatch`] / [`GuardError::BlankStatement`] for malformed input
/// - [`GuardError::Forbidden`] when the guard matches any statement
pub fn prepare<S: AsRef<str>>(
    statements: &[S],
    guard: &KeywordGuard,
) -> GuardResult<Vec<Statement>> {
    validate(statements)?;

    let statements = normalize(statements);
    guard.check(&statements)?;

    debug!(count = statements.len(), "batch accepted");
    Ok(statements)
}
