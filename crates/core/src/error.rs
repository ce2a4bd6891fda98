use thiserror::Error;

/// Result type for batch validation and guard checks
pub type GuardResult<T> = Result<T, GuardError>;

/// Reasons a batch of statements is refused before anything executes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// The batch contains no statements at all
    #[error("No SQL statements were provided for execution.")]
    EmptyBatch,

    /// A caller-supplied statement is empty or whitespace-only
    #[error("Statement #{index} is empty; statements must be non-empty strings.")]
    BlankStatement { index: usize },

    /// A statement contains a blocklisted keyword
    #[error("Blocked potentially destructive statement: {statement}")]
    Forbidden {
        index: usize,
        statement: String,
        keyword: String,
    },
}

impl GuardError {
    pub fn forbidden(
        index: usize,
        statement: impl Into<String>,
        keyword: impl Into<String>,
    ) -> Self {
        Self::Forbidden {
            index,
            statement: statement.into(),
            keyword: keyword.into(),
        }
    }

    pub fn report(&self) -> String {
        match self {
            Self::EmptyBatch => "No SQL statements were provided\n\
                     Suggestion: Send at least one statement, either as `sql` text or a `statements` list."
                .to_string(),
            Self::BlankStatement { index } => {
                format!(
                    "Statement #{} is empty\n\
                         Suggestion: Remove blank entries from the statement list.",
                    index
                )
            }
            Self::Forbidden {
                index,
                statement,
                keyword,
            } => {
                format!(
                    "Blocked statement #{} because it contains '{}':\n    {}\n\
                         Suggestion: Destructive statements must be run outside this tool. \
                         The check also matches keywords inside literals and comments.",
                    index, keyword, statement
                )
            }
        }
    }

    /// The statement text that triggered a guard violation
    pub fn offending_statement(&self) -> Option<&str> {
        match self {
            Self::Forbidden { statement, .. } => Some(statement),
            _ => None,
        }
    }

    /// Returns true if a blocklisted keyword was found
    pub fn is_guard_violation(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    /// Returns true if the batch was malformed (empty, blank entries)
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::EmptyBatch | Self::BlankStatement { .. })
    }
}
