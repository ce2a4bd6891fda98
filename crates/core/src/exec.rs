//! Seam between accepted statements and whatever database runs them.
//!
//! Connection handling lives outside this crate. An executor only has to
//! run one statement and describe what happened; [`run_batch`] takes care
//! of gating the batch, ordering, timing and notice collection.

use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::batch::prepare;
use crate::error::GuardError;
use crate::guard::KeywordGuard;
use crate::splitter::Statement;

/// Runs a single statement against a database connection.
pub trait StatementExecutor {
    type Error: std::error::Error + 'static;

    fn execute(&mut self, statement: &str) -> Result<StatementOutcome, Self::Error>;
}

/// Column metadata reported by the database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "dataTypeID")]
    pub data_type_id: u32,
}

/// What the database returned for one statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementOutcome {
    /// Command tag, e.g. `SELECT` or `INSERT`.
    pub command: String,
    pub row_count: u64,
    pub fields: Vec<FieldInfo>,
    pub rows: Vec<serde_json::Value>,
    /// Server notices raised while the statement ran.
    pub notices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementReport {
    pub statement: Statement,
    pub command: String,
    pub row_count: u64,
    pub duration_ms: f64,
    pub fields: Vec<FieldInfo>,
    pub rows: Vec<serde_json::Value>,
    /// Notices for this statement joined by newlines; empty when there were none.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub statements: Vec<Statement>,
    /// Every notice from the batch, in the order it was raised.
    pub notices: Vec<String>,
    pub results: Vec<StatementReport>,
    pub execution_time_ms: f64,
}

#[derive(Debug, Error)]
pub enum ExecError<E: std::error::Error + 'static> {
    /// The batch never reached the executor
    #[error(transparent)]
    Rejected(#[from] GuardError),

    /// The executor failed; statements after `index` were not run
    #[error("Statement #{index} failed: {source}")]
    Statement {
        index: usize,
        statement: String,
        #[source]
        source: E,
    },
}

/// Gates `statements` through [`prepare`] and runs them one after another.
///
/// # Errors
/// - [`ExecError::Rejected`] if validation or the guard fails; the executor is
///   never called in that case
/// - [`ExecError::Statement`] for the first statement the executor fails on
pub fn run_batch<X, S>(
    executor: &mut X,
    statements: &[S],
    guard: &KeywordGuard,
) -> Result<BatchReport, ExecError<X::Error>>
where
    X: StatementExecutor,
    S: AsRef<str>,
{
    let statements = prepare(statements, guard)?;

    let batch_start = Instant::now();
    let mut notices = Vec::new();
    let mut results = Vec::with_capacity(statements.len());

    for (index, statement) in statements.iter().enumerate() {
        let start = Instant::now();
        let outcome = executor
            .execute(statement)
            .map_err(|source| ExecError::Statement {
                index,
                statement: statement.to_string(),
                source,
            })?;
        let duration_ms = elapsed_ms(start);

        debug!(index, command = %outcome.command, duration_ms, "statement executed");

        notices.extend(outcome.notices.iter().cloned());
        results.push(StatementReport {
            statement: statement.clone(),
            command: outcome.command,
            row_count: outcome.row_count,
            duration_ms,
            fields: outcome.fields,
            rows: outcome.rows,
            text: outcome.notices.join("\n"),
        });
    }

    let execution_time_ms = elapsed_ms(batch_start);
    info!(count = results.len(), execution_time_ms, "batch executed");

    Ok(BatchReport {
        statements,
        notices,
        results,
        execution_time_ms,
    })
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1_000.0
}
