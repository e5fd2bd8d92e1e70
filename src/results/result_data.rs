use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::row::Row;
use crate::types::CypherValue;

/// Result of one successfully executed statement: ordered column names plus
/// the rows produced, in engine order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultData {
    /// The column names of this result set
    pub columns: Vec<String>,
    /// The rows returned by the statement
    #[serde(rename = "data")]
    pub rows: Vec<Row>,
}

impl ResultData {
    /// Create a result set from already-built rows.
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Create a result set from positional value rows, sharing one column
    /// name allocation across every row.
    #[must_use]
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CypherValue>>) -> Self {
        let shared = std::sync::Arc::new(columns.clone());
        let rows = rows
            .into_iter()
            .map(|values| Row::new(std::sync::Arc::clone(&shared), values))
            .collect();
        Self { columns, rows }
    }

    /// Number of rows in this result set.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the statement produced no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Error raised by a failed statement: the engine's native classification
/// code plus its human-readable message, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct ResultError {
    /// Stable dotted classification code, e.g. `X.ClientError.Statement.SyntaxError`
    pub code: String,
    /// Human-readable description of the failure
    pub message: String,
}

impl ResultError {
    /// Create an error record from a code and message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
