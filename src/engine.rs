//! Contract an embedded graph engine has to satisfy to sit behind the
//! client facade.
//!
//! The engine owns all storage and transaction semantics; this crate only
//! requires the four primitives below plus a stable error format. Statement
//! text is handed to the engine untouched, and errors come back untouched.

use thiserror::Error;

use crate::results::ResultError;
use crate::types::CypherValue;

/// Error surfaced by a graph engine.
///
/// Engines classify failures with a stable dotted code (for example
/// `Memory.ClientError.Statement.SyntaxError`) and a human-readable message.
/// The facade passes both through verbatim; it never parses or rewrites
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct EngineError {
    /// The engine's native classification code
    pub code: String,
    /// The engine's native message
    pub message: String,
}

impl EngineError {
    /// Create an engine error from a classification code and message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<EngineError> for ResultError {
    fn from(err: EngineError) -> Self {
        ResultError::new(err.code, err.message)
    }
}

/// Columns plus positional value rows produced by one statement.
///
/// This is the raw engine output before the facade materializes it into
/// named [`crate::ResultData`] rows. A statement that returns nothing yields
/// an empty cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineCursor {
    /// Ordered column names
    pub columns: Vec<String>,
    /// One entry per result row, values aligned with `columns`
    pub rows: Vec<Vec<CypherValue>>,
}

impl EngineCursor {
    /// Create a cursor from columns and positional rows.
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CypherValue>>) -> Self {
        Self { columns, rows }
    }

    /// Cursor for a statement that returns nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// An in-progress engine transaction.
///
/// Writes stay invisible to other transactions until [`commit`]. A failed
/// [`run`] must leave no side effects attributable to the failed statement;
/// whether earlier statements' pending writes survive is up to the caller,
/// who still holds the transaction. Both terminal operations consume the
/// transaction, so reuse after close does not compile.
///
/// [`commit`]: EngineTransaction::commit
/// [`run`]: EngineTransaction::run
pub trait EngineTransaction {
    /// Run one statement inside this transaction and return its cursor.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] with the engine's native code and message if
    /// the statement is malformed or cannot be executed.
    fn run(&mut self, statement: &str) -> Result<EngineCursor, EngineError>;

    /// Commit, publishing every pending write atomically.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the engine cannot commit.
    fn commit(self) -> Result<(), EngineError>;

    /// Abort, discarding every pending write.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the engine cannot roll back.
    fn rollback(self) -> Result<(), EngineError>;
}

/// An embedded graph engine accessed in-process.
pub trait GraphEngine {
    /// Transaction type this engine hands out.
    type Tx: EngineTransaction;

    /// Begin a new transaction.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the engine cannot open a transaction.
    fn begin(&self) -> Result<Self::Tx, EngineError>;
}
