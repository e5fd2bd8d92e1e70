//! Transaction client facade.
//!
//! [`EmbeddedClient`] translates ordered statement lists into engine
//! transactions: one auto-committing transaction, or an explicitly opened
//! one that the caller later extends, commits, or rolls back. Every
//! operation returns success data or the engine's errors, never both.

pub mod transaction;

pub use transaction::{ClosedTransaction, OngoingTransaction};

use tracing::{debug, warn};

use crate::engine::{EngineCursor, EngineTransaction, GraphEngine};
use crate::results::{ResultData, ResultError};

/// Outcome of a facade operation: success data, or the error records raised
/// by the first failing statement. The two arms are mutually exclusive.
pub type CypherResult<T> = Result<T, Vec<ResultError>>;

/// The operations a Cypher transaction client exposes, independent of how
/// it reaches the engine.
pub trait CypherClient {
    /// Handle for a transaction left open by [`open_transaction`].
    ///
    /// [`open_transaction`]: CypherClient::open_transaction
    type Ongoing;

    /// Execute all statements atomically in one implicit transaction:
    /// commit when every statement succeeds, roll back on the first
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns the engine's error records for the first failing statement;
    /// no write from the batch survives.
    fn run_single_transaction(&self, statements: &[&str]) -> CypherResult<Vec<ResultData>>;

    /// Begin an explicit transaction, execute zero or more statements in
    /// it, and hand back the still-open handle. The caller is responsible
    /// for eventually committing or rolling back.
    ///
    /// # Errors
    ///
    /// Returns the engine's error records if any statement fails; the
    /// engine transaction is rolled back first, so no open transaction is
    /// left dangling.
    fn open_transaction(&self, statements: &[&str]) -> CypherResult<Self::Ongoing>;

    /// Run additional statements in an open transaction, extending its
    /// accumulated result data.
    ///
    /// # Errors
    ///
    /// Returns the engine's error records if a statement fails. The
    /// transaction stays open: the failed statement contributed nothing,
    /// and earlier pending writes are still in place for the caller to
    /// commit or roll back.
    fn execute(&self, transaction: &mut Self::Ongoing, statements: &[&str]) -> CypherResult<()>;

    /// Optionally run final statements, then commit.
    ///
    /// # Errors
    ///
    /// Returns the engine's error records if a final statement or the
    /// commit itself fails; the transaction is rolled back in that case.
    fn commit(
        &self,
        transaction: Self::Ongoing,
        statements: &[&str],
    ) -> CypherResult<ClosedTransaction>;

    /// Abort the transaction, discarding every pending write.
    ///
    /// # Errors
    ///
    /// Returns the engine's error records if the engine cannot roll back.
    fn rollback(&self, transaction: Self::Ongoing) -> CypherResult<ClosedTransaction>;
}

/// Client facade over an embedded graph engine.
///
/// The engine is any [`GraphEngine`] implementation; the client adds no
/// locking, pooling, or statement rewriting on top of it.
#[derive(Debug, Clone)]
pub struct EmbeddedClient<E> {
    engine: E,
}

impl<E: GraphEngine> EmbeddedClient<E> {
    /// Create a client over the given engine.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Borrow the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run statements in input order, materializing each cursor. Stops at
    /// the first failure and leaves the transaction to the caller.
    fn run_statements(
        tx: &mut E::Tx,
        statements: &[&str],
        data: &mut Vec<ResultData>,
    ) -> Result<(), ResultError> {
        for statement in statements {
            match tx.run(statement) {
                Ok(cursor) => data.push(materialize(cursor)),
                Err(err) => {
                    warn!(code = %err.code, "statement failed");
                    return Err(ResultError::from(err));
                }
            }
        }
        Ok(())
    }

    fn fail_and_rollback(tx: E::Tx, error: ResultError) -> Vec<ResultError> {
        if let Err(rollback_err) = tx.rollback() {
            warn!(code = %rollback_err.code, "rollback after failed statement also failed");
        }
        vec![error]
    }

    fn begin(&self) -> CypherResult<E::Tx> {
        self.engine
            .begin()
            .map_err(|err| vec![ResultError::from(err)])
    }
}

impl<E: GraphEngine> CypherClient for EmbeddedClient<E> {
    type Ongoing = OngoingTransaction<E::Tx>;

    fn run_single_transaction(&self, statements: &[&str]) -> CypherResult<Vec<ResultData>> {
        debug!(count = statements.len(), "running single transaction");
        let mut tx = self.begin()?;
        let mut data = Vec::with_capacity(statements.len());
        if let Err(error) = Self::run_statements(&mut tx, statements, &mut data) {
            return Err(Self::fail_and_rollback(tx, error));
        }
        tx.commit().map_err(|err| vec![ResultError::from(err)])?;
        Ok(data)
    }

    fn open_transaction(&self, statements: &[&str]) -> CypherResult<Self::Ongoing> {
        debug!(count = statements.len(), "opening transaction");
        let mut tx = self.begin()?;
        let mut data = Vec::with_capacity(statements.len());
        if let Err(error) = Self::run_statements(&mut tx, statements, &mut data) {
            return Err(Self::fail_and_rollback(tx, error));
        }
        Ok(OngoingTransaction::new(tx, data))
    }

    fn execute(&self, transaction: &mut Self::Ongoing, statements: &[&str]) -> CypherResult<()> {
        debug!(count = statements.len(), "executing in open transaction");
        for statement in statements {
            match transaction.tx_mut().run(statement) {
                Ok(cursor) => transaction.push_result(materialize(cursor)),
                Err(err) => {
                    warn!(code = %err.code, "statement failed; transaction stays open");
                    return Err(vec![ResultError::from(err)]);
                }
            }
        }
        Ok(())
    }

    fn commit(
        &self,
        transaction: Self::Ongoing,
        statements: &[&str],
    ) -> CypherResult<ClosedTransaction> {
        debug!(count = statements.len(), "committing transaction");
        let (mut tx, mut data) = transaction.into_parts();
        if let Err(error) = Self::run_statements(&mut tx, statements, &mut data) {
            return Err(Self::fail_and_rollback(tx, error));
        }
        tx.commit().map_err(|err| vec![ResultError::from(err)])?;
        Ok(ClosedTransaction::committed(data))
    }

    fn rollback(&self, transaction: Self::Ongoing) -> CypherResult<ClosedTransaction> {
        debug!("rolling back transaction");
        let (tx, _) = transaction.into_parts();
        tx.rollback().map_err(|err| vec![ResultError::from(err)])?;
        Ok(ClosedTransaction::rolled_back())
    }
}

/// Turn a positional engine cursor into named result rows.
fn materialize(cursor: EngineCursor) -> ResultData {
    ResultData::from_rows(cursor.columns, cursor.rows)
}
