use serde::Serialize;

use crate::results::ResultData;

/// Caller-owned handle to a not-yet-finalized transaction.
///
/// The handle owns the engine transaction until [`commit`] or [`rollback`]
/// consumes it, together with the result data of every statement executed in
/// it so far. Ownership is exclusive; the handle is not meant to be shared
/// between callers.
///
/// [`commit`]: crate::client::CypherClient::commit
/// [`rollback`]: crate::client::CypherClient::rollback
#[derive(Debug)]
pub struct OngoingTransaction<T> {
    tx: T,
    result_data: Vec<ResultData>,
}

impl<T> OngoingTransaction<T> {
    pub(crate) fn new(tx: T, result_data: Vec<ResultData>) -> Self {
        Self { tx, result_data }
    }

    /// Result data accumulated so far, one entry per executed statement in
    /// execution order.
    #[must_use]
    pub fn result_data(&self) -> &[ResultData] {
        &self.result_data
    }

    pub(crate) fn tx_mut(&mut self) -> &mut T {
        &mut self.tx
    }

    pub(crate) fn push_result(&mut self, data: ResultData) {
        self.result_data.push(data);
    }

    pub(crate) fn into_parts(self) -> (T, Vec<ResultData>) {
        (self.tx, self.result_data)
    }
}

/// Terminal snapshot of a finished transaction. Immutable once produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClosedTransaction {
    rolled_back: bool,
    result_data: Vec<ResultData>,
}

impl ClosedTransaction {
    /// Snapshot of a committed transaction carrying its full result data.
    pub(crate) fn committed(result_data: Vec<ResultData>) -> Self {
        Self {
            rolled_back: false,
            result_data,
        }
    }

    /// Snapshot of a rolled-back transaction. Result data is always empty.
    pub(crate) fn rolled_back() -> Self {
        Self {
            rolled_back: true,
            result_data: Vec::new(),
        }
    }

    /// Whether the transaction ended in a rollback.
    #[must_use]
    pub fn is_rolled_back(&self) -> bool {
        self.rolled_back
    }

    /// The final result data, one entry per statement in execution order.
    #[must_use]
    pub fn result_data(&self) -> &[ResultData] {
        &self.result_data
    }

    /// Consume the snapshot and take ownership of the result data.
    #[must_use]
    pub fn into_result_data(self) -> Vec<ResultData> {
        self.result_data
    }
}
