//! Convenient imports for common functionality.
//!
//! Pulls in the client trait alongside the types it speaks, so one import
//! is enough to drive a transaction end to end.

pub use crate::client::{
    ClosedTransaction, CypherClient, CypherResult, EmbeddedClient, OngoingTransaction,
};
pub use crate::engine::{EngineCursor, EngineError, EngineTransaction, GraphEngine};
pub use crate::results::{ResultData, ResultError, Row};
pub use crate::statement::CypherStatement;
pub use crate::types::CypherValue;
