//! Synchronous transaction client for embedded Cypher graph engines.
//!
//! The engine is an external collaborator reached through the [`engine`]
//! traits; this crate turns statement lists into transactions and engine
//! cursors into named result rows, and nothing more.
//!
//! ```rust
//! use cypher_middleware::prelude::*;
//! use cypher_middleware::test_utils::MemoryGraph;
//!
//! # fn main() -> Result<(), Vec<cypher_middleware::ResultError>> {
//! let graph = MemoryGraph::new();
//! let client = EmbeddedClient::new(graph.clone());
//!
//! let results = client.run_single_transaction(&[
//!     "CREATE (n:Person {name: 'Ada'}) RETURN n.name",
//! ])?;
//! assert_eq!(
//!     results[0].rows[0].get("n.name"),
//!     Some(&CypherValue::Text("Ada".into())),
//! );
//! assert_eq!(graph.node_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod engine;
pub mod prelude;
pub mod results;
pub mod statement;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use client::{ClosedTransaction, CypherClient, CypherResult, EmbeddedClient, OngoingTransaction};
pub use engine::{EngineCursor, EngineError, EngineTransaction, GraphEngine};
pub use results::{ResultData, ResultError, Row};
pub use statement::CypherStatement;
pub use types::CypherValue;
