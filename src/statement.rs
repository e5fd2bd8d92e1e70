use serde::{Deserialize, Serialize};

/// Payload wrapper holding a single Cypher query string.
///
/// This is the unit shipped across a transport boundary; it serializes as
/// `{"statement": "..."}` and compares by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CypherStatement {
    statement: String,
}

impl CypherStatement {
    /// Wrap a query string in its transport holder.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            statement: query.into(),
        }
    }

    /// The wrapped query text.
    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// Unwrap back into the plain query string.
    #[must_use]
    pub fn into_statement(self) -> String {
        self.statement
    }
}

impl From<&str> for CypherStatement {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

impl From<String> for CypherStatement {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}
