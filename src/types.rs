use serde::{Deserialize, Serialize};

/// Value produced by a Cypher statement or stored as a node property.
///
/// Reuse the same enum for result rows, node properties, and statement
/// literals so helper code does not need to branch on where a value came
/// from:
/// ```rust
/// use cypher_middleware::CypherValue;
///
/// let row = vec![
///     CypherValue::Int(1),
///     CypherValue::Text("alice".into()),
///     CypherValue::Null,
/// ];
/// # let _ = row;
/// ```
///
/// Serializes as the natural JSON shape (`Null` as `null`, `List` as an
/// array, and so on).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CypherValue {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Ordered list of values
    List(Vec<CypherValue>),
}

impl CypherValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let CypherValue::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let CypherValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let CypherValue::Bool(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let CypherValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[CypherValue]> {
        if let CypherValue::List(values) = self {
            Some(values)
        } else {
            None
        }
    }
}

impl From<i64> for CypherValue {
    fn from(value: i64) -> Self {
        CypherValue::Int(value)
    }
}

impl From<f64> for CypherValue {
    fn from(value: f64) -> Self {
        CypherValue::Float(value)
    }
}

impl From<bool> for CypherValue {
    fn from(value: bool) -> Self {
        CypherValue::Bool(value)
    }
}

impl From<&str> for CypherValue {
    fn from(value: &str) -> Self {
        CypherValue::Text(value.to_owned())
    }
}

impl From<String> for CypherValue {
    fn from(value: String) -> Self {
        CypherValue::Text(value)
    }
}

impl From<Vec<CypherValue>> for CypherValue {
    fn from(values: Vec<CypherValue>) -> Self {
        CypherValue::List(values)
    }
}
