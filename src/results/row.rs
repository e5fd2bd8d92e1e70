use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::CypherValue;

/// A row from a statement result.
///
/// A row maps column names to values. Column names are shared across all
/// rows of a result set, with an index cache so repeated lookups by name do
/// not re-run string comparisons.
#[derive(Debug, Clone)]
pub struct Row {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: std::sync::Arc<Vec<String>>,
    /// The values for this row, aligned with `column_names`
    pub values: Vec<CypherValue>,
    // Internal cache for faster column lookups
    #[doc(hidden)]
    pub(crate) column_index_cache: std::sync::Arc<std::collections::HashMap<String, usize>>,
}

impl Row {
    /// Create a new row over shared column names.
    #[must_use]
    pub fn new(column_names: std::sync::Arc<Vec<String>>, values: Vec<CypherValue>) -> Self {
        let cache = std::sync::Arc::new(
            column_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect::<std::collections::HashMap<_, _>>(),
        );

        Self {
            column_names,
            values,
            column_index_cache: cache,
        }
    }

    /// Get the index of a column by name, or None if not found.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.column_index_cache.get(column_name) {
            return Some(idx);
        }

        // Fall back to linear search
        self.column_names.iter().position(|col| col == column_name)
    }

    /// Get a value by column name, or None if the column wasn't found.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&CypherValue> {
        let index_opt = self.get_column_index(column_name);
        if let Some(idx) = index_opt {
            self.values.get(idx)
        } else {
            None
        }
    }

    /// Get a value by column index, or None if the index is out of bounds.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&CypherValue> {
        self.values.get(index)
    }
}

// The cache is derived state; equality is column names plus values.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.column_names == other.column_names && self.values == other.values
    }
}

// Serializes as a map in column order, the shape a transport layer expects.
impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.column_names.iter().zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
