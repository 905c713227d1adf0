// Record Module
//
// One row of a table, stored as a column-name-to-value map. All values are
// strings. A record performs no validation against any schema; that is the
// owning table's job at insert/update time.

use std::collections::HashMap;

/// A single row: column name → string value.
///
/// A column absent from the map is treated as NULL/unset; [`Record::get`]
/// returns `None` for it rather than an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: HashMap<String, String>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Set the value for a column, inserting or overwriting.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    /// Get the value of a column, or `None` if the record does not have it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Check whether the record has a value for the column.
    pub fn has(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Read view of the full column → value map. No ordering guarantee.
    pub fn data(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// Remove a column's value if present. Used by column drop.
    pub(crate) fn remove(&mut self, column: &str) {
        self.values.remove(column);
    }
}
