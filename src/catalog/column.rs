// Column Definition Module
//
// This module defines the Column type that describes one attribute of a table.

use std::fmt;

/// Data types a column can declare.
///
/// Types are advisory metadata: values are stored and compared as strings,
/// and no coercion or validation happens at write time. On reload from disk
/// every column comes back as `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Float,
    String,
}

impl DataType {
    /// Canonical keyword for this type, as it appears in CREATE TABLE.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Float => "FLOAT",
            DataType::String => "STRING",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes a single column: name, declared type, nullability, default value.
///
/// Immutable once constructed. Name uniqueness within a schema is the
/// schema owner's job, not checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name
    name: String,
    /// Declared data type (advisory, see [`DataType`])
    data_type: DataType,
    /// Whether this column may hold NULL (i.e. be absent from a record)
    nullable: bool,
    /// Default value, if any
    default_value: Option<String>,
}

impl Column {
    /// Create a new column description.
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        nullable: bool,
        default_value: Option<String>,
    ) -> Self {
        Column {
            name: name.into(),
            data_type,
            nullable,
            default_value,
        }
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared data type
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Check if the column may be absent from a record
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Get the default value (if any)
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}
