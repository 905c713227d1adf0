// Constraint Module
//
// Row-level constraints over a named tuple of columns. A constraint only
// carries metadata and a local-shape check; table-scope uniqueness
// enforcement lives in Table::insert.

/// A rule over an ordered, non-empty tuple of column names.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Values for these columns must be non-empty and unique across the table.
    PrimaryKey { columns: Vec<String> },
    /// Values for these columns must be unique across the table.
    Unique { columns: Vec<String> },
    /// Values for these columns reference columns of another table.
    /// No cross-table existence check is performed.
    ForeignKey {
        columns: Vec<String>,
        referenced_table: String,
        referenced_columns: Vec<String>,
    },
}

impl Constraint {
    /// The declared columns, in declaration order.
    pub fn columns(&self) -> &[String] {
        match self {
            Constraint::PrimaryKey { columns } => columns,
            Constraint::Unique { columns } => columns,
            Constraint::ForeignKey { columns, .. } => columns,
        }
    }

    /// Table referenced by a foreign key, `None` for other variants.
    pub fn referenced_table(&self) -> Option<&str> {
        match self {
            Constraint::ForeignKey { referenced_table, .. } => Some(referenced_table),
            _ => None,
        }
    }

    /// Columns referenced by a foreign key, `None` for other variants.
    pub fn referenced_columns(&self) -> Option<&[String]> {
        match self {
            Constraint::ForeignKey { referenced_columns, .. } => {
                Some(referenced_columns)
            }
            _ => None,
        }
    }

    /// Human-readable constraint kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::PrimaryKey { .. } => "PRIMARY KEY",
            Constraint::Unique { .. } => "UNIQUE",
            Constraint::ForeignKey { .. } => "FOREIGN KEY",
        }
    }

    /// Check only the *local shape* of a value tuple, given in the same
    /// order as the declared columns. Independent of the rest of the table:
    ///
    /// - PrimaryKey: no value may be the empty string.
    /// - Unique: the tuple may not contain a duplicate among itself.
    /// - ForeignKey: the tuple arity must match the declared column arity.
    pub fn validate_shape(&self, values: &[&str]) -> bool {
        match self {
            Constraint::PrimaryKey { .. } => values.iter().all(|v| !v.is_empty()),
            Constraint::Unique { .. } => {
                let mut seen = values.to_vec();
                seen.sort_unstable();
                seen.windows(2).all(|w| w[0] != w[1])
            }
            Constraint::ForeignKey { columns, .. } => values.len() == columns.len(),
        }
    }
}
