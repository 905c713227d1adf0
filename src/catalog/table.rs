// Table Module
//
// A table owns its schema and an ordered collection of records, and is the
// place where constraints are actually enforced: insert checks primary-key
// and unique constraints against every existing row (linear scan, no index),
// update and delete select rows with the single-equality condition grammar.

use log::debug;
use thiserror::Error;

use super::condition::Condition;
use super::constraint::Constraint;
use super::record::Record;
use super::schema::Schema;

/// Errors from record-level table operations.
#[derive(Error, Debug, PartialEq)]
pub enum TableError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("record is missing column '{column}' required by {constraint} constraint")]
    MissingConstraintColumn {
        column: String,
        constraint: &'static str,
    },
    #[error("primary key column '{0}' cannot be empty")]
    EmptyKeyValue(String),
    #[error("duplicate entry for {constraint} constraint on columns ({})", .columns.join(", "))]
    DuplicateKey {
        constraint: &'static str,
        columns: Vec<String>,
    },
    #[error("invalid condition: {0}")]
    InvalidCondition(String),
}

/// A named table: one schema, fixed at construction, plus its records in
/// insertion order. Insertion order is the only implicit row identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    schema: Schema,
    records: Vec<Record>,
}

impl Table {
    /// Create an empty table with the given schema.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Table {
            name: name.into(),
            schema,
            records: Vec::new(),
        }
    }

    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the table's schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Insert a record after enforcing primary-key and unique constraints.
    ///
    /// For each such constraint the record must supply every declared
    /// column; primary-key values must be non-empty; and the record's value
    /// tuple must not equal the tuple of any existing record that has all
    /// the constraint's columns (existing records missing one are skipped).
    /// Foreign-key constraints are not enforced on insert.
    ///
    /// On failure the table is unchanged.
    pub fn insert(&mut self, record: Record) -> Result<(), TableError> {
        for constraint in self.schema.constraints() {
            let columns = match constraint {
                Constraint::PrimaryKey { columns } | Constraint::Unique { columns } => columns,
                Constraint::ForeignKey { .. } => continue,
            };
            let kind = constraint.kind();
            let is_primary = matches!(constraint, Constraint::PrimaryKey { .. });

            let mut new_values = Vec::with_capacity(columns.len());
            for column in columns {
                let value = record.get(column).ok_or_else(|| {
                    TableError::MissingConstraintColumn {
                        column: column.clone(),
                        constraint: kind,
                    }
                })?;
                if is_primary && value.is_empty() {
                    return Err(TableError::EmptyKeyValue(column.clone()));
                }
                new_values.push(value);
            }

            for existing in &self.records {
                let existing_values: Option<Vec<&str>> =
                    columns.iter().map(|c| existing.get(c)).collect();
                if existing_values.as_deref() == Some(new_values.as_slice()) {
                    return Err(TableError::DuplicateKey {
                        constraint: kind,
                        columns: columns.clone(),
                    });
                }
            }
        }

        self.records.push(record);
        debug!("inserted record into table '{}'", self.name);
        Ok(())
    }

    /// Apply every column→value pair of `patch` to each record selected by
    /// `condition`, returning how many records matched. Patched columns not
    /// previously present in a record are simply added. Zero matches is Ok.
    ///
    /// Known gap, kept deliberately: no constraint re-validation happens
    /// after the patch, so an update can introduce duplicate key values.
    pub fn update(&mut self, patch: &Record, condition: &str) -> Result<usize, TableError> {
        let condition = Condition::parse(condition)?;
        let mut updated = 0;
        for record in &mut self.records {
            if condition.matches(record) {
                for (column, value) in patch.data() {
                    record.set(column.clone(), value.clone());
                }
                updated += 1;
            }
        }
        debug!("updated {} record(s) in table '{}'", updated, self.name);
        Ok(updated)
    }

    /// Remove every record selected by `condition` in a single pass,
    /// returning how many were removed. Zero is a valid outcome.
    pub fn delete(&mut self, condition: &str) -> Result<usize, TableError> {
        let condition = Condition::parse(condition)?;
        let before = self.records.len();
        self.records.retain(|record| !condition.matches(record));
        let deleted = before - self.records.len();
        debug!("deleted {} record(s) from table '{}'", deleted, self.name);
        Ok(deleted)
    }

    /// Remove a column from the schema and from every record.
    ///
    /// Constraints that reference the dropped column are left in place;
    /// a later insert will fail its missing-column check.
    pub fn drop_column(&mut self, column: &str) -> Result<(), TableError> {
        if !self.schema.remove_column(column) {
            return Err(TableError::ColumnNotFound(column.to_string()));
        }
        for record in &mut self.records {
            record.remove(column);
        }
        debug!("dropped column '{}' from table '{}'", column, self.name);
        Ok(())
    }

    /// Strip foreign-key constraints referencing the given table from this
    /// table's schema. Used by the catalog's drop-table cascade.
    pub(crate) fn remove_constraints_referencing(&mut self, table: &str) -> usize {
        self.schema.remove_constraints_referencing(table)
    }

    /// Append a record without constraint checks. Only for rebuilding a
    /// table from its persisted frame, where the rows were validated when
    /// they were first inserted.
    pub(crate) fn restore_record(&mut self, record: Record) {
        self.records.push(record);
    }
}
