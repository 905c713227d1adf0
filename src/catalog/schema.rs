// Schema Module
//
// Ordered column definitions plus constraints for one table. Insertion
// order is declaration order, which is also the on-disk order.

use super::column::Column;
use super::constraint::Constraint;

/// The structure of a table: columns and constraints, both in insertion order.
///
/// At most one PrimaryKey constraint is meaningful per schema; the engine
/// does not forbid more, but the parser layer only ever produces the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    columns: Vec<Column>,
    constraints: Vec<Constraint>,
}

impl Schema {
    /// Create a new, empty schema.
    pub fn new() -> Self {
        Schema::default()
    }

    /// Append a column. Duplicate names are not checked here.
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Append a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Constraints in declaration order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Check whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    /// Remove the named column, preserving the order of the rest.
    /// Returns false if no such column exists. Constraints that reference
    /// the column are deliberately left in place.
    pub(crate) fn remove_column(&mut self, name: &str) -> bool {
        match self.columns.iter().position(|c| c.name() == name) {
            Some(idx) => {
                self.columns.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Strip every foreign-key constraint whose referenced table matches.
    /// Returns the number of constraints removed.
    pub(crate) fn remove_constraints_referencing(&mut self, table: &str) -> usize {
        let before = self.constraints.len();
        self.constraints
            .retain(|c| c.referenced_table() != Some(table));
        before - self.constraints.len()
    }
}
