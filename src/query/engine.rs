// Execution Engine Module
//
// Dispatches parsed statements against a catalog it owns, and streams all
// user-facing output (selected rows, row counts, confirmations, help text)
// to a caller-supplied sink. This is the only layer that turns statements
// into engine calls; it never re-tokenizes what the parser produced.

use std::io::Write;

use log::debug;
use thiserror::Error;

use crate::catalog::condition::strip_quotes;
use crate::catalog::{
    Catalog, CatalogError, Column, Condition, Record, Schema, Table, TableError,
};
use crate::storage::StorageError;

use super::ast::Statement;
use super::help;
use super::parser::{parse, ParseError};

/// Errors surfaced to the caller of [`QueryEngine::execute`]. Each carries
/// enough context to build a user-facing message; none of them terminate
/// the process.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("table not found: {0}")]
    TableNotFound(String),
    #[error("table already exists: {0}")]
    TableAlreadyExists(String),
    #[error("column count ({columns}) does not match value count ({values})")]
    ColumnValueMismatch { columns: usize, values: usize },
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Executes statements against an explicitly owned catalog.
///
/// Construct one per store; there is no shared global state. All
/// operations are synchronous and run to completion.
#[derive(Debug, Default)]
pub struct QueryEngine {
    catalog: Catalog,
}

impl QueryEngine {
    /// Create an engine over an empty catalog.
    pub fn new() -> Self {
        QueryEngine::default()
    }

    /// Create an engine over an existing catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        QueryEngine { catalog }
    }

    /// The underlying store.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Parse and execute one line of input.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), QueryError> {
        let statement = parse(line)?;
        self.execute(statement, out)
    }

    /// Execute one parsed statement, writing output to `out`.
    pub fn execute<W: Write>(
        &mut self,
        statement: Statement,
        out: &mut W,
    ) -> Result<(), QueryError> {
        debug!("executing statement: {:?}", statement);
        match statement {
            Statement::CreateTable {
                name,
                columns,
                constraints,
            } => {
                if self.catalog.table_exists(&name) {
                    return Err(QueryError::TableAlreadyExists(name));
                }
                let mut schema = Schema::new();
                for def in columns {
                    schema.add_column(Column::new(def.name, def.data_type, def.nullable, None));
                }
                for constraint in constraints {
                    schema.add_constraint(constraint);
                }
                self.catalog.add_table(Table::new(name.clone(), schema));
                writeln!(out, "Table '{name}' created.")?;
            }
            Statement::DropTable { name } => {
                self.catalog.drop_table(&name)?;
                writeln!(out, "Table '{name}' dropped.")?;
            }
            Statement::DropColumn { table, column } => {
                let table_ref = self
                    .catalog
                    .get_table_mut(&table)
                    .ok_or_else(|| QueryError::TableNotFound(table.clone()))?;
                table_ref.drop_column(&column)?;
                writeln!(out, "Column '{column}' dropped from table '{table}'.")?;
            }
            Statement::Insert {
                table,
                columns,
                values,
            } => {
                if columns.len() != values.len() {
                    return Err(QueryError::ColumnValueMismatch {
                        columns: columns.len(),
                        values: values.len(),
                    });
                }
                let table_ref = self
                    .catalog
                    .get_table_mut(&table)
                    .ok_or_else(|| QueryError::TableNotFound(table.clone()))?;
                let mut record = Record::new();
                for (column, value) in columns.into_iter().zip(values) {
                    record.set(column, strip_quotes(&value));
                }
                table_ref.insert(record)?;
                writeln!(out, "1 record inserted into '{table}'.")?;
            }
            Statement::Select {
                table,
                columns,
                condition,
            } => {
                let table_ref = self
                    .catalog
                    .get_table(&table)
                    .ok_or_else(|| QueryError::TableNotFound(table.clone()))?;
                let condition = Condition::parse(&condition)?;
                let star = columns.len() == 1 && columns[0] == "*";
                let mut selected = 0;
                for record in table_ref.records() {
                    if !condition.matches(record) {
                        continue;
                    }
                    let mut fields = Vec::new();
                    if star {
                        for column in table_ref.schema().columns() {
                            if let Some(value) = record.get(column.name()) {
                                fields.push(format!("{}: {}", column.name(), value));
                            }
                        }
                    } else {
                        for column in &columns {
                            if let Some(value) = record.get(column) {
                                fields.push(format!("{column}: {value}"));
                            }
                        }
                    }
                    writeln!(out, "{}", fields.join(" | "))?;
                    selected += 1;
                }
                writeln!(out, "{selected} row(s) selected from '{table}'.")?;
            }
            Statement::Update {
                table,
                assignments,
                condition,
            } => {
                let table_ref = self
                    .catalog
                    .get_table_mut(&table)
                    .ok_or_else(|| QueryError::TableNotFound(table.clone()))?;
                let mut patch = Record::new();
                for (column, value) in assignments {
                    patch.set(column, value);
                }
                let updated = table_ref.update(&patch, &condition)?;
                writeln!(out, "{updated} record(s) updated in '{table}'.")?;
            }
            Statement::Delete { table, condition } => {
                let table_ref = self
                    .catalog
                    .get_table_mut(&table)
                    .ok_or_else(|| QueryError::TableNotFound(table.clone()))?;
                let deleted = table_ref.delete(&condition)?;
                writeln!(out, "{deleted} record(s) deleted from '{table}'.")?;
            }
            Statement::Flush { path, key } => {
                self.catalog.flush_to_file(&path, &key)?;
                writeln!(out, "Database flushed to '{path}'.")?;
            }
            Statement::Load { path, key } => {
                self.catalog.load_from_file(&path, &key)?;
                writeln!(
                    out,
                    "Loaded {} table(s) from '{path}'.",
                    self.catalog.table_names().len()
                )?;
            }
            Statement::Help { topic } => match topic {
                Some(topic) => match help::lookup(&topic) {
                    Some(entry) => help::write_topic(out, entry)?,
                    None => writeln!(out, "No help available for command: {topic}")?,
                },
                None => help::write_overview(out)?,
            },
        }
        Ok(())
    }
}
