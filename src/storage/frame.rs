// Frame Serialization Module
//
// The on-disk layout (before encryption) is one text frame per table,
// concatenated, newline-separated:
//
//   TABLE:<name>
//   COLUMNS:<col1>,<col2>,...           schema column order
//   CONSTRAINTS:<c1>;<c2>;...           empty after the marker if none
//   RECORDS:<n>
//   <value1>|<value2>|...               n lines, values in COLUMNS order
//   END_TABLE
//
// Constraints render as PK(col,...), UQ(col,...), or
// FK(col,...)-><refTable>(refCol,...). A value missing from a record is an
// empty field. Declared column types are not round-tripped: every column
// reloads as STRING.
//
// Parsing is strict: any missing or misplaced marker line, unknown
// constraint token, or non-numeric record count aborts the whole load.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::catalog::{Column, Constraint, DataType, Record, Schema, Table};
use crate::storage::StorageError;

/// Serialize a set of tables into the plaintext frame image.
pub(crate) fn serialize<'a>(tables: impl Iterator<Item = &'a Table>) -> String {
    let mut out = String::new();
    for table in tables {
        let columns = table.schema().columns();

        out.push_str("TABLE:");
        out.push_str(table.name());
        out.push('\n');

        out.push_str("COLUMNS:");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(column.name());
        }
        out.push('\n');

        out.push_str("CONSTRAINTS:");
        for (i, constraint) in table.schema().constraints().iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            render_constraint(constraint, &mut out);
        }
        out.push('\n');

        let _ = writeln!(out, "RECORDS:{}", table.records().len());
        for record in table.records() {
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                if let Some(value) = record.get(column.name()) {
                    out.push_str(value);
                }
            }
            out.push('\n');
        }
        out.push_str("END_TABLE\n");
    }
    out
}

fn render_constraint(constraint: &Constraint, out: &mut String) {
    match constraint {
        Constraint::PrimaryKey { columns } => {
            out.push_str("PK(");
            out.push_str(&columns.join(","));
            out.push(')');
        }
        Constraint::Unique { columns } => {
            out.push_str("UQ(");
            out.push_str(&columns.join(","));
            out.push(')');
        }
        Constraint::ForeignKey {
            columns,
            referenced_table,
            referenced_columns,
        } => {
            out.push_str("FK(");
            out.push_str(&columns.join(","));
            out.push_str(")->");
            out.push_str(referenced_table);
            out.push('(');
            out.push_str(&referenced_columns.join(","));
            out.push(')');
        }
    }
}

/// Parse a plaintext frame image back into a table map.
///
/// The result is a complete new table set; the caller swaps it in only on
/// success, so a parse failure never leaves a partially loaded store.
pub(crate) fn parse(text: &str) -> Result<BTreeMap<String, Table>, StorageError> {
    let mut lines = text.lines();
    let mut tables = BTreeMap::new();

    while let Some(raw) = lines.next() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let name = line
            .strip_prefix("TABLE:")
            .ok_or_else(|| malformed(format!("expected TABLE: marker, found '{line}'")))?
            .trim();
        if name.is_empty() {
            return Err(malformed("TABLE: marker with empty table name"));
        }

        let columns_str = next_marker_line(&mut lines, "COLUMNS:")?;
        let column_names: Vec<String> = if columns_str.is_empty() {
            Vec::new()
        } else {
            column_names_from(columns_str)
        };

        let mut schema = Schema::new();
        for column in &column_names {
            schema.add_column(Column::new(column.clone(), DataType::String, true, None));
        }

        let constraints_str = next_marker_line(&mut lines, "CONSTRAINTS:")?;
        if !constraints_str.is_empty() {
            for token in constraints_str.split(';') {
                schema.add_constraint(parse_constraint(token.trim())?);
            }
        }

        let count_str = next_marker_line(&mut lines, "RECORDS:")?;
        let count: usize = count_str
            .parse()
            .map_err(|_| malformed(format!("invalid record count '{count_str}'")))?;

        let mut table = Table::new(name, schema);
        for _ in 0..count {
            let row = lines
                .next()
                .ok_or_else(|| malformed("unexpected end of data inside record block"))?;
            let values: Vec<&str> = row.split('|').collect();
            let mut record = Record::new();
            for (i, column) in column_names.iter().enumerate() {
                record.set(column.clone(), *values.get(i).unwrap_or(&""));
            }
            table.restore_record(record);
        }

        let end = lines
            .next()
            .ok_or_else(|| malformed("missing END_TABLE marker"))?;
        if end.trim() != "END_TABLE" {
            return Err(malformed(format!(
                "expected END_TABLE, found '{}'",
                end.trim()
            )));
        }

        tables.insert(name.to_string(), table);
    }

    Ok(tables)
}

fn next_marker_line<'a>(
    lines: &mut std::str::Lines<'a>,
    marker: &str,
) -> Result<&'a str, StorageError> {
    let line = lines
        .next()
        .ok_or_else(|| malformed(format!("missing {marker} line")))?
        .trim();
    line.strip_prefix(marker)
        .map(str::trim)
        .ok_or_else(|| malformed(format!("expected {marker} line, found '{line}'")))
}

fn parse_constraint(token: &str) -> Result<Constraint, StorageError> {
    if let Some(body) = strip_wrapped(token, "PK(") {
        return Ok(Constraint::PrimaryKey {
            columns: constraint_columns(body, token)?,
        });
    }
    if let Some(body) = strip_wrapped(token, "UQ(") {
        return Ok(Constraint::Unique {
            columns: constraint_columns(body, token)?,
        });
    }
    if let Some(rest) = token.strip_prefix("FK(") {
        let (local, rest) = rest
            .split_once(")->")
            .ok_or_else(|| malformed(format!("invalid foreign key token '{token}'")))?;
        let (referenced_table, rest) = rest
            .split_once('(')
            .ok_or_else(|| malformed(format!("invalid foreign key token '{token}'")))?;
        let referenced = rest
            .strip_suffix(')')
            .ok_or_else(|| malformed(format!("invalid foreign key token '{token}'")))?;
        let referenced_table = referenced_table.trim();
        if referenced_table.is_empty() {
            return Err(malformed(format!(
                "foreign key token '{token}' has no referenced table"
            )));
        }
        return Ok(Constraint::ForeignKey {
            columns: constraint_columns(local, token)?,
            referenced_table: referenced_table.to_string(),
            referenced_columns: constraint_columns(referenced, token)?,
        });
    }
    Err(malformed(format!("unknown constraint token '{token}'")))
}

/// Column names of one constraint token; a constraint over zero columns
/// or with an empty name is never emitted, so it is rejected on the way in.
fn constraint_columns(list: &str, token: &str) -> Result<Vec<String>, StorageError> {
    let columns = column_names_from(list);
    if columns.iter().any(String::is_empty) {
        return Err(malformed(format!(
            "empty column name in constraint token '{token}'"
        )));
    }
    Ok(columns)
}

fn strip_wrapped<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    token.strip_prefix(prefix)?.strip_suffix(')')
}

fn column_names_from(list: &str) -> Vec<String> {
    list.split(',').map(|name| name.trim().to_string()).collect()
}

fn malformed(message: impl Into<String>) -> StorageError {
    StorageError::MalformedFrame(message.into())
}
