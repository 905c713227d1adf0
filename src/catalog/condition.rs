// Condition Module
//
// The single-equality row-selection predicate used by update, delete, and
// the select-side filter. The grammar is deliberately small: the empty
// string or the literal token "all" matches everything; otherwise exactly
// one `<column> = <literal>` clause, where the literal may be wrapped in
// single quotes (stripped before comparison, no escaping). No AND/OR,
// no inequality operators.

use super::record::Record;
use super::table::TableError;

/// A parsed row-selection predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Matches every record.
    All,
    /// Matches records whose value for `column` equals `value`.
    Equals { column: String, value: String },
}

impl Condition {
    /// Parse a condition string.
    ///
    /// Fails with [`TableError::InvalidCondition`] if the input is neither
    /// empty, "all", nor a single well-formed equality clause.
    pub fn parse(input: &str) -> Result<Self, TableError> {
        let cond = input.trim();
        if cond.is_empty() || cond == "all" {
            return Ok(Condition::All);
        }
        let Some((column, value)) = cond.split_once('=') else {
            return Err(TableError::InvalidCondition(input.to_string()));
        };
        let column = column.trim();
        let value = value.trim();
        // A quote-wrapped literal may contain anything, '=' included; a
        // second '=' outside quotes means more than one clause.
        let quoted =
            value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'');
        if column.is_empty() || (!quoted && value.contains('=')) {
            return Err(TableError::InvalidCondition(input.to_string()));
        }
        Ok(Condition::Equals {
            column: column.to_string(),
            value: strip_quotes(value).to_string(),
        })
    }

    /// Evaluate the condition against a record. A record that lacks the
    /// condition's column never matches.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Condition::All => true,
            Condition::Equals { column, value } => {
                record.get(column) == Some(value.as_str())
            }
        }
    }
}

/// Strip a single pair of surrounding apostrophes, if present.
pub(crate) fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
