// Command Parser Module
//
// Hand-written, case-insensitive parser for the textual command language.
// It splits statements into pre-validated arguments for the engine; it
// never touches storage internals. Condition strings are passed through
// verbatim and interpreted by the catalog layer.

use thiserror::Error;

use crate::catalog::condition::strip_quotes;
use crate::catalog::{Constraint, DataType};

use super::ast::{ColumnDef, Statement};

/// Errors from statement parsing.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("unsupported command: {0}")]
    UnsupportedCommand(String),
    #[error("malformed {command} statement: {message} (try HELP {command})")]
    Malformed {
        command: &'static str,
        message: String,
    },
    #[error("unknown data type: {0}")]
    UnknownDataType(String),
}

fn malformed(command: &'static str, message: impl Into<String>) -> ParseError {
    ParseError::Malformed {
        command,
        message: message.into(),
    }
}

/// Parse one statement. Keywords are case-insensitive; a trailing
/// semicolon is optional.
pub fn parse(input: &str) -> Result<Statement, ParseError> {
    let input = input.trim();
    let input = input.strip_suffix(';').unwrap_or(input).trim_end();

    if let Some(rest) = strip_keywords(input, &["help"]) {
        let topic = rest.trim();
        return Ok(Statement::Help {
            topic: (!topic.is_empty()).then(|| topic.to_string()),
        });
    }
    if let Some(rest) = strip_keywords(input, &["create", "table"]) {
        return parse_create(rest);
    }
    if let Some(rest) = strip_keywords(input, &["drop", "table"]) {
        return parse_drop_table(rest);
    }
    if let Some(rest) = strip_keywords(input, &["drop", "column"]) {
        return parse_drop_column(rest);
    }
    if let Some(rest) = strip_keywords(input, &["insert", "into"]) {
        return parse_insert(rest);
    }
    if let Some(rest) = strip_keywords(input, &["select"]) {
        return parse_select(rest);
    }
    if let Some(rest) = strip_keywords(input, &["update"]) {
        return parse_update(rest);
    }
    if let Some(rest) = strip_keywords(input, &["delete", "from"]) {
        return parse_delete(rest);
    }
    if let Some(rest) = strip_keywords(input, &["flush"]) {
        return parse_file_op(rest, "flush");
    }
    if let Some(rest) = strip_keywords(input, &["load"]) {
        return parse_file_op(rest, "load");
    }
    Err(ParseError::UnsupportedCommand(first_word(input).to_string()))
}

fn parse_create(rest: &str) -> Result<Statement, ParseError> {
    const CMD: &str = "create table";
    let (name, rest) =
        take_identifier(rest).ok_or_else(|| malformed(CMD, "expected table name"))?;
    let (body, trailing) = paren_group(rest)
        .ok_or_else(|| malformed(CMD, "expected column definitions in parentheses"))?;
    if !trailing.trim().is_empty() {
        return Err(malformed(CMD, "unexpected input after closing parenthesis"));
    }

    let mut columns = Vec::new();
    let mut constraints = Vec::new();
    for item in split_top_level(body, ',') {
        let item = item.trim();
        if item.is_empty() {
            return Err(malformed(CMD, "empty column definition"));
        }
        if let Some(rest) = strip_keywords(item, &["primary", "key"]) {
            constraints.push(Constraint::PrimaryKey {
                columns: constraint_columns(rest, CMD, "PRIMARY KEY")?,
            });
        } else if let Some(rest) = strip_keywords(item, &["unique"]) {
            constraints.push(Constraint::Unique {
                columns: constraint_columns(rest, CMD, "UNIQUE")?,
            });
        } else if let Some(rest) = strip_keywords(item, &["foreign", "key"]) {
            constraints.push(parse_foreign_key(rest)?);
        } else {
            columns.push(parse_column_def(item)?);
        }
    }

    Ok(Statement::CreateTable {
        name,
        columns,
        constraints,
    })
}

fn constraint_columns(
    rest: &str,
    cmd: &'static str,
    kind: &str,
) -> Result<Vec<String>, ParseError> {
    let (list, trailing) = paren_group(rest)
        .ok_or_else(|| malformed(cmd, format!("{kind} requires a column list")))?;
    if !trailing.trim().is_empty() {
        return Err(malformed(cmd, format!("unexpected input after {kind} column list")));
    }
    names_list(list).ok_or_else(|| malformed(cmd, format!("empty column name in {kind}")))
}

fn parse_foreign_key(rest: &str) -> Result<Constraint, ParseError> {
    const CMD: &str = "create table";
    let (columns, rest) = paren_group(rest)
        .ok_or_else(|| malformed(CMD, "FOREIGN KEY requires a column list"))?;
    let rest = strip_keywords(rest, &["references"])
        .ok_or_else(|| malformed(CMD, "FOREIGN KEY requires REFERENCES"))?;
    let (referenced_table, rest) = take_identifier(rest)
        .ok_or_else(|| malformed(CMD, "REFERENCES requires a table name"))?;
    let (referenced, trailing) = paren_group(rest)
        .ok_or_else(|| malformed(CMD, "REFERENCES requires a column list"))?;
    if !trailing.trim().is_empty() {
        return Err(malformed(CMD, "unexpected input after FOREIGN KEY definition"));
    }
    Ok(Constraint::ForeignKey {
        columns: names_list(columns)
            .ok_or_else(|| malformed(CMD, "empty column name in FOREIGN KEY"))?,
        referenced_table,
        referenced_columns: names_list(referenced)
            .ok_or_else(|| malformed(CMD, "empty column name in REFERENCES"))?,
    })
}

fn parse_column_def(item: &str) -> Result<ColumnDef, ParseError> {
    const CMD: &str = "create table";
    let tokens: Vec<&str> = item.split_whitespace().collect();
    let nullable = match tokens.as_slice() {
        [_, _] => true,
        [_, _, not, null]
            if not.eq_ignore_ascii_case("not") && null.eq_ignore_ascii_case("null") =>
        {
            false
        }
        _ => {
            return Err(malformed(
                CMD,
                format!("invalid column definition '{item}'"),
            ));
        }
    };
    Ok(ColumnDef {
        name: tokens[0].to_string(),
        data_type: parse_data_type(tokens[1])?,
        nullable,
    })
}

fn parse_data_type(token: &str) -> Result<DataType, ParseError> {
    match token.to_ascii_uppercase().as_str() {
        "INTEGER" => Ok(DataType::Integer),
        "FLOAT" => Ok(DataType::Float),
        "STRING" => Ok(DataType::String),
        _ => Err(ParseError::UnknownDataType(token.to_string())),
    }
}

fn parse_drop_table(rest: &str) -> Result<Statement, ParseError> {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [name] => Ok(Statement::DropTable {
            name: name.to_string(),
        }),
        _ => Err(malformed("drop table", "expected exactly one table name")),
    }
}

fn parse_drop_column(rest: &str) -> Result<Statement, ParseError> {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [table, column] => Ok(Statement::DropColumn {
            table: table.to_string(),
            column: column.to_string(),
        }),
        _ => Err(malformed(
            "drop column",
            "expected a table name and a column name",
        )),
    }
}

fn parse_insert(rest: &str) -> Result<Statement, ParseError> {
    const CMD: &str = "insert";
    let (table, rest) =
        take_identifier(rest).ok_or_else(|| malformed(CMD, "expected table name"))?;
    let (columns_str, rest) =
        paren_group(rest).ok_or_else(|| malformed(CMD, "expected column list"))?;
    let rest = strip_keywords(rest, &["values"])
        .ok_or_else(|| malformed(CMD, "expected VALUES keyword"))?;
    let (values_str, trailing) =
        paren_group(rest).ok_or_else(|| malformed(CMD, "expected value list"))?;
    if !trailing.trim().is_empty() {
        return Err(malformed(CMD, "unexpected input after value list"));
    }

    let columns =
        names_list(columns_str).ok_or_else(|| malformed(CMD, "empty column name"))?;
    if values_str.trim().is_empty() {
        return Err(malformed(CMD, "empty value list"));
    }
    let values: Vec<String> = split_top_level(values_str, ',')
        .iter()
        .map(|v| v.trim().to_string())
        .collect();
    Ok(Statement::Insert {
        table,
        columns,
        values,
    })
}

fn parse_select(rest: &str) -> Result<Statement, ParseError> {
    const CMD: &str = "select";
    let (columns_str, rest) = split_once_keyword(rest, "from")
        .ok_or_else(|| malformed(CMD, "expected FROM clause"))?;
    let columns_str = columns_str.trim();
    let columns = if columns_str == "*" {
        vec!["*".to_string()]
    } else {
        names_list(columns_str).ok_or_else(|| malformed(CMD, "empty column name"))?
    };
    let (table, rest) =
        take_identifier(rest).ok_or_else(|| malformed(CMD, "expected table name"))?;
    let condition = if rest.trim().is_empty() {
        String::new()
    } else {
        strip_keywords(rest, &["where"])
            .ok_or_else(|| malformed(CMD, "expected WHERE clause"))?
            .trim()
            .to_string()
    };
    Ok(Statement::Select {
        table,
        columns,
        condition,
    })
}

fn parse_update(rest: &str) -> Result<Statement, ParseError> {
    const CMD: &str = "update";
    let (head, condition) = split_once_keyword(rest, "where")
        .ok_or_else(|| malformed(CMD, "expected WHERE clause"))?;
    let (table, head) =
        take_identifier(head).ok_or_else(|| malformed(CMD, "expected table name"))?;
    let assignments_str = strip_keywords(head, &["set"])
        .ok_or_else(|| malformed(CMD, "expected SET clause"))?;

    let mut assignments = Vec::new();
    for part in split_top_level(assignments_str, ',') {
        let (column, value) = part
            .split_once('=')
            .ok_or_else(|| malformed(CMD, format!("invalid assignment '{}'", part.trim())))?;
        let column = column.trim();
        if column.is_empty() {
            return Err(malformed(CMD, "assignment with empty column name"));
        }
        assignments.push((
            column.to_string(),
            strip_quotes(value.trim()).to_string(),
        ));
    }
    if assignments.is_empty() {
        return Err(malformed(CMD, "expected at least one assignment"));
    }
    Ok(Statement::Update {
        table,
        assignments,
        condition: condition.trim().to_string(),
    })
}

fn parse_delete(rest: &str) -> Result<Statement, ParseError> {
    const CMD: &str = "delete";
    let (table, rest) =
        take_identifier(rest).ok_or_else(|| malformed(CMD, "expected table name"))?;
    let condition = strip_keywords(rest, &["where"])
        .ok_or_else(|| malformed(CMD, "expected WHERE clause"))?;
    Ok(Statement::Delete {
        table,
        condition: condition.trim().to_string(),
    })
}

fn parse_file_op(rest: &str, cmd: &'static str) -> Result<Statement, ParseError> {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [path, key] => {
            let path = path.to_string();
            let key = key.to_string();
            Ok(if cmd == "flush" {
                Statement::Flush { path, key }
            } else {
                Statement::Load { path, key }
            })
        }
        _ => Err(malformed(cmd, "expected a filename and a key")),
    }
}

// --- lexical helpers ---

/// Strip a sequence of keywords from the front of `input`, each matched
/// case-insensitively at a word boundary. Returns the remainder.
fn strip_keywords<'a>(input: &'a str, keywords: &[&str]) -> Option<&'a str> {
    let mut rest = input;
    for keyword in keywords {
        rest = rest.trim_start();
        let head = rest.get(..keyword.len())?;
        if !head.eq_ignore_ascii_case(keyword) {
            return None;
        }
        let after = &rest[keyword.len()..];
        if after
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            return None;
        }
        rest = after;
    }
    Some(rest.trim_start())
}

/// Split at the first occurrence of `keyword` as a stand-alone word,
/// case-insensitively. Returns (before, after).
fn split_once_keyword<'a>(s: &'a str, keyword: &str) -> Option<(&'a str, &'a str)> {
    let lower = s.to_ascii_lowercase();
    let needle = keyword.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut start = 0;
    while let Some(found) = lower[start..].find(&needle) {
        let pos = start + found;
        let end = pos + needle.len();
        let boundary = |b: u8| !(b.is_ascii_alphanumeric() || b == b'_');
        let before_ok = pos == 0 || boundary(bytes[pos - 1]);
        let after_ok = end == bytes.len() || boundary(bytes[end]);
        if before_ok && after_ok {
            return Some((&s[..pos], &s[end..]));
        }
        start = end;
    }
    None
}

/// Take the leading identifier, delimited by whitespace or `(`.
fn take_identifier(s: &str) -> Option<(String, &str)> {
    let s = s.trim_start();
    let end = s
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some((s[..end].to_string(), &s[end..]))
}

/// Extract the contents of a leading parenthesized group, respecting
/// nesting and single-quoted literals. Returns (inside, remainder).
fn paren_group(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    let mut chars = s.char_indices();
    if !matches!(chars.next(), Some((_, '('))) {
        return None;
    }
    let mut depth = 1usize;
    let mut in_quotes = false;
    for (i, c) in chars {
        match c {
            '\'' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[1..i], &s[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on `delimiter` at paren depth zero, outside single quotes.
fn split_top_level(s: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '\'' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => depth = depth.saturating_sub(1),
            c if c == delimiter && depth == 0 && !in_quotes => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Comma-separated names, each trimmed; `None` if any is empty.
fn names_list(list: &str) -> Option<Vec<String>> {
    let names: Vec<String> = list.split(',').map(|n| n.trim().to_string()).collect();
    if names.iter().any(String::is_empty) {
        return None;
    }
    Some(names)
}

fn first_word(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}
