// Statement AST Module
//
// Parsed command forms handed to the execution engine. The parser produces
// already-split arguments: table name, ordered column and value lists,
// assignment pairs, and a single raw condition string. Condition strings
// are interpreted by the catalog layer, not here.

use crate::catalog::{Constraint, DataType};

/// One column definition inside CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable {
        name: String,
        columns: Vec<ColumnDef>,
        constraints: Vec<Constraint>,
    },
    DropTable {
        name: String,
    },
    DropColumn {
        table: String,
        column: String,
    },
    Insert {
        table: String,
        columns: Vec<String>,
        values: Vec<String>,
    },
    /// `columns` is either an explicit list or the single entry `*`.
    Select {
        table: String,
        columns: Vec<String>,
        condition: String,
    },
    Update {
        table: String,
        assignments: Vec<(String, String)>,
        condition: String,
    },
    Delete {
        table: String,
        condition: String,
    },
    Flush {
        path: String,
        key: String,
    },
    Load {
        path: String,
        key: String,
    },
    Help {
        topic: Option<String>,
    },
}
