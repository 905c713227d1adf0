//! Query Module
//!
//! The textual command layer over the storage engine: statement AST, the
//! hand-written command parser, the execution engine that dispatches
//! statements against a catalog, and the help-text subsystem.

pub mod ast;
pub mod engine;
pub mod help;
pub mod parser;

pub use self::ast::Statement;
pub use self::engine::{QueryEngine, QueryError};
pub use self::parser::{parse, ParseError};
