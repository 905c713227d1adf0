// vaultdb - an embedded, single-process tabular data store.
//
// Named tables with typed schemas and row-level constraints, equality-
// filtered CRUD over string values, and whole-store persistence to a
// single file under a repeating-key XOR transform (obfuscation, not
// cryptography).

pub mod catalog;
pub mod query;
pub mod storage;

// Re-export key items for convenient access
pub use catalog::{Catalog, CatalogError, Column, Condition, Constraint, DataType};
pub use catalog::{Record, Schema, Table, TableError};
pub use query::{QueryEngine, QueryError, Statement};
pub use storage::StorageError;
