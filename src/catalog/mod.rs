//! Catalog Module
//!
//! The catalog is the top-level owner of all tables and the engine's single
//! entry point: it manages the table map, performs cross-table bookkeeping
//! when a table is dropped, and drives serialization of the whole store to
//! and from an encrypted file.

pub mod column;
pub mod condition;
pub mod constraint;
pub mod record;
pub mod schema;
pub mod table;

// Re-export key types
pub use self::column::{Column, DataType};
pub use self::condition::Condition;
pub use self::constraint::Constraint;
pub use self::record::Record;
pub use self::schema::Schema;
pub use self::table::{Table, TableError};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

use crate::storage::cipher;
use crate::storage::frame;
use crate::storage::StorageError;

/// Errors from catalog-level table management.
#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("table not found: {0}")]
    TableNotFound(String),
}

/// The store of all tables, keyed by name.
///
/// Construct one explicitly and pass it where it is needed; there is no
/// process-wide instance. All operations are synchronous and run to
/// completion, so a caller sharing a catalog across threads must serialize
/// access to the whole thing.
///
/// The map is ordered by table name so that the serialized image is
/// deterministic.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: BTreeMap<String, Table>,
}

impl Catalog {
    /// Create a new, empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Insert a table under its own name, silently replacing any existing
    /// table with that name. Callers that care check existence first.
    pub fn add_table(&mut self, table: Table) {
        let name = table.name().to_string();
        if self.tables.insert(name.clone(), table).is_some() {
            warn!("table '{}' replaced an existing table of the same name", name);
        }
    }

    /// Check whether a table with this name exists.
    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Get a mutable table by name.
    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    /// All tables, ordered by name.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// All table names, in order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Remove a table, then strip from every remaining table any
    /// foreign-key constraint that referenced it. Dependent rows are not
    /// cascade-deleted; only the dangling constraint metadata goes.
    pub fn drop_table(&mut self, name: &str) -> Result<(), CatalogError> {
        if self.tables.remove(name).is_none() {
            return Err(CatalogError::TableNotFound(name.to_string()));
        }
        let mut stripped = 0;
        for table in self.tables.values_mut() {
            stripped += table.remove_constraints_referencing(name);
        }
        if stripped > 0 {
            info!(
                "dropped table '{}' and {} dangling foreign-key constraint(s)",
                name, stripped
            );
        }
        Ok(())
    }

    /// Serialize every table, encrypt the image with `key`, and write it to
    /// `path` as a single blocking overwrite. The in-memory store is never
    /// modified by a flush, successful or not.
    pub fn flush_to_file(
        &self,
        path: impl AsRef<Path>,
        key: &str,
    ) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::EmptyKey);
        }
        let mut image = frame::serialize(self.tables.values()).into_bytes();
        cipher::apply_keystream(&mut image, key.as_bytes());
        fs::write(path.as_ref(), image)?;
        info!(
            "flushed {} table(s) to {}",
            self.tables.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Read `path`, decrypt with `key`, and rebuild the table set from the
    /// serialized frames. The new tables replace the old ones only once the
    /// whole image has parsed; on any failure the catalog is left unchanged.
    ///
    /// Decryption with a wrong key cannot fail by itself (the XOR transform
    /// always "succeeds"); it produces garbage that then fails UTF-8 or
    /// frame parsing, surfacing as [`StorageError::MalformedFrame`].
    pub fn load_from_file(
        &mut self,
        path: impl AsRef<Path>,
        key: &str,
    ) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::EmptyKey);
        }
        let mut image = fs::read(path.as_ref())?;
        cipher::apply_keystream(&mut image, key.as_bytes());
        let text = String::from_utf8(image).map_err(|_| {
            StorageError::MalformedFrame(
                "decrypted image is not valid UTF-8 (wrong key?)".to_string(),
            )
        })?;
        let tables = frame::parse(&text)?;
        info!(
            "loaded {} table(s) from {}",
            tables.len(),
            path.as_ref().display()
        );
        self.tables = tables;
        Ok(())
    }
}
