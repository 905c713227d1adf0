//! Storage Module
//!
//! Persistence of the whole store to a single file: the text frame format,
//! the repeating-key XOR transform applied over it, and the storage error
//! taxonomy. The catalog drives flush and load; this module owns the byte-
//! level contract.

pub mod cipher;
pub(crate) mod frame;
mod error;

pub use self::error::StorageError;
