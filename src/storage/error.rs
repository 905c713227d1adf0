use thiserror::Error;

/// Errors from persistence: file I/O, key validation, and frame parsing.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encryption key must not be empty")]
    EmptyKey,
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
}
