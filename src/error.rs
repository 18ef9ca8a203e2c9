//! Error types for songspace.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongSpaceError {
    /// The allocator could not provide room for another record.
    #[error("Out of memory: could not allocate a record slot")]
    OutOfMemory,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// An index whose links break the placement rules.
    #[error("Corrupt index structure: {0}")]
    CorruptStructure(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// A CSV dataset that could not be read; the error carries the record position.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// A dataset row that failed to parse, with its 1-based line number.
    #[error("Malformed song row at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl From<std::collections::TryReserveError> for SongSpaceError {
    fn from(_: std::collections::TryReserveError) -> Self {
        SongSpaceError::OutOfMemory
    }
}

pub type Result<T> = std::result::Result<T, SongSpaceError>;
