use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A record with this id already exists.
    #[error("Duplicate video id: {0}")]
    DuplicateId(String),

    /// Stored payload no longer matches the hash recorded at save time.
    #[error("Stored video {0} is corrupted")]
    Corrupted(String),

    /// The blocking database task panicked or was cancelled.
    #[error("Storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// The connection mutex was poisoned by a panicking holder.
    #[error("Database lock poisoned")]
    LockPoisoned,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
