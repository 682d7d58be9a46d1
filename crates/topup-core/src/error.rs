use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by a top-up run.
#[derive(Error, Debug)]
pub enum TopUpError {
    /// An input file could not be read or did not hold the expected records.
    #[error("Failed to read records from {path}: {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: ReadCause,
    },

    /// The report could not be written to its destination.
    #[error("Failed to write report to {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Underlying reason behind a [`TopUpError::ReadFailure`].
#[derive(Error, Debug)]
pub enum ReadCause {
    /// The file could not be opened or read from disk.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file contents were not a JSON array of the expected records.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl TopUpError {
    /// Wrap `source` as a read failure for `path`.
    pub fn read(path: impl Into<PathBuf>, source: impl Into<ReadCause>) -> Self {
        TopUpError::ReadFailure {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Wrap `source` as a write failure for `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TopUpError::WriteFailure {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the top-up crates.
pub type Result<T> = std::result::Result<T, TopUpError>;
