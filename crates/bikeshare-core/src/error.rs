use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A prompt answer is not one of the accepted tokens.
    #[error("Invalid {field}: {value:?}")]
    InvalidSelection { field: &'static str, value: String },

    /// The city has no configured dataset, or its file does not exist.
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    /// A row could not be turned into a trip record.
    #[error("Malformed record at {path}:{line}: {reason}")]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input (bad quoting, ragged rows, ...).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The interactive input stream ended before an answer was given.
    #[error("Input closed")]
    InputClosed,

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BikeshareError {
    /// Data-integrity failures abort the current analysis run but leave the
    /// session free to offer a restart.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::DatasetNotFound(_)
                | Self::MalformedRecord { .. }
                | Self::FileRead { .. }
                | Self::Csv(_)
        )
    }
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
