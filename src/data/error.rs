//! Data loader error types
//!
//! Everything here is a startup error: the dashboard refuses to start on a
//! file it cannot read completely.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the case table
#[derive(Error, Debug)]
pub enum LoadError {
    /// I/O operation failed
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A row could not be deserialized into a case record
    #[error("Line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    /// The episode date of a row is not a recognised date
    #[error("Line {line}: could not parse episode_date {value:?}")]
    InvalidDate { line: u64, value: String },
}

/// Result type alias for loader operations
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::MissingColumn("episode_date");
        assert_eq!(err.to_string(), "Missing required column: episode_date");

        let err = LoadError::InvalidDate {
            line: 4,
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Line 4: could not parse episode_date \"yesterday\""
        );
    }
}
