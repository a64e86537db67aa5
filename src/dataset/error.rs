//! Dataset error types
//!
//! Errors raised while fetching or parsing the accident CSV.

use thiserror::Error;

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Reading the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader could not decode the header
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Network fetch failed or returned a non-success status
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// The dataset could not be obtained earlier and is not available now
    #[error("Dataset unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
