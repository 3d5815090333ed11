use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for input validation, batch transport, and output failures.
#[derive(Debug, Error)]
pub enum PairCountError {
    #[error("input table '{path}' was not found")]
    SourceNotFound { path: PathBuf },
    #[error("input table '{path}' is empty")]
    SourceEmpty { path: PathBuf },
    #[error("no valid records remained after filtering")]
    NoDataProcessed,
    #[error("batch {batch} failed: {reason}")]
    BatchFailed { batch: usize, reason: String },
    #[error("failed to write results to '{path}': {reason}")]
    WriteFailed { path: PathBuf, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("configuration error: {0}")]
    Configuration(String),
}
