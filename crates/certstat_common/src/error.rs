//! Error types for certstat.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertstatError {
    #[error("No category mapping for validator error: {0:?}")]
    UnmappedError(String),

    #[error("Chain {0} has no intermediate index entry")]
    MissingIntermediateIndex(i64),

    #[error("Chain {id}: index {index} is out of range for a chain of {len} certificates")]
    ChainIndexOutOfRange { id: i64, index: usize, len: usize },

    #[error(
        "Consistency check failed: {valid_chains} chains classified as valid, \
         but {accepted} chains have no root store error"
    )]
    ConsistencyViolation { valid_chains: u64, accepted: u64 },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CertstatError {
    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        CertstatError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CertstatError>;
