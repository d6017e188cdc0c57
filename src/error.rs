use std::path::PathBuf;

use pnm_core::{DecodeError, OperationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Operation error: {0}")]
    Operation(#[from] OperationError),

    #[error("Invalid extension for {}: expected {expected}", path.display())]
    InvalidExtension {
        path: PathBuf,
        expected: &'static str,
    },

    #[error("Invalid file count {0}: expected 1 or 3")]
    InvalidFileCount(u8),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}
