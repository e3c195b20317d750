//! Error types for NetCDF archive operations.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for NetCDF archive operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for writing and reading archive files.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// Output could not be written (permissions, disk space, library failure)
    #[error("failed to write {}: {reason}", path.display())]
    IoWrite { path: PathBuf, reason: String },

    /// Archive file could not be opened for reading
    #[error("failed to open {}: {reason}", path.display())]
    OpenFailed { path: PathBuf, reason: String },

    /// Missing required variable, dimension or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Requested month outside 1..=12
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(usize),

    /// NetCDF library error while reading
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl NetCdfError {
    /// Create an IoWrite error for `path`.
    pub fn io_write(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self::IoWrite {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create an OpenFailed error for `path`.
    pub fn open_failed(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self::OpenFailed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
