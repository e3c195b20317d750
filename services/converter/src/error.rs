//! Error types for converting a single year.

use grid_decoder::GridError;
use netcdf_archive::NetCdfError;
use thiserror::Error;

/// Errors that abort the conversion of one year.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("decode failed: {0}")]
    Decode(#[from] GridError),

    #[error("write failed: {0}")]
    Write(#[from] NetCdfError),
}

/// Result type for per-year conversion.
pub type Result<T> = std::result::Result<T, ConvertError>;
