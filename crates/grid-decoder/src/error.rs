//! Error types for grid decoding.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while loading grids or decoding binaries.
#[derive(Error, Debug)]
pub enum GridError {
    /// An input file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The byte stream cannot be split into 4-byte floats.
    #[error("malformed binary: {len} bytes is not a multiple of 4")]
    MalformedBinary { len: usize },

    /// Element counts or dimensions disagree.
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        context: String,
        expected: String,
        found: String,
    },

    /// Fewer than 12 whole months were present in the binary.
    #[error("truncated data: only {months_present} of 12 months present")]
    TruncatedData { months_present: usize },

    /// A token in a grid-definition file is not a number.
    #[error("invalid value {token:?} in {} at line {line}", path.display())]
    InvalidGridValue {
        path: PathBuf,
        line: usize,
        token: String,
    },

    /// The metadata template could not be loaded.
    #[error("metadata template error: {0}")]
    Metadata(String),

    /// Any other I/O failure while reading inputs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GridError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(
        context: impl Into<String>,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Create a Metadata error.
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }
}

impl From<serde_yaml::Error> for GridError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Metadata(err.to_string())
    }
}

/// Read a whole input file, reporting a missing file as `FileNotFound`.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => GridError::FileNotFound(path.to_path_buf()),
        _ => GridError::Io(err),
    })
}

/// Result type for grid decoding operations.
pub type Result<T> = std::result::Result<T, GridError>;
