//! Error types for raster storage.

use thiserror::Error;

use crate::types::CellKind;

/// Errors that can occur while accessing raster storage.
#[derive(Error, Debug)]
pub enum RasterStoreError {
    /// The named raster does not exist in the data directory.
    #[error("raster map <{0}> not found")]
    NotFound(String),

    /// The raster exists but could not be opened.
    #[error("unable to open raster map <{name}>: {message}")]
    OpenFailed { name: String, message: String },

    /// The raster header is missing or unparseable.
    #[error("unable to read header of <{name}>: {message}")]
    InvalidHeader { name: String, message: String },

    /// The name is not usable as a raster map name.
    #[error("<{0}> is an illegal raster map name")]
    IllegalName(String),

    /// A raster with this name already exists.
    #[error("raster map <{0}> already exists")]
    AlreadyExists(String),

    /// Failed to read a row of cell data.
    #[error("unable to read raster map <{name}> row {row}: {message}")]
    ReadFailed {
        name: String,
        row: usize,
        message: String,
    },

    /// Failed to write a row or commit the header.
    #[error("failed writing raster map <{name}>: {message}")]
    WriteFailed { name: String, message: String },

    /// The caller's row buffer kind does not match the raster's kind.
    #[error("row buffer is {buffer} but raster map <{name}> is {raster}")]
    KindMismatch {
        name: String,
        buffer: CellKind,
        raster: CellKind,
    },

    /// Row index outside the raster's extent.
    #[error("row {row} out of range for raster map <{name}> with {rows} rows")]
    RowOutOfRange {
        name: String,
        row: usize,
        rows: usize,
    },

    /// Underlying filesystem error.
    #[error("storage error: {0}")]
    Storage(String),
}

impl RasterStoreError {
    /// Create an OpenFailed error.
    pub fn open_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OpenFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidHeader error.
    pub fn invalid_header(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a ReadFailed error.
    pub fn read_failed(name: impl Into<String>, row: usize, message: impl Into<String>) -> Self {
        Self::ReadFailed {
            name: name.into(),
            row,
            message: message.into(),
        }
    }

    /// Create a WriteFailed error.
    pub fn write_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WriteFailed {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for RasterStoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type for raster storage operations.
pub type Result<T> = std::result::Result<T, RasterStoreError>;
