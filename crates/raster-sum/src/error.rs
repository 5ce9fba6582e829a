//! Error types for the summation engine.

use raster_store::RasterStoreError;
use thiserror::Error;

/// Errors that can occur during a summation run.
///
/// Every variant is fatal: the run aborts, nothing is retried, and any
/// rows already written to an output raster stay on disk unfinalized.
#[derive(Error, Debug)]
pub enum SumError {
    /// Invalid run configuration, detected before any I/O.
    #[error("configuration error: {0}")]
    Config(String),

    /// The mask raster has the wrong cell kind.
    #[error("raster map <{0}> must be of type int32")]
    MaskKind(String),

    /// The mask raster's dimensions differ from the input raster's.
    #[error(
        "mask raster <{name}> is {mask_rows}x{mask_cols} but input is {rows}x{cols}"
    )]
    MaskShape {
        name: String,
        mask_rows: usize,
        mask_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// Underlying raster storage failure.
    #[error(transparent)]
    Store(#[from] RasterStoreError),
}

impl SumError {
    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for summation operations.
pub type Result<T> = std::result::Result<T, SumError>;
