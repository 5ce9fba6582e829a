//! Directory-backed raster storage with row-oriented access.
//!
//! This crate provides the storage layer for raster analysis tools. A
//! raster named `elevation` under data directory `d` is the directory
//! `d/elevation/` holding a JSON header and a flat binary cell payload:
//!
//! ```text
//! d/elevation/
//! ├── header.json   rows, cols, cell kind, georeference, history
//! └── cells.bin     row-major cells, native endianness
//! ```
//!
//! Access is strictly row-oriented: readers fill a caller-owned,
//! pre-sized [`RowBuf`] so a full-grid pass allocates O(cols), not
//! O(rows × cols). Writers stream rows sequentially and commit the
//! header only in [`RowWriter::finalize`]; a raster without a header
//! is unreadable, so an interrupted write never yields a readable but
//! truncated map.
//!
//! Georeferenced rasters additionally expose the ground area covered by
//! one cell. For geographic (lat/lon) rasters that area varies by row;
//! see [`Georef::cell_area_at_row`].
//!
//! # Example
//!
//! ```ignore
//! use raster_store::{CellKind, RasterStore, RowBuf};
//!
//! let store = RasterStore::open("/data/rasters");
//! let mut reader = store.open_raster("elevation")?;
//! let mut row = reader.row_buf();
//! for r in 0..reader.rows() {
//!     reader.read_row(r, &mut row)?;
//!     // ...
//! }
//! ```

pub mod area;
pub mod error;
pub mod store;
pub mod testdata;
pub mod types;

// Re-export commonly used types at crate root
pub use area::{AreaCapability, Georef, GeorefKind};
pub use error::{RasterStoreError, Result};
pub use store::{legal_raster_name, RasterStore, RowReader, RowWriter};
pub use types::{CellKind, RasterHeader, RowBuf};
