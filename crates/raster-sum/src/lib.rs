//! Row-streaming summation of raster cell values.
//!
//! Computes the total (optionally area-weighted) sum of the cells of a
//! raster that pass an optional mask test, and can emit a per-cell
//! output raster holding each qualifying cell's contribution. The scan
//! is a single sequential pass over the rows:
//!
//! ```text
//! RowDriver::run
//!      │
//!      ├─► per row: CellAreaProvider::area_for_row
//!      │            read input row (and mask row, if configured)
//!      │
//!      ├─► per col: MaskFilter::is_included
//!      │            CellAccumulator::cell
//!      │                 │ fill value, NaN skip, value · area,
//!      │                 │ running f64 total, narrowed output cell
//!      │
//!      └─► write output row (if an output raster was requested)
//! ```
//!
//! Accumulation always happens in double precision, even when the
//! output raster is single-precision. Buffers are allocated once and
//! reused; memory is O(cols).
//!
//! # Example
//!
//! ```ignore
//! use raster_store::RasterStore;
//! use raster_sum::{RowDriver, SumConfig};
//!
//! let store = RasterStore::open("/data/rasters");
//! let config = SumConfig::new("forest_biomass");
//! let outcome = RowDriver::new(&store, &config).run()?;
//! println!("{:.6}", outcome.scaled(config.scale));
//! ```

pub mod accumulate;
pub mod area;
pub mod config;
pub mod driver;
pub mod error;
pub mod mask;
pub mod report;

// Re-export commonly used types at crate root
pub use accumulate::CellAccumulator;
pub use area::CellAreaProvider;
pub use config::{OutputKind, SumConfig};
pub use driver::RowDriver;
pub use error::{Result, SumError};
pub use mask::MaskFilter;
pub use report::SumOutcome;
