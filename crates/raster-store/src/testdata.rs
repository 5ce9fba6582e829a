//! Test data generation utilities.
//!
//! Helpers for creating small rasters with known values for unit and
//! integration tests, both in this crate and in crates building on the
//! store. Grids are kept tiny (a few rows and columns) so fixtures are
//! cheap to create per test.

use crate::area::Georef;
use crate::error::Result;
use crate::store::RasterStore;
use crate::types::{CellKind, RowBuf};

/// Create test grid values where value at (col, row) = col * 1000 + row.
/// This pattern makes it easy to verify data integrity after reads.
pub fn create_test_grid(cols: usize, rows: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            data.push((col * 1000 + row) as f64);
        }
    }
    data
}

/// Write an integer raster from row-major values.
pub fn write_raster_i32(
    store: &RasterStore,
    name: &str,
    rows: usize,
    cols: usize,
    values: &[i32],
    georef: Option<Georef>,
) -> Result<()> {
    assert_eq!(values.len(), rows * cols, "value count must match grid");
    let mut writer = store.create_raster(name, rows, cols, CellKind::Int32, georef)?;
    for row in 0..rows {
        let cells = values[row * cols..(row + 1) * cols].to_vec();
        writer.write_row(&RowBuf::Int(cells))?;
    }
    writer.finalize(vec!["testdata".to_string()])
}

/// Write a single-precision raster from row-major values.
pub fn write_raster_f32(
    store: &RasterStore,
    name: &str,
    rows: usize,
    cols: usize,
    values: &[f32],
    georef: Option<Georef>,
) -> Result<()> {
    assert_eq!(values.len(), rows * cols, "value count must match grid");
    let mut writer = store.create_raster(name, rows, cols, CellKind::Float32, georef)?;
    for row in 0..rows {
        let cells = values[row * cols..(row + 1) * cols].to_vec();
        writer.write_row(&RowBuf::Single(cells))?;
    }
    writer.finalize(vec!["testdata".to_string()])
}

/// Write a double-precision raster from row-major values.
pub fn write_raster_f64(
    store: &RasterStore,
    name: &str,
    rows: usize,
    cols: usize,
    values: &[f64],
    georef: Option<Georef>,
) -> Result<()> {
    assert_eq!(values.len(), rows * cols, "value count must match grid");
    let mut writer = store.create_raster(name, rows, cols, CellKind::Float64, georef)?;
    for row in 0..rows {
        let cells = values[row * cols..(row + 1) * cols].to_vec();
        writer.write_row(&RowBuf::Double(cells))?;
    }
    writer.finalize(vec!["testdata".to_string()])
}
