//! Cell-area lookup for the row scan.

use raster_store::{AreaCapability, RowReader};

use crate::error::{Result, SumError};

/// Supplies the ground area represented by one cell of a given row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAreaProvider {
    /// Areas are abstract cell units; every row's factor is 1.0.
    Unit,
    /// Areas come from the input raster's per-row area function, in m².
    Geodesic,
}

impl CellAreaProvider {
    /// Select the provider for a run, checking the input raster's area
    /// capability when geodesic weighting was requested.
    ///
    /// Only a raster whose cell area varies by row is accepted for
    /// geodesic mode. A raster with uniform cell size is rejected just
    /// like an unmeasurable one, even though a fixed size would be
    /// trivially usable; callers relying on uniform grids must weight
    /// them externally.
    pub fn for_run(area_weight: bool, input: &RowReader) -> Result<Self> {
        if !area_weight {
            return Ok(Self::Unit);
        }
        match input.area_capability() {
            AreaCapability::Unmeasurable => {
                Err(SumError::config("cell size cannot be measured"))
            }
            AreaCapability::Uniform => {
                Err(SumError::config("cell size is the same for all cells"))
            }
            AreaCapability::VariesByRow => Ok(Self::Geodesic),
        }
    }

    /// Area factor for every cell of the given row.
    pub fn area_for_row(&self, input: &RowReader, row: usize) -> Result<f64> {
        match self {
            Self::Unit => Ok(1.0),
            Self::Geodesic => input.area_of_row(row).ok_or_else(|| {
                SumError::config(format!(
                    "raster map <{}> has no measurable cell area",
                    input.name()
                ))
            }),
        }
    }
}
