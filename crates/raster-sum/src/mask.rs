//! Mask-based cell inclusion.

use raster_store::{CellKind, RasterStore, RowBuf, RowReader};

use crate::config::SumConfig;
use crate::error::{Result, SumError};

/// Decides per-cell inclusion from an optional integer mask raster.
///
/// With no mask configured, every cell is included. Otherwise a cell is
/// included iff its mask value equals the configured field value.
pub struct MaskFilter {
    inner: Option<MaskState>,
}

struct MaskState {
    reader: RowReader,
    target: i32,
    row: RowBuf,
}

impl MaskFilter {
    /// Open and validate the mask raster named by the configuration.
    ///
    /// Validation happens once here, not per cell: the mask must exist,
    /// be of integer kind, and match the input raster's dimensions.
    pub fn open(store: &RasterStore, config: &SumConfig, rows: usize, cols: usize) -> Result<Self> {
        let name = match &config.mask {
            Some(name) => name,
            None => return Ok(Self { inner: None }),
        };
        let target = config.field.ok_or_else(|| {
            SumError::config("option field must be given when a mask raster is given")
        })?;

        let reader = store.open_raster(name)?;
        if reader.kind() != CellKind::Int32 {
            return Err(SumError::MaskKind(name.clone()));
        }
        if reader.rows() != rows || reader.cols() != cols {
            return Err(SumError::MaskShape {
                name: name.clone(),
                mask_rows: reader.rows(),
                mask_cols: reader.cols(),
                rows,
                cols,
            });
        }

        let row = reader.row_buf();
        Ok(Self {
            inner: Some(MaskState {
                reader,
                target,
                row,
            }),
        })
    }

    /// Fetch the mask row for the current scan row. No-op without a mask.
    pub fn load_row(&mut self, row: usize) -> Result<()> {
        if let Some(state) = &mut self.inner {
            state.reader.read_row(row, &mut state.row)?;
        }
        Ok(())
    }

    /// Whether the cell at `col` of the loaded row is included.
    pub fn is_included(&self, col: usize) -> bool {
        match &self.inner {
            None => true,
            Some(state) => state
                .row
                .as_int()
                .map_or(true, |cells| cells[col] == state.target),
        }
    }
}
