//! Row-scan orchestration.

use raster_store::{RasterStore, RowBuf};
use tracing::info;

use crate::accumulate::CellAccumulator;
use crate::area::CellAreaProvider;
use crate::config::SumConfig;
use crate::error::Result;
use crate::mask::MaskFilter;
use crate::report::SumOutcome;

/// Drives one sequential pass over all rows of the input raster.
///
/// The pass has two phases: setup (validate the configuration, open
/// the input and optional mask/output rasters, select the area mode)
/// and the row scan, strictly row 0 to the last row with no
/// re-ordering and no early termination except on a fatal error.
pub struct RowDriver<'a> {
    store: &'a RasterStore,
    config: &'a SumConfig,
}

impl<'a> RowDriver<'a> {
    /// Driver over the given store and run configuration.
    pub fn new(store: &'a RasterStore, config: &'a SumConfig) -> Self {
        Self { store, config }
    }

    /// Run the pass and return the accumulated outcome.
    pub fn run(&self) -> Result<SumOutcome> {
        self.config.validate()?;

        let mut input = self.store.open_raster(&self.config.input)?;
        let (rows, cols) = (input.rows(), input.cols());

        let mut mask = MaskFilter::open(self.store, self.config, rows, cols)?;
        let area = CellAreaProvider::for_run(self.config.area_weight, &input)?;

        let mut writer = match &self.config.output {
            Some(name) => Some(self.store.create_raster(
                name,
                rows,
                cols,
                self.config.output_kind.cell_kind(),
                input.header().georef,
            )?),
            None => None,
        };

        // One buffer each for input, mask, and output rows, reused for
        // the whole pass. The output row is maintained even with no
        // output raster; it is simply never written.
        let mut in_row = input.row_buf();
        let mut out_row = RowBuf::new(self.config.output_kind.cell_kind(), cols);
        let mut acc = CellAccumulator::new(self.config.fill_value());
        let mut progress = Progress::new(rows, self.config.quiet);

        for row in 0..rows {
            progress.tick(row);

            let area_factor = area.area_for_row(&input, row)?;
            input.read_row(row, &mut in_row)?;
            mask.load_row(row)?;

            for col in 0..cols {
                let included = mask.is_included(col);
                acc.cell(&in_row, col, area_factor, included, &mut out_row);
            }

            if let Some(writer) = writer.as_mut() {
                writer.write_row(&out_row)?;
            }
        }

        if let Some(writer) = writer.take() {
            let history = self.config.command.iter().cloned().collect();
            writer.finalize(history)?;
        }

        Ok(SumOutcome {
            total: acc.total(),
            cells_counted: acc.cells_counted(),
            rows,
            cols,
        })
    }
}

/// Row-scan progress reporting in 10% steps.
struct Progress {
    rows: usize,
    last_percent: usize,
    quiet: bool,
}

impl Progress {
    fn new(rows: usize, quiet: bool) -> Self {
        Self {
            rows,
            last_percent: 0,
            quiet,
        }
    }

    fn tick(&mut self, row: usize) {
        if self.quiet || self.rows == 0 {
            return;
        }
        let percent = row * 100 / self.rows;
        if percent >= self.last_percent + 10 {
            self.last_percent = percent - percent % 10;
            info!(percent = self.last_percent, "row scan progress");
        }
    }
}
