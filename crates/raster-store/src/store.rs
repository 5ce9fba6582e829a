//! Raster catalog with row-oriented readers and writers.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::area::{area_capability, AreaCapability, Georef};
use crate::error::{RasterStoreError, Result};
use crate::types::{CellKind, RasterHeader, RowBuf};

const HEADER_FILE: &str = "header.json";
const CELLS_FILE: &str = "cells.bin";

/// Check whether a name is usable as a raster map name.
///
/// Names become directory names, so path separators, leading dots
/// (which covers `.` and `..`), and control characters are rejected.
pub fn legal_raster_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
}

/// A catalog of raster maps rooted at one data directory.
#[derive(Debug, Clone)]
pub struct RasterStore {
    root: PathBuf,
}

impl RasterStore {
    /// Open a store rooted at the given data directory.
    ///
    /// The directory does not have to exist yet; it is created lazily
    /// when the first raster is written.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the named raster.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Check whether a readable raster of this name exists.
    pub fn exists(&self, name: &str) -> bool {
        self.path_of(name).join(HEADER_FILE).is_file()
    }

    /// Open a raster for row-by-row reading.
    pub fn open_raster(&self, name: &str) -> Result<RowReader> {
        let dir = self.path_of(name);
        if !dir.join(HEADER_FILE).is_file() {
            return Err(RasterStoreError::NotFound(name.to_string()));
        }

        let header = read_header(name, &dir)?;
        let file = File::open(dir.join(CELLS_FILE))
            .map_err(|e| RasterStoreError::open_failed(name, e.to_string()))?;

        let expected = (header.rows * header.row_stride()) as u64;
        let actual = file
            .metadata()
            .map_err(|e| RasterStoreError::open_failed(name, e.to_string()))?
            .len();
        if actual != expected {
            return Err(RasterStoreError::invalid_header(
                name,
                format!("cell payload is {actual} bytes, header implies {expected}"),
            ));
        }

        debug!(
            raster = name,
            rows = header.rows,
            cols = header.cols,
            kind = %header.kind,
            "opened raster for read"
        );

        Ok(RowReader {
            name: name.to_string(),
            header,
            file,
        })
    }

    /// Create a new raster and return a writer for its rows.
    ///
    /// The raster becomes readable only after [`RowWriter::finalize`]
    /// commits the header.
    pub fn create_raster(
        &self,
        name: &str,
        rows: usize,
        cols: usize,
        kind: CellKind,
        georef: Option<Georef>,
    ) -> Result<RowWriter> {
        if !legal_raster_name(name) {
            return Err(RasterStoreError::IllegalName(name.to_string()));
        }

        let dir = self.path_of(name);
        if dir.exists() {
            return Err(RasterStoreError::AlreadyExists(name.to_string()));
        }
        fs::create_dir_all(&dir).map_err(|e| RasterStoreError::write_failed(name, e.to_string()))?;

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dir.join(CELLS_FILE))
            .map_err(|e| RasterStoreError::write_failed(name, e.to_string()))?;

        debug!(raster = name, rows, cols, kind = %kind, "created raster for write");

        Ok(RowWriter {
            name: name.to_string(),
            dir,
            header: RasterHeader {
                rows,
                cols,
                kind,
                georef,
                created: Utc::now(),
                history: Vec::new(),
            },
            file: BufWriter::new(file),
            rows_written: 0,
        })
    }
}

fn read_header(name: &str, dir: &Path) -> Result<RasterHeader> {
    let raw = fs::read_to_string(dir.join(HEADER_FILE))
        .map_err(|e| RasterStoreError::invalid_header(name, e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| RasterStoreError::invalid_header(name, e.to_string()))
}

/// Row-by-row reader over one raster map.
pub struct RowReader {
    name: String,
    header: RasterHeader,
    file: File,
}

impl RowReader {
    /// The raster's name within the store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raster's header.
    pub fn header(&self) -> &RasterHeader {
        &self.header
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.header.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.header.cols
    }

    /// Cell kind of the raster.
    pub fn kind(&self) -> CellKind {
        self.header.kind
    }

    /// Allocate a row buffer of the raster's kind and width, for reuse
    /// across [`RowReader::read_row`] calls.
    pub fn row_buf(&self) -> RowBuf {
        RowBuf::new(self.header.kind, self.header.cols)
    }

    /// Fill `buf` with the cells of the given row.
    ///
    /// The buffer must match the raster's kind and width; it is the
    /// same buffer on every call of a scan, overwritten in place.
    pub fn read_row(&mut self, row: usize, buf: &mut RowBuf) -> Result<()> {
        if buf.kind() != self.header.kind {
            return Err(RasterStoreError::KindMismatch {
                name: self.name.clone(),
                buffer: buf.kind(),
                raster: self.header.kind,
            });
        }
        if buf.len() != self.header.cols {
            return Err(RasterStoreError::read_failed(
                &self.name,
                row,
                format!("buffer has {} cells, raster has {}", buf.len(), self.header.cols),
            ));
        }
        if row >= self.header.rows {
            return Err(RasterStoreError::RowOutOfRange {
                name: self.name.clone(),
                row,
                rows: self.header.rows,
            });
        }

        let offset = (row * self.header.row_stride()) as u64;
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|e| RasterStoreError::read_failed(&self.name, row, e.to_string()))?;
        self.file
            .read_exact(buf.as_bytes_mut())
            .map_err(|e| RasterStoreError::read_failed(&self.name, row, e.to_string()))?;
        Ok(())
    }

    /// What this raster can say about per-cell ground area.
    pub fn area_capability(&self) -> AreaCapability {
        area_capability(self.header.georef.as_ref())
    }

    /// Ground area in m² of one cell in the given row, or `None` when
    /// the raster carries no georeference.
    pub fn area_of_row(&self, row: usize) -> Option<f64> {
        self.header
            .georef
            .map(|g| g.cell_area_at_row(row, self.header.rows, self.header.cols))
    }
}

/// Sequential row writer for a new raster map.
///
/// Rows are appended in order, row 0 first. The raster is committed by
/// [`RowWriter::finalize`]; dropping the writer without finalizing
/// leaves no readable raster behind.
pub struct RowWriter {
    name: String,
    dir: PathBuf,
    header: RasterHeader,
    file: BufWriter<File>,
    rows_written: usize,
}

impl RowWriter {
    /// The raster's name within the store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Append the next row of cells.
    pub fn write_row(&mut self, buf: &RowBuf) -> Result<()> {
        if buf.kind() != self.header.kind {
            return Err(RasterStoreError::KindMismatch {
                name: self.name.clone(),
                buffer: buf.kind(),
                raster: self.header.kind,
            });
        }
        if buf.len() != self.header.cols {
            return Err(RasterStoreError::write_failed(
                &self.name,
                format!("row has {} cells, raster has {}", buf.len(), self.header.cols),
            ));
        }
        if self.rows_written >= self.header.rows {
            return Err(RasterStoreError::write_failed(
                &self.name,
                format!("raster already has all {} rows", self.header.rows),
            ));
        }

        self.file
            .write_all(buf.as_bytes())
            .map_err(|e| RasterStoreError::write_failed(&self.name, e.to_string()))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush the cell payload, attach provenance history, and commit
    /// the header. Only after this succeeds is the raster readable.
    pub fn finalize(mut self, history: Vec<String>) -> Result<()> {
        if self.rows_written != self.header.rows {
            return Err(RasterStoreError::write_failed(
                &self.name,
                format!(
                    "only {} of {} rows written",
                    self.rows_written, self.header.rows
                ),
            ));
        }

        self.file
            .flush()
            .map_err(|e| RasterStoreError::write_failed(&self.name, e.to_string()))?;

        self.header.history = history;
        let raw = serde_json::to_string_pretty(&self.header)
            .map_err(|e| RasterStoreError::write_failed(&self.name, e.to_string()))?;
        fs::write(self.dir.join(HEADER_FILE), raw)
            .map_err(|e| RasterStoreError::write_failed(&self.name, e.to_string()))?;

        debug!(raster = %self.name, rows = self.rows_written, "finalized raster");
        Ok(())
    }
}
