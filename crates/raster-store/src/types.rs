//! Core types for raster storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::area::Georef;

/// Numeric kind of a raster's cells.
///
/// Every raster declares exactly one kind; all of its rows carry cells
/// of that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// 32-bit signed integer cells.
    Int32,
    /// Single-precision floating-point cells.
    Float32,
    /// Double-precision floating-point cells.
    Float64,
}

impl CellKind {
    /// Size of one cell of this kind in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Int32 => 4,
            Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    /// Whether cells of this kind can hold a NaN sentinel.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of cells, typed by the raster's declared kind.
///
/// Row buffers are allocated once per pass and refilled for every row,
/// so a full-grid scan stays O(cols) in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum RowBuf {
    /// Integer cells.
    Int(Vec<i32>),
    /// Single-precision cells.
    Single(Vec<f32>),
    /// Double-precision cells.
    Double(Vec<f64>),
}

impl RowBuf {
    /// Create a zero-filled row buffer of the given kind and width.
    pub fn new(kind: CellKind, cols: usize) -> Self {
        match kind {
            CellKind::Int32 => Self::Int(vec![0; cols]),
            CellKind::Float32 => Self::Single(vec![0.0; cols]),
            CellKind::Float64 => Self::Double(vec![0.0; cols]),
        }
    }

    /// The cell kind this buffer holds.
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Int(_) => CellKind::Int32,
            Self::Single(_) => CellKind::Float32,
            Self::Double(_) => CellKind::Float64,
        }
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Single(v) => v.len(),
            Self::Double(v) => v.len(),
        }
    }

    /// Check if the row is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widening read of one cell as f64. NaN passes through unchanged
    /// for floating-point kinds.
    pub fn get_f64(&self, col: usize) -> f64 {
        match self {
            Self::Int(v) => v[col] as f64,
            Self::Single(v) => v[col] as f64,
            Self::Double(v) => v[col],
        }
    }

    /// Write one cell, narrowing the value to the buffer's kind.
    pub fn set_f64(&mut self, col: usize, value: f64) {
        match self {
            Self::Int(v) => v[col] = value as i32,
            Self::Single(v) => v[col] = value as f32,
            Self::Double(v) => v[col] = value,
        }
    }

    /// Overwrite every cell with the given value, narrowed to the
    /// buffer's kind.
    pub fn fill(&mut self, value: f64) {
        match self {
            Self::Int(v) => v.fill(value as i32),
            Self::Single(v) => v.fill(value as f32),
            Self::Double(v) => v.fill(value),
        }
    }

    /// Integer cells, if this is an integer row.
    pub fn as_int(&self) -> Option<&[i32]> {
        match self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Raw cell bytes for storage I/O.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Int(v) => bytemuck::cast_slice(v),
            Self::Single(v) => bytemuck::cast_slice(v),
            Self::Double(v) => bytemuck::cast_slice(v),
        }
    }

    /// Mutable raw cell bytes for storage I/O.
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Int(v) => bytemuck::cast_slice_mut(v),
            Self::Single(v) => bytemuck::cast_slice_mut(v),
            Self::Double(v) => bytemuck::cast_slice_mut(v),
        }
    }
}

/// On-disk header describing one raster map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterHeader {
    /// Number of rows in the grid.
    pub rows: usize,
    /// Number of columns in the grid.
    pub cols: usize,
    /// Cell kind of the payload.
    pub kind: CellKind,
    /// Georeference, if the raster is georeferenced.
    #[serde(default)]
    pub georef: Option<Georef>,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Provenance lines, most commonly the command line that produced
    /// the raster.
    #[serde(default)]
    pub history: Vec<String>,
}

impl RasterHeader {
    /// Total number of cells in the grid.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Byte length of one row of the payload.
    pub fn row_stride(&self) -> usize {
        self.cols * self.kind.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_kind_sizes() {
        assert_eq!(CellKind::Int32.size(), 4);
        assert_eq!(CellKind::Float32.size(), 4);
        assert_eq!(CellKind::Float64.size(), 8);
    }

    #[test]
    fn test_cell_kind_serde_tags() {
        assert_eq!(
            serde_json::to_string(&CellKind::Int32).unwrap(),
            "\"int32\""
        );
        assert_eq!(
            serde_json::from_str::<CellKind>("\"float64\"").unwrap(),
            CellKind::Float64
        );
    }

    #[test]
    fn test_row_buf_new_matches_kind() {
        let buf = RowBuf::new(CellKind::Float32, 7);
        assert_eq!(buf.kind(), CellKind::Float32);
        assert_eq!(buf.len(), 7);
    }

    #[test]
    fn test_row_buf_widening_read() {
        let buf = RowBuf::Int(vec![-3, 0, 9]);
        assert_eq!(buf.get_f64(0), -3.0);
        assert_eq!(buf.get_f64(2), 9.0);

        let buf = RowBuf::Single(vec![1.5, f32::NAN]);
        assert_eq!(buf.get_f64(0), 1.5);
        assert!(buf.get_f64(1).is_nan());
    }

    #[test]
    fn test_row_buf_set_narrows() {
        let mut buf = RowBuf::new(CellKind::Float32, 2);
        buf.set_f64(0, 1.25);
        buf.set_f64(1, f64::NAN);
        match buf {
            RowBuf::Single(v) => {
                assert_eq!(v[0], 1.25);
                assert!(v[1].is_nan());
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_row_buf_fill() {
        let mut buf = RowBuf::new(CellKind::Float64, 3);
        buf.fill(2.5);
        assert_eq!(buf.get_f64(0), 2.5);
        assert_eq!(buf.get_f64(2), 2.5);
    }

    #[test]
    fn test_row_buf_byte_view_roundtrip() {
        let mut buf = RowBuf::Double(vec![0.0; 2]);
        let src = RowBuf::Double(vec![1.5, -2.25]);
        buf.as_bytes_mut().copy_from_slice(src.as_bytes());
        assert_eq!(buf, src);
    }
}
