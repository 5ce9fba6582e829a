//! Run configuration for a summation pass.

use raster_store::CellKind;

use crate::error::{Result, SumError};

/// Numeric kind of the output raster's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    /// Single-precision cells; per-cell contributions lose precision.
    Single,
    /// Double-precision cells.
    #[default]
    Double,
}

impl OutputKind {
    /// The storage cell kind for this output kind.
    pub fn cell_kind(&self) -> CellKind {
        match self {
            Self::Single => CellKind::Float32,
            Self::Double => CellKind::Float64,
        }
    }
}

/// Immutable configuration for one summation run.
///
/// Captured once at startup and passed explicitly into the driver; no
/// component reads ambient global state during the row scan.
#[derive(Debug, Clone)]
pub struct SumConfig {
    /// Source raster to sum.
    pub input: String,
    /// If present, write per-cell weighted values to this raster.
    pub output: Option<String>,
    /// Secondary integer raster gating inclusion.
    pub mask: Option<String>,
    /// Inclusion test value; required whenever `mask` is set.
    pub field: Option<i32>,
    /// Multiplier applied to the final total before reporting.
    pub scale: f64,
    /// Cell kind of the output raster.
    pub output_kind: OutputKind,
    /// Use NaN instead of 0.0 as the fill value for excluded cells.
    pub null_fill: bool,
    /// Weight each cell by its ground area in m².
    pub area_weight: bool,
    /// Suppress progress reporting.
    pub quiet: bool,
    /// Provenance line attached to the output raster's history.
    pub command: Option<String>,
}

impl SumConfig {
    /// Configuration with defaults for everything but the input name.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: None,
            mask: None,
            field: None,
            scale: 1.0,
            output_kind: OutputKind::default(),
            null_fill: false,
            area_weight: false,
            quiet: false,
            command: None,
        }
    }

    /// Validate the configuration. Runs before any I/O.
    pub fn validate(&self) -> Result<()> {
        if self.mask.is_some() && self.field.is_none() {
            return Err(SumError::config(
                "option field must be given when a mask raster is given",
            ));
        }
        if let Some(output) = &self.output {
            if !raster_store::legal_raster_name(output) {
                return Err(SumError::config(format!(
                    "<{output}> is an illegal raster map name"
                )));
            }
        }
        Ok(())
    }

    /// The value written to excluded and null output cells.
    pub fn fill_value(&self) -> f64 {
        if self.null_fill {
            f64::NAN
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SumConfig::new("elevation");
        assert_eq!(config.input, "elevation");
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.output_kind, OutputKind::Double);
        assert!(!config.area_weight);
        assert_eq!(config.fill_value(), 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mask_requires_field() {
        let mut config = SumConfig::new("elevation");
        config.mask = Some("landuse".to_string());
        assert!(matches!(config.validate(), Err(SumError::Config(_))));

        config.field = Some(3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_illegal_output_name_rejected() {
        let mut config = SumConfig::new("elevation");
        config.output = Some("../escape".to_string());
        assert!(matches!(config.validate(), Err(SumError::Config(_))));
    }

    #[test]
    fn test_null_fill_value() {
        let mut config = SumConfig::new("elevation");
        config.null_fill = true;
        assert!(config.fill_value().is_nan());
    }

    #[test]
    fn test_output_kind_cell_kind() {
        assert_eq!(OutputKind::Single.cell_kind(), CellKind::Float32);
        assert_eq!(OutputKind::Double.cell_kind(), CellKind::Float64);
    }
}
