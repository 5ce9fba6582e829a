//! Ground-area computation for georeferenced rasters.
//!
//! A raster cell covers a patch of ground whose true area depends on
//! the georeference. On a projected grid every cell covers the same
//! area. On a geographic (lat/lon) grid the east-west extent of a cell
//! shrinks toward the poles, so the area varies by row: all cells in
//! one row share a latitude band and therefore one area.

use serde::{Deserialize, Serialize};

/// Authalic Earth radius in meters (sphere with the same surface area
/// as the WGS84 ellipsoid).
const EARTH_RADIUS_M: f64 = 6_371_007.181;

/// How a raster's cells map to ground coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeorefKind {
    /// Latitude/longitude grid, bounds in degrees.
    Geographic,
    /// Projected grid, bounds in map units (meters).
    Projected,
}

/// Georeference of a raster: its kind and outer bounds.
///
/// Rows run north to south; row 0 touches the north bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Georef {
    pub kind: GeorefKind,
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

impl Georef {
    /// Create a geographic georeference with bounds in degrees.
    pub fn geographic(north: f64, south: f64, west: f64, east: f64) -> Self {
        Self {
            kind: GeorefKind::Geographic,
            north,
            south,
            west,
            east,
        }
    }

    /// Create a projected georeference with bounds in map units.
    pub fn projected(north: f64, south: f64, west: f64, east: f64) -> Self {
        Self {
            kind: GeorefKind::Projected,
            north,
            south,
            west,
            east,
        }
    }

    /// Ground area in m² of one cell in the given row of a
    /// `rows` × `cols` grid.
    ///
    /// Geographic grids use the spherical latitude-band area
    /// `R² · Δλ · (sin φ_top − sin φ_bottom)`, which varies by row.
    /// Projected grids return the uniform `|dx · dy|`.
    pub fn cell_area_at_row(&self, row: usize, rows: usize, cols: usize) -> f64 {
        match self.kind {
            GeorefKind::Projected => {
                let dx = (self.east - self.west) / cols as f64;
                let dy = (self.north - self.south) / rows as f64;
                (dx * dy).abs()
            }
            GeorefKind::Geographic => {
                let dy = (self.north - self.south) / rows as f64;
                let lat_top = (self.north - row as f64 * dy).to_radians();
                let lat_bottom = (self.north - (row + 1) as f64 * dy).to_radians();
                let dlon = ((self.east - self.west) / cols as f64).to_radians();
                EARTH_RADIUS_M * EARTH_RADIUS_M * dlon * (lat_top.sin() - lat_bottom.sin())
            }
        }
    }
}

/// What a raster can say about its per-cell ground area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaCapability {
    /// No georeference; area is undefined.
    Unmeasurable,
    /// Projected grid; every cell covers the same area.
    Uniform,
    /// Geographic grid; area varies by row.
    VariesByRow,
}

/// Classify the area capability of a raster from its georeference.
pub fn area_capability(georef: Option<&Georef>) -> AreaCapability {
    match georef {
        None => AreaCapability::Unmeasurable,
        Some(g) if g.kind == GeorefKind::Projected => AreaCapability::Uniform,
        Some(_) => AreaCapability::VariesByRow,
    }
}
