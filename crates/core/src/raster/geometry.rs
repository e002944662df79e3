//! Grid geometry: where a raster sits in the world

use crate::crs::CRS;
use crate::raster::GeoTransform;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned world-space bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Envelope {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// Affine grid-to-world mapping, reference system and grid span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub transform: GeoTransform,
    pub crs: Option<CRS>,
    pub rows: usize,
    pub cols: usize,
}

impl GridGeometry {
    pub fn new(transform: GeoTransform, crs: Option<CRS>, rows: usize, cols: usize) -> Self {
        Self { transform, crs, rows, cols }
    }

    /// World extent covered by the whole grid
    pub fn envelope(&self) -> Envelope {
        let (min_x, min_y, max_x, max_y) = self.transform.bounds(self.cols, self.rows);
        Envelope::new(min_x, min_y, max_x, max_y)
    }
}
