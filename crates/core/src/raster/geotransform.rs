//! Affine geotransformation for rasters

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which point of a pixel integer grid coordinates refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelOrientation {
    /// Grid coordinate (c, r) is the upper-left corner of pixel (c, r)
    #[default]
    UpperLeft,
    /// Grid coordinate (c, r) is the center of pixel (c, r)
    Center,
}

/// Affine transformation coefficients for georeferencing rasters.
///
/// Converts between pixel coordinates (col, row) and world coordinates (x, y):
/// ```text
/// x = origin_x + col * pixel_width + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// The origin is the upper-left corner of the upper-left pixel. For north-up
/// images `row_rotation` and `col_rotation` are 0 and `pixel_height` is
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// X coordinate of the upper-left corner
    pub origin_x: f64,
    /// Y coordinate of the upper-left corner
    pub origin_y: f64,
    /// Pixel width (cell size in X direction)
    pub pixel_width: f64,
    /// Pixel height (cell size in Y direction, usually negative)
    pub pixel_height: f64,
    /// Rotation about X axis (usually 0)
    pub row_rotation: f64,
    /// Rotation about Y axis (usually 0)
    pub col_rotation: f64,
}

impl GeoTransform {
    /// Create a new GeoTransform with no rotation (north-up image)
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    /// Create from GDAL-style array [origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]
    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self {
            origin_x: coeffs[0],
            pixel_width: coeffs[1],
            row_rotation: coeffs[2],
            origin_y: coeffs[3],
            col_rotation: coeffs[4],
            pixel_height: coeffs[5],
        }
    }

    /// Convert to GDAL-style array
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.col_rotation,
            self.pixel_height,
        ]
    }

    /// Apply the affine map to fractional grid coordinates
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        let x = self.origin_x + col * self.pixel_width + row * self.row_rotation;
        let y = self.origin_y + col * self.col_rotation + row * self.pixel_height;
        (x, y)
    }

    /// Convert pixel coordinates to world coordinates (top-left corner)
    pub fn pixel_to_geo_corner(&self, col: usize, row: usize) -> (f64, f64) {
        self.apply(col as f64, row as f64)
    }

    /// Determinant of the linear part
    pub fn determinant(&self) -> f64 {
        self.pixel_width * self.pixel_height - self.row_rotation * self.col_rotation
    }

    /// The inverse map (world to grid), in the same coefficient layout.
    ///
    /// Fails with [`Error::NonInvertibleTransform`] when the linear part is
    /// singular or the inverse is not finite.
    pub fn inverse(&self) -> Result<GeoTransform> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(Error::NonInvertibleTransform { determinant: det });
        }

        let pixel_width = self.pixel_height / det;
        let row_rotation = -self.row_rotation / det;
        let col_rotation = -self.col_rotation / det;
        let pixel_height = self.pixel_width / det;
        let origin_x = -(pixel_width * self.origin_x + row_rotation * self.origin_y);
        let origin_y = -(col_rotation * self.origin_x + pixel_height * self.origin_y);

        let inv = GeoTransform {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation,
            col_rotation,
        };
        if inv.to_gdal().iter().any(|c| !c.is_finite()) {
            return Err(Error::NonInvertibleTransform { determinant: det });
        }
        Ok(inv)
    }

    /// Transform whose integer grid coordinates address `orientation`
    /// instead of the upper-left corner.
    pub fn with_orientation(&self, orientation: PixelOrientation) -> GeoTransform {
        match orientation {
            PixelOrientation::UpperLeft => *self,
            PixelOrientation::Center => {
                let (x, y) = self.apply(0.5, 0.5);
                GeoTransform {
                    origin_x: x,
                    origin_y: y,
                    ..*self
                }
            }
        }
    }

    /// Recover the upper-left corner transform from one expressed in
    /// `orientation`
    pub fn from_orientation(transform: &GeoTransform, orientation: PixelOrientation) -> GeoTransform {
        match orientation {
            PixelOrientation::UpperLeft => *transform,
            PixelOrientation::Center => {
                let (x, y) = transform.apply(-0.5, -0.5);
                GeoTransform {
                    origin_x: x,
                    origin_y: y,
                    ..*transform
                }
            }
        }
    }

    /// Calculate the bounding box for a raster of given dimensions
    pub fn bounds(&self, width: usize, height: usize) -> (f64, f64, f64, f64) {
        let (x0, y0) = self.pixel_to_geo_corner(0, 0);
        let (x1, y1) = self.pixel_to_geo_corner(width, 0);
        let (x2, y2) = self.pixel_to_geo_corner(0, height);
        let (x3, y3) = self.pixel_to_geo_corner(width, height);

        let min_x = x0.min(x1).min(x2).min(x3);
        let max_x = x0.max(x1).max(x2).max(x3);
        let min_y = y0.min(y1).min(y2).min(y3);
        let max_y = y0.max(y1).max(y2).max(y3);

        (min_x, min_y, max_x, max_y)
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}
