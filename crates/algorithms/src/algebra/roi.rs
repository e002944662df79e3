//! Region of interest to grid mask
//!
//! The ROI is given in world coordinates. It is mapped into grid space with
//! the inverse of the source's upper-left-corner grid-to-world transform and
//! rasterized by pixel center.

use crate::maybe_rayon::*;
use geo::{BoundingRect, Contains, Coord, MapCoords, MultiPolygon, Point, Polygon};
use ndarray::Array2;
use rasalg_core::{GeoTransform, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Region of interest in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roi(MultiPolygon<f64>);

impl Roi {
    pub fn new(geometry: MultiPolygon<f64>) -> Self {
        Self(geometry)
    }

    /// Single polygon ROI from an exterior ring of (x, y) vertices
    pub fn from_exterior(vertices: Vec<(f64, f64)>) -> Self {
        Self::from(Polygon::new(vertices.into(), Vec::new()))
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.0
    }
}

impl From<Polygon<f64>> for Roi {
    fn from(polygon: Polygon<f64>) -> Self {
        Self(MultiPolygon::new(vec![polygon]))
    }
}

impl From<MultiPolygon<f64>> for Roi {
    fn from(geometry: MultiPolygon<f64>) -> Self {
        Self(geometry)
    }
}

/// Boolean grid, `true` where a pixel takes part in the computation
#[derive(Debug, Clone, PartialEq)]
pub struct RoiMask {
    data: Array2<bool>,
}

impl RoiMask {
    /// Mask with every pixel set to `inside`
    pub fn filled(rows: usize, cols: usize, inside: bool) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), inside),
        }
    }

    /// Wrap an existing `(row, col)` array
    pub fn from_array(data: Array2<bool>) -> Self {
        Self { data }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Whether (row, col) is inside. Out-of-range pixels are outside.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data.get((row, col)).copied().unwrap_or(false)
    }

    /// Number of pixels inside
    pub fn count_inside(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn data(&self) -> &Array2<bool> {
        &self.data
    }
}

/// Map a world-space ROI into grid space and rasterize it.
///
/// Pixel (row, col) is inside when its center `(col + 0.5, row + 0.5)` lies
/// in the grid-space polygon; points on the boundary and in holes are
/// outside. Fails with [`rasalg_core::Error::NonInvertibleTransform`] if
/// `grid_to_world` is singular.
pub fn transform_roi_to_grid(
    roi: &Roi,
    grid_to_world: &GeoTransform,
    rows: usize,
    cols: usize,
) -> Result<RoiMask> {
    let world_to_grid = grid_to_world.inverse()?;
    let grid_roi: MultiPolygon<f64> = roi.geometry().map_coords(|c| {
        let (x, y) = world_to_grid.apply(c.x, c.y);
        Coord { x, y }
    });

    let mut mask = RoiMask::filled(rows, cols, false);
    let Some((row_start, row_end, col_start, col_end)) = grid_roi
        .bounding_rect()
        .and_then(|rect| candidate_window(rect.min(), rect.max(), rows, cols))
    else {
        debug!(rows, cols, "ROI does not touch the grid");
        return Ok(mask);
    };

    let row_masks: Vec<Vec<bool>> = (row_start..row_end)
        .into_par_iter()
        .map(|row| {
            let cy = row as f64 + 0.5;
            (col_start..col_end)
                .map(|col| grid_roi.contains(&Point::new(col as f64 + 0.5, cy)))
                .collect()
        })
        .collect();

    for (offset, row_mask) in row_masks.into_iter().enumerate() {
        let row = row_start + offset;
        for (i, inside) in row_mask.into_iter().enumerate() {
            mask.data[[row, col_start + i]] = inside;
        }
    }

    debug!(
        rows,
        cols,
        inside = mask.count_inside(),
        "ROI rasterized"
    );
    Ok(mask)
}

/// Half-open row and column ranges whose pixel centers can fall inside the
/// grid-space box `[min, max]`.
fn candidate_window(
    min: Coord<f64>,
    max: Coord<f64>,
    rows: usize,
    cols: usize,
) -> Option<(usize, usize, usize, usize)> {
    if ![min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (row_start, row_end) = center_span(min.y, max.y, rows)?;
    let (col_start, col_end) = center_span(min.x, max.x, cols)?;
    Some((row_start, row_end, col_start, col_end))
}

/// Indices `i` in `0..len` with `lo <= i + 0.5 <= hi`
fn center_span(lo: f64, hi: f64, len: usize) -> Option<(usize, usize)> {
    let first = (lo - 0.5).ceil().max(0.0);
    let last = (hi - 0.5).floor().min(len as f64 - 1.0);
    if len == 0 || first > last {
        return None;
    }
    Some((first as usize, last as usize + 1))
}
