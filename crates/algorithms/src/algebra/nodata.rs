//! No-data ranges and their resolution
//!
//! A [`NoDataRange`] marks source samples that take no part in the algebra.
//! [`resolve`] decides which range and which destination value apply, from
//! explicit parameters and the primary source's embedded no-data value.

use rasalg_core::PixelType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Closed interval of sample values treated as no-data.
///
/// Bounds are stored after conversion into the range's pixel type, so a
/// `uint8` range built from `-5.0` starts at `0`. Only floating types may
/// also treat NaN as no-data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoDataRange {
    pixel_type: PixelType,
    lo: f64,
    hi: f64,
    nan_included: bool,
}

impl NoDataRange {
    /// Range `[lo, hi]` in `pixel_type`. Bounds are swapped if reversed.
    pub fn new(pixel_type: PixelType, lo: f64, hi: f64) -> Self {
        let lo = pixel_type.cast(lo);
        let hi = pixel_type.cast(hi);
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        Self {
            pixel_type,
            lo,
            hi,
            nan_included: false,
        }
    }

    /// Exact value range `[value, value]`.
    ///
    /// Integer types match only the converted value. Floating types also
    /// match NaN.
    pub fn exact(pixel_type: PixelType, value: f64) -> Self {
        let range = Self::new(pixel_type, value, value);
        if pixel_type.is_float() {
            range.with_nan()
        } else {
            range
        }
    }

    /// Also treat NaN as no-data. Ignored for integer types.
    pub fn with_nan(mut self) -> Self {
        self.nan_included = self.pixel_type.is_float();
        self
    }

    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn is_nan_included(&self) -> bool {
        self.nan_included
    }

    /// Whether the range is a single value
    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    /// Whether `value` is no-data under this range
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() {
            return self.nan_included;
        }
        value >= self.lo && value <= self.hi
    }
}

/// Outcome of [`resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedNoData {
    /// Source samples to skip
    pub range: Option<NoDataRange>,
    /// Value written where a pixel is masked or skipped
    pub destination: Option<f64>,
}

/// Decide the no-data range and destination value for an operation.
///
/// Explicit values are never overridden. Each missing one is derived
/// independently from `source_nodata` when the primary source has one:
/// the range becomes `[v, v]` in `pixel_type` (NaN-matching for floating
/// types) and the destination becomes `v`. Without explicit values or a
/// source value, nothing is masked.
pub fn resolve(
    explicit_range: Option<NoDataRange>,
    explicit_destination: Option<f64>,
    source_nodata: Option<f64>,
    pixel_type: PixelType,
) -> ResolvedNoData {
    if explicit_range.is_some() && explicit_destination.is_some() {
        return ResolvedNoData {
            range: explicit_range,
            destination: explicit_destination,
        };
    }

    let Some(v) = source_nodata else {
        return ResolvedNoData {
            range: explicit_range,
            destination: explicit_destination,
        };
    };

    let range = explicit_range.or_else(|| Some(NoDataRange::exact(pixel_type, v)));
    let destination = explicit_destination.or(Some(v));
    debug!(
        source_nodata = v,
        %pixel_type,
        derived_range = explicit_range.is_none(),
        derived_destination = explicit_destination.is_none(),
        "no-data derived from primary source"
    );

    ResolvedNoData { range, destination }
}
