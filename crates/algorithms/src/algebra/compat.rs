//! Source compatibility checks
//!
//! Every source must be non-empty and share the reference system, envelope,
//! grid span, pixel type and band count of the first one. Checks run in that
//! order and stop at the first failure.

use rasalg_core::crs::crs_compatible;
use rasalg_core::{AnyRaster, Error, Result, TransformFinder};
use tracing::debug;

/// Validate a list of sources against the first one.
///
/// Missing entries are reported before any pairwise comparison, with the
/// index of the first missing source. Sources with a zero band, row or
/// column count fail with [`Error::InvalidDimensions`].
pub fn check_all(grids: &[Option<&AnyRaster>], finder: &dyn TransformFinder) -> Result<()> {
    if let Some(index) = grids.iter().position(Option::is_none) {
        return Err(Error::NullInput { index });
    }

    let sources: Vec<&AnyRaster> = grids.iter().flatten().copied().collect();
    let Some((&primary, rest)) = sources.split_first() else {
        return Err(Error::NotEnoughSources {
            required: 1,
            found: 0,
        });
    };

    if let Some(empty) = sources.iter().find(|s| s.is_empty()) {
        return Err(Error::InvalidDimensions {
            bands: empty.bands(),
            width: empty.cols(),
            height: empty.rows(),
        });
    }

    for (offset, &other) in rest.iter().enumerate() {
        check_against(primary, other, offset + 1, finder)?;
    }

    debug!(
        sources = sources.len(),
        pixel_type = %primary.pixel_type(),
        rows = primary.rows(),
        cols = primary.cols(),
        "sources are compatible"
    );
    Ok(())
}

/// Validate that two sources can be combined.
pub fn check_pair(
    a: Option<&AnyRaster>,
    b: Option<&AnyRaster>,
    finder: &dyn TransformFinder,
) -> Result<()> {
    check_all(&[a, b], finder)
}

fn check_against(
    primary: &AnyRaster,
    other: &AnyRaster,
    index: usize,
    finder: &dyn TransformFinder,
) -> Result<()> {
    if !crs_compatible(primary.crs(), other.crs(), finder)? {
        return Err(Error::CrsMismatch {
            index,
            expected: crs_label(primary),
            found: crs_label(other),
        });
    }

    let expected_env = primary.envelope();
    let found_env = other.envelope();
    if expected_env != found_env {
        return Err(Error::EnvelopeMismatch {
            index,
            expected: expected_env.to_string(),
            found: found_env.to_string(),
        });
    }

    let (er, ec) = primary.shape();
    let (ar, ac) = other.shape();
    if (er, ec) != (ar, ac) {
        return Err(Error::GridMismatch { index, er, ec, ar, ac });
    }

    if primary.pixel_type() != other.pixel_type() {
        return Err(Error::DataTypeMismatch {
            index,
            expected: primary.pixel_type().to_string(),
            found: other.pixel_type().to_string(),
        });
    }

    if primary.bands() != other.bands() {
        return Err(Error::BandCountMismatch {
            index,
            expected: primary.bands(),
            found: other.bands(),
        });
    }

    Ok(())
}

fn crs_label(raster: &AnyRaster) -> String {
    raster
        .crs()
        .map(|c| c.identifier())
        .unwrap_or_else(|| "none".to_string())
}
