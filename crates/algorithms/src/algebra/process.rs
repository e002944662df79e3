//! End-to-end coverage algebra
//!
//! validate → ROI mask → no-data resolution → execute

use super::compat::check_all;
use super::executor::{AlgebraExecutor, ExecutionConfig};
use super::nodata::resolve;
use super::params::AlgebraParams;
use super::roi::transform_roi_to_grid;
use rasalg_core::{AliasTransformFinder, AnyRaster, Error, Result, TransformFinder};
use std::time::Instant;
use tracing::info;

/// Combines N aligned sources with one operator.
///
/// ```
/// use rasalg_algorithms::algebra::{AlgebraParams, CoverageAlgebra, Operator};
/// use rasalg_core::{AnyRaster, Raster};
///
/// let a: AnyRaster = Raster::filled(2, 2, 3u8).into();
/// let b: AnyRaster = Raster::filled(2, 2, 4u8).into();
/// let params = AlgebraParams::builder(Operator::Sum).build();
/// let out = CoverageAlgebra::default().run(&[Some(&a), Some(&b)], &params).unwrap();
/// assert_eq!(out.get_f64(0, 1, 1).unwrap(), 7.0);
/// ```
#[derive(Debug, Clone)]
pub struct CoverageAlgebra<F: TransformFinder = AliasTransformFinder> {
    finder: F,
    executor: AlgebraExecutor,
}

impl Default for CoverageAlgebra {
    fn default() -> Self {
        Self::new(AliasTransformFinder::new())
    }
}

impl<F: TransformFinder> CoverageAlgebra<F> {
    /// Pipeline using `finder` to compare reference systems
    pub fn new(finder: F) -> Self {
        Self {
            finder,
            executor: AlgebraExecutor::default(),
        }
    }

    pub fn with_config(mut self, config: ExecutionConfig) -> Self {
        self.executor = AlgebraExecutor::new(config);
        self
    }

    pub fn finder(&self) -> &F {
        &self.finder
    }

    /// Validate `sources`, then compute the result.
    ///
    /// The first source is the primary one: its transform places the ROI,
    /// its no-data value fills in what `params` leaves unset, and its
    /// georeferencing and metadata are copied to the output.
    pub fn run(&self, sources: &[Option<&AnyRaster>], params: &AlgebraParams) -> Result<AnyRaster> {
        let start = Instant::now();

        check_all(sources, &self.finder)?;
        let grids: Vec<&AnyRaster> = sources.iter().flatten().copied().collect();
        let primary = match grids.as_slice() {
            [primary, _, ..] => *primary,
            _ => {
                return Err(Error::NotEnoughSources {
                    required: 2,
                    found: grids.len(),
                })
            }
        };

        let mask = params
            .roi()
            .map(|roi| transform_roi_to_grid(roi, primary.transform(), primary.rows(), primary.cols()))
            .transpose()?;

        let resolved = resolve(
            params.nodata(),
            params.destination_nodata(),
            primary.nodata(),
            primary.pixel_type(),
        );

        let output = self.executor.execute(
            &grids,
            params.operator(),
            mask.as_ref(),
            resolved.range.as_ref(),
            resolved.destination,
        )?;

        info!(
            operator = %params.operator(),
            sources = grids.len(),
            rows = output.rows(),
            cols = output.cols(),
            bands = output.bands(),
            output_type = %output.pixel_type(),
            roi_pixels = mask.as_ref().map(|m| m.count_inside()),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "coverage algebra complete"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{NoDataRange, Operator, Roi};
    use rasalg_core::{GeoTransform, PixelType, Raster, CRS};

    fn grid(value: f32, nodata: Option<f32>) -> AnyRaster {
        let mut raster = Raster::filled(4, 4, value)
            .with_transform(GeoTransform::new(0.0, 4.0, 1.0, -1.0))
            .with_crs(CRS::from_epsg(32633));
        raster.set_nodata(nodata);
        raster.into()
    }

    #[test]
    fn test_requires_two_sources() {
        let a = grid(1.0, None);
        let params = AlgebraParams::default();
        let err = CoverageAlgebra::default().run(&[Some(&a)], &params).unwrap_err();
        assert_eq!(err, Error::NotEnoughSources { required: 2, found: 1 });
    }

    #[test]
    fn test_null_reported_first() {
        let a = grid(1.0, None);
        let err = CoverageAlgebra::default()
            .run(&[Some(&a), None], &AlgebraParams::default())
            .unwrap_err();
        assert_eq!(err, Error::NullInput { index: 1 });
    }

    #[test]
    fn test_primary_nodata_fills_in() {
        let mut a = Raster::filled(4, 4, 2.0f32)
            .with_transform(GeoTransform::new(0.0, 4.0, 1.0, -1.0))
            .with_crs(CRS::from_epsg(32633))
            .with_nodata(-9999.0);
        a.set(0, 0, -9999.0).unwrap();
        let a: AnyRaster = a.into();
        let b = grid(3.0, None);

        let out = CoverageAlgebra::default()
            .run(&[Some(&a), Some(&b)], &AlgebraParams::default())
            .unwrap();
        assert_eq!(out.nodata(), Some(-9999.0));
        assert_eq!(out.get_f64(0, 0, 0).unwrap(), -9999.0);
        assert_eq!(out.get_f64(0, 3, 3).unwrap(), 5.0);
    }

    #[test]
    fn test_roi_uses_primary_transform() {
        let a = grid(6.0, None);
        let b = grid(2.0, None);
        // Left half of the 4x4 grid
        let roi = Roi::from_exterior(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 4.0), (0.0, 4.0)]);
        let params = AlgebraParams::builder(Operator::Divide)
            .roi(roi)
            .destination_nodata(-1.0)
            .build();

        let out = CoverageAlgebra::default().run(&[Some(&a), Some(&b)], &params).unwrap();
        assert_eq!(out.pixel_type(), PixelType::Float32);
        for row in 0..4 {
            assert_eq!(out.get_f64(0, row, 1).unwrap(), 3.0);
            assert_eq!(out.get_f64(0, row, 2).unwrap(), -1.0);
        }
    }

    #[test]
    fn test_explicit_range_overrides_nothing_else() {
        let a = grid(5.0, Some(0.0));
        let b = grid(5.0, None);
        let params = AlgebraParams::builder(Operator::Subtract)
            .nodata(NoDataRange::new(PixelType::Float32, 4.0, 6.0))
            .build();
        let out = CoverageAlgebra::default().run(&[Some(&a), Some(&b)], &params).unwrap();
        // Destination comes from the primary's embedded value
        assert_eq!(out.nodata(), Some(0.0));
        assert_eq!(out.get_f64(0, 2, 2).unwrap(), 0.0);
    }
}
