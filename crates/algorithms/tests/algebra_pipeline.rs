//! End-to-end coverage algebra through the public API.
//!
//! Scenes are small synthetic UTM grids so every expected pixel can be
//! written out by hand.

use approx::assert_relative_eq;
use rasalg_algorithms::algebra::{
    check_all, AlgebraParams, CoverageAlgebra, ExecutionConfig, NoDataRange, Operator, Roi,
};
use rasalg_core::crs::CoordinateOperation;
use rasalg_core::{
    AliasTransformFinder, AnyRaster, Error, GeoTransform, PixelType, Raster, Result,
    TransformFinder, CRS,
};
use rasalg_parallel::{CancelFlag, ProcessingMode, Progress};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// 5x6 scene of 30 m pixels, upper-left corner at (350000, 6300000)
fn scene<T: rasalg_core::RasterElement>(values: Vec<T>) -> Raster<T> {
    Raster::from_vec(values, 5, 6)
        .unwrap()
        .with_transform(GeoTransform::new(350_000.0, 6_300_000.0, 30.0, -30.0))
        .with_crs(CRS::from_epsg(32719))
}

fn ramp(start: i16) -> Vec<i16> {
    (0..30).map(|i| start + i as i16).collect()
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

#[test]
fn sum_of_three_scenes() {
    init_tracing();
    let a: AnyRaster = scene(ramp(0)).into();
    let b: AnyRaster = scene(ramp(100)).into();
    let c: AnyRaster = scene(vec![1i16; 30]).into();

    let params = AlgebraParams::builder(Operator::Sum).build();
    let out = CoverageAlgebra::default()
        .run(&[Some(&a), Some(&b), Some(&c)], &params)
        .unwrap();

    assert_eq!(out.pixel_type(), PixelType::Int16);
    let out = out.as_typed::<i16>().unwrap();
    for (i, &v) in out.data().iter().enumerate() {
        assert_eq!(v, 2 * i as i16 + 101);
    }
}

#[test]
fn ratio_of_two_bands() {
    init_tracing();
    let nir: AnyRaster = scene(vec![0.6f32; 30]).into();
    let mut red_values = vec![0.2f32; 30];
    red_values[7] = 0.0;
    let red: AnyRaster = scene(red_values).into();

    let params = AlgebraParams::builder(Operator::Divide)
        .destination_nodata(-9999.0)
        .build();
    let out = CoverageAlgebra::default().run(&[Some(&nir), Some(&red)], &params).unwrap();

    let out = out.as_typed::<f32>().unwrap();
    assert_eq!(out.nodata(), Some(-9999.0));
    assert_eq!(out.get(1, 1).unwrap(), -9999.0);
    assert_relative_eq!(out.get(0, 0).unwrap(), 3.0, epsilon = 1e-6);
    assert!(out.data().iter().all(|v| v.is_finite()));
}

#[test]
fn byte_scenes_clamp_at_type_limits() {
    let a: AnyRaster = scene(vec![250u8; 30]).into();
    let b: AnyRaster = scene(vec![10u8; 30]).into();

    let sum = CoverageAlgebra::default()
        .run(&[Some(&a), Some(&b)], &AlgebraParams::builder(Operator::Sum).build())
        .unwrap();
    assert!(sum.as_typed::<u8>().unwrap().data().iter().all(|&v| v == 255));

    let diff = CoverageAlgebra::default()
        .run(&[Some(&b), Some(&a)], &AlgebraParams::builder(Operator::Subtract).build())
        .unwrap();
    assert!(diff.as_typed::<u8>().unwrap().data().iter().all(|&v| v == 0));

    let ratio = CoverageAlgebra::default()
        .run(&[Some(&a), Some(&b)], &AlgebraParams::builder(Operator::Divide).build())
        .unwrap();
    assert_eq!(ratio.pixel_type(), PixelType::Float32);
    assert_eq!(ratio.get_f64(0, 4, 5).unwrap(), 25.0);
}

// ---------------------------------------------------------------------------
// ROI and no-data
// ---------------------------------------------------------------------------

#[test]
fn roi_limits_computation() {
    let a: AnyRaster = scene(vec![4.0f64; 30]).into();
    let b: AnyRaster = scene(vec![2.5f64; 30]).into();

    // Covers columns 1..=3 of rows 2..=3
    let roi = Roi::from_exterior(vec![
        (350_030.0, 6_299_940.0),
        (350_120.0, 6_299_940.0),
        (350_120.0, 6_299_880.0),
        (350_030.0, 6_299_880.0),
        (350_030.0, 6_299_940.0),
    ]);
    let params = AlgebraParams::builder(Operator::Multiply)
        .roi(roi)
        .destination_nodata(f64::NAN)
        .build();
    let out = CoverageAlgebra::default().run(&[Some(&a), Some(&b)], &params).unwrap();

    for row in 0..5 {
        for col in 0..6 {
            let v = out.get_f64(0, row, col).unwrap();
            if (2..4).contains(&row) && (1..4).contains(&col) {
                assert_eq!(v, 10.0, "({row}, {col})");
            } else {
                assert!(v.is_nan(), "({row}, {col})");
            }
        }
    }
}

#[test]
fn primary_nodata_propagates() {
    let mut a = scene(ramp(0)).with_nodata(-1);
    a.set(0, 3, -1).unwrap();
    let mut b = scene(vec![10i16; 30]);
    b.set(4, 4, -1).unwrap();
    let (a, b): (AnyRaster, AnyRaster) = (a.into(), b.into());

    let out = CoverageAlgebra::default()
        .run(&[Some(&a), Some(&b)], &AlgebraParams::builder(Operator::Subtract).build())
        .unwrap();
    let out = out.as_typed::<i16>().unwrap();
    assert_eq!(out.nodata(), Some(-1));
    assert_eq!(out.get(0, 3).unwrap(), -1);
    // Secondary sources are checked against the primary's range too
    assert_eq!(out.get(4, 4).unwrap(), -1);
    assert_eq!(out.get(0, 0).unwrap(), -10);
}

#[test]
fn explicit_range_from_json() {
    let params: AlgebraParams = serde_json::from_str(
        r#"{
            "operator": "SUM",
            "nodata": {"pixel_type": "int16", "lo": 0.0, "hi": 4.0, "nan_included": false},
            "destination_nodata": -32768.0
        }"#,
    )
    .unwrap();
    let a: AnyRaster = scene(ramp(0)).into();
    let b: AnyRaster = scene(ramp(0)).into();

    let out = CoverageAlgebra::default().run(&[Some(&a), Some(&b)], &params).unwrap();
    let out = out.as_typed::<i16>().unwrap();
    for col in 0..5 {
        assert_eq!(out.get(0, col).unwrap(), i16::MIN);
    }
    assert_eq!(out.get(0, 5).unwrap(), 10);
    assert_eq!(out.get(4, 5).unwrap(), 58);
    assert_eq!(
        params.nodata(),
        Some(NoDataRange::new(PixelType::Int16, 0.0, 4.0))
    );
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn incompatible_scenes_rejected_in_order() {
    let a: AnyRaster = scene(vec![1u16; 30]).into();
    let shifted: AnyRaster = scene(vec![1u16; 30])
        .with_transform(GeoTransform::new(350_015.0, 6_300_000.0, 30.0, -30.0))
        .into();
    let other_type: AnyRaster = scene(vec![1i32; 30]).into();
    let params = AlgebraParams::default();

    let err = CoverageAlgebra::default()
        .run(&[Some(&a), Some(&other_type), Some(&shifted)], &params)
        .unwrap_err();
    assert!(matches!(err, Error::DataTypeMismatch { index: 1, .. }));

    let err = CoverageAlgebra::default()
        .run(&[Some(&a), Some(&shifted), Some(&other_type)], &params)
        .unwrap_err();
    assert!(matches!(err, Error::EnvelopeMismatch { index: 1, .. }));
}

#[test]
fn zero_size_scenes_rejected() {
    let empty: AnyRaster = Raster::<u8>::filled(0, 3, 1).into();
    let err = CoverageAlgebra::default()
        .run(&[Some(&empty), Some(&empty)], &AlgebraParams::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidDimensions { height: 0, .. }));
}

#[test]
fn missing_crs_is_a_mismatch() {
    let a: AnyRaster = scene(vec![1u8; 30]).into();
    let mut bare = scene(vec![1u8; 30]);
    bare.set_crs(None);
    let bare: AnyRaster = bare.into();

    let err = check_all(&[Some(&a), Some(&bare)], &AliasTransformFinder::new()).unwrap_err();
    assert!(matches!(err, Error::CrsMismatch { index: 1, .. }));
}

/// Treats every pair of systems as related by the identity
struct PermissiveFinder;

struct Identity;

impl CoordinateOperation for Identity {
    fn is_identity(&self) -> bool {
        true
    }

    fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }
}

impl TransformFinder for PermissiveFinder {
    fn find_transform(&self, _: &CRS, _: &CRS) -> Result<Option<Box<dyn CoordinateOperation>>> {
        Ok(Some(Box::new(Identity)))
    }
}

#[test]
fn custom_finder_decides_crs_equivalence() {
    let a: AnyRaster = scene(vec![2.0f64; 30]).into();
    let b: AnyRaster = scene(vec![3.0f64; 30]).with_crs(CRS::from_epsg(5361)).into();
    let params = AlgebraParams::builder(Operator::Multiply).build();

    assert!(CoverageAlgebra::default().run(&[Some(&a), Some(&b)], &params).is_err());

    let out = CoverageAlgebra::new(PermissiveFinder)
        .run(&[Some(&a), Some(&b)], &params)
        .unwrap();
    assert_eq!(out.get_f64(0, 2, 2).unwrap(), 6.0);
    assert_eq!(out.crs(), a.crs());
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

#[test]
fn sequential_and_parallel_agree() {
    let a: AnyRaster = scene(ramp(-15)).into();
    let b: AnyRaster = scene(ramp(3)).into();
    let params = AlgebraParams::builder(Operator::Divide).destination_nodata(0.0).build();

    let sequential = CoverageAlgebra::default()
        .with_config(ExecutionConfig::default().with_mode(ProcessingMode::Sequential))
        .run(&[Some(&a), Some(&b)], &params)
        .unwrap();
    let parallel = CoverageAlgebra::default()
        .with_config(ExecutionConfig::default().with_tile_rows(2))
        .run(&[Some(&a), Some(&b)], &params)
        .unwrap();
    assert_eq!(
        sequential.as_typed::<f32>().unwrap().data(),
        parallel.as_typed::<f32>().unwrap().data()
    );

    let pooled = CoverageAlgebra::default()
        .with_config(
            ExecutionConfig::default()
                .with_tile_rows(1)
                .with_mode(ProcessingMode::ParallelWith(3)),
        )
        .run(&[Some(&a), Some(&b)], &params)
        .unwrap();
    assert_eq!(
        sequential.as_typed::<f32>().unwrap().data(),
        pooled.as_typed::<f32>().unwrap().data()
    );
}

#[test]
fn cancelled_run_returns_error() {
    let a: AnyRaster = scene(ramp(0)).into();
    let cancel = CancelFlag::new();
    let algebra = CoverageAlgebra::default()
        .with_config(ExecutionConfig::default().with_cancel_flag(cancel.clone()));

    assert!(algebra.run(&[Some(&a), Some(&a)], &AlgebraParams::default()).is_ok());
    cancel.cancel();
    let err = algebra.run(&[Some(&a), Some(&a)], &AlgebraParams::default()).unwrap_err();
    assert!(matches!(err, Error::Cancelled { .. }));
}

#[test]
fn cancelled_part_way_through() {
    let a: AnyRaster = scene(ramp(0)).into();
    let cancel = CancelFlag::new();
    let trigger = cancel.clone();
    let algebra = CoverageAlgebra::default().with_config(
        ExecutionConfig::default()
            .with_tile_rows(2)
            .with_cancel_flag(cancel)
            .with_progress(Progress::new(move |done, _| {
                if done >= 2 {
                    trigger.cancel();
                }
            })),
    );

    let err = algebra.run(&[Some(&a), Some(&a)], &AlgebraParams::default()).unwrap_err();
    assert_eq!(err, Error::Cancelled { rows_done: 2 });
}
