//! Coverage algebra
//!
//! Pixelwise combination of N aligned rasters:
//! - Compatibility: reference system, envelope, grid, pixel type, bands
//! - ROI: world-space polygons rasterized into a grid mask
//! - No-data: explicit ranges or the primary source's value
//! - Executor: SUM, SUBTRACT, MULTIPLY, DIVIDE folded left to right

mod compat;
mod executor;
mod nodata;
mod operator;
mod params;
mod process;
mod roi;

pub use compat::{check_all, check_pair};
pub use executor::{execute, AlgebraExecutor, ExecutionConfig, UNMASKED_MARKER};
pub use nodata::{resolve, NoDataRange, ResolvedNoData};
pub use operator::Operator;
pub use params::{AlgebraParams, AlgebraParamsBuilder};
pub use process::CoverageAlgebra;
pub use roi::{transform_roi_to_grid, Roi, RoiMask};
