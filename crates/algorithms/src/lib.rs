//! # rasalg Algorithms
//!
//! Raster algebra over aligned grids.
//!
//! ## Modules
//!
//! - **algebra**: compatibility checks, ROI masks, no-data resolution and
//!   the pixelwise SUM / SUBTRACT / MULTIPLY / DIVIDE executor

pub mod algebra;
mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::algebra::{
        check_all, check_pair, execute, resolve, transform_roi_to_grid,
        AlgebraExecutor, AlgebraParams, CoverageAlgebra, ExecutionConfig,
        NoDataRange, Operator, Roi, RoiMask,
    };
    pub use rasalg_core::prelude::*;
    pub use rasalg_parallel::{CancelFlag, ProcessingMode, Progress};
}
