//! # rasalg Core
//!
//! Core types for the rasalg raster algebra library.
//!
//! This crate provides:
//! - `Raster<T>`: Generic multi-band raster grid type
//! - `AnyRaster`: A raster of any supported pixel type
//! - `GeoTransform`, `GridGeometry`: Affine georeferencing and grid span
//! - `CRS` and the `TransformFinder` seam for reference system lookups
//! - The error taxonomy shared by every rasalg crate

pub mod crs;
pub mod error;
pub mod raster;

pub use crs::{AliasTransformFinder, CoordinateOperation, TransformFinder, CRS};
pub use error::{Error, Result};
pub use raster::{
    AnyRaster, Envelope, GeoTransform, GridGeometry, PixelOrientation, PixelType, Raster,
    RasterElement,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::{AliasTransformFinder, TransformFinder, CRS};
    pub use crate::error::{Error, Result};
    pub use crate::raster::{
        AnyRaster, GeoTransform, GridGeometry, PixelType, Raster, RasterElement,
    };
}
