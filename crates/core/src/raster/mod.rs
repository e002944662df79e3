//! Raster data structures

mod any;
mod element;
mod geometry;
mod geotransform;
mod grid;
mod metadata;
mod pixel_type;

pub use any::AnyRaster;
pub use element::RasterElement;
pub use geometry::{Envelope, GridGeometry};
pub use geotransform::{GeoTransform, PixelOrientation};
pub use grid::Raster;
pub use metadata::{PropertyValue, RasterMetadata, SampleDimension};
pub use pixel_type::PixelType;
