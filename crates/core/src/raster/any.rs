//! Raster of any supported pixel type

use crate::crs::CRS;
use crate::raster::{
    Envelope, GeoTransform, GridGeometry, PixelType, Raster, RasterElement, RasterMetadata,
};

/// A raster whose pixel type is only known at runtime.
///
/// One variant per [`PixelType`]; matching on it is exhaustive, so adding a
/// kind is a compile error everywhere dispatch happens.
#[derive(Debug, Clone)]
pub enum AnyRaster {
    Int8(Raster<i8>),
    UInt8(Raster<u8>),
    Int16(Raster<i16>),
    UInt16(Raster<u16>),
    Int32(Raster<i32>),
    Float32(Raster<f32>),
    Float64(Raster<f64>),
}

/// Run `$body` with `$r` bound to the typed raster inside `$any`.
#[macro_export]
macro_rules! dispatch_raster {
    ($any:expr, $r:ident => $body:expr) => {
        match $any {
            $crate::raster::AnyRaster::Int8($r) => $body,
            $crate::raster::AnyRaster::UInt8($r) => $body,
            $crate::raster::AnyRaster::Int16($r) => $body,
            $crate::raster::AnyRaster::UInt16($r) => $body,
            $crate::raster::AnyRaster::Int32($r) => $body,
            $crate::raster::AnyRaster::Float32($r) => $body,
            $crate::raster::AnyRaster::Float64($r) => $body,
        }
    };
}

impl AnyRaster {
    pub fn pixel_type(&self) -> PixelType {
        match self {
            AnyRaster::Int8(_) => PixelType::Int8,
            AnyRaster::UInt8(_) => PixelType::UInt8,
            AnyRaster::Int16(_) => PixelType::Int16,
            AnyRaster::UInt16(_) => PixelType::UInt16,
            AnyRaster::Int32(_) => PixelType::Int32,
            AnyRaster::Float32(_) => PixelType::Float32,
            AnyRaster::Float64(_) => PixelType::Float64,
        }
    }

    pub fn rows(&self) -> usize {
        dispatch_raster!(self, r => r.rows())
    }

    pub fn cols(&self) -> usize {
        dispatch_raster!(self, r => r.cols())
    }

    pub fn bands(&self) -> usize {
        dispatch_raster!(self, r => r.bands())
    }

    /// Whether any of bands, rows or columns is zero
    pub fn is_empty(&self) -> bool {
        dispatch_raster!(self, r => r.is_empty())
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        dispatch_raster!(self, r => r.shape())
    }

    pub fn transform(&self) -> &GeoTransform {
        dispatch_raster!(self, r => r.transform())
    }

    pub fn crs(&self) -> Option<&CRS> {
        dispatch_raster!(self, r => r.crs())
    }

    pub fn geometry(&self) -> GridGeometry {
        dispatch_raster!(self, r => r.geometry())
    }

    pub fn envelope(&self) -> Envelope {
        dispatch_raster!(self, r => r.envelope())
    }

    pub fn metadata(&self) -> &RasterMetadata {
        dispatch_raster!(self, r => r.metadata())
    }

    /// Embedded no-data value widened to f64
    pub fn nodata(&self) -> Option<f64> {
        dispatch_raster!(self, r => r.nodata().map(|v| v.as_f64()))
    }

    /// Sample at (band, row, col) widened to f64
    pub fn get_f64(&self, band: usize, row: usize, col: usize) -> crate::Result<f64> {
        dispatch_raster!(self, r => r.get_band(band, row, col).map(|v| v.as_f64()))
    }

    /// Borrow as a typed raster if the pixel type matches
    pub fn as_typed<T: RasterElement>(&self) -> Option<&Raster<T>> {
        T::from_any(self)
    }
}

impl<T: RasterElement> From<Raster<T>> for AnyRaster {
    fn from(raster: Raster<T>) -> Self {
        T::into_any(raster)
    }
}
