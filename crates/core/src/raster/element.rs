//! Raster element trait for generic cell values

use crate::raster::{AnyRaster, PixelType, Raster};
use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in a raster cell.
///
/// Implemented for exactly the kinds listed in [`PixelType`]; each
/// implementation knows how to move between its typed [`Raster`] and the
/// [`AnyRaster`] variant that carries it.
pub trait RasterElement:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Storage kind tag
    const PIXEL_TYPE: PixelType;

    /// Widen to f64. Exact for every supported kind.
    fn as_f64(self) -> f64;

    /// Narrow an f64 into this type, clamping to the representable range.
    ///
    /// Integer targets truncate toward zero and map NaN to zero; float
    /// targets keep NaN and infinities.
    fn from_f64_clamped(value: f64) -> Self;

    /// Wrap a typed raster into the matching [`AnyRaster`] variant
    fn into_any(raster: Raster<Self>) -> AnyRaster;

    /// Borrow the typed raster if `any` holds this type
    fn from_any(any: &AnyRaster) -> Option<&Raster<Self>>;
}

macro_rules! impl_raster_element_int {
    ($t:ty, $kind:ident) => {
        impl RasterElement for $t {
            const PIXEL_TYPE: PixelType = PixelType::$kind;

            fn as_f64(self) -> f64 {
                self as f64
            }

            fn from_f64_clamped(value: f64) -> Self {
                if value.is_nan() {
                    return 0;
                }
                value.clamp(<$t>::MIN as f64, <$t>::MAX as f64) as $t
            }

            fn into_any(raster: Raster<Self>) -> AnyRaster {
                AnyRaster::$kind(raster)
            }

            fn from_any(any: &AnyRaster) -> Option<&Raster<Self>> {
                match any {
                    AnyRaster::$kind(r) => Some(r),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! impl_raster_element_float {
    ($t:ty, $kind:ident) => {
        impl RasterElement for $t {
            const PIXEL_TYPE: PixelType = PixelType::$kind;

            fn as_f64(self) -> f64 {
                self as f64
            }

            fn from_f64_clamped(value: f64) -> Self {
                if value.is_finite() {
                    value.clamp(<$t>::MIN as f64, <$t>::MAX as f64) as $t
                } else {
                    value as $t
                }
            }

            fn into_any(raster: Raster<Self>) -> AnyRaster {
                AnyRaster::$kind(raster)
            }

            fn from_any(any: &AnyRaster) -> Option<&Raster<Self>> {
                match any {
                    AnyRaster::$kind(r) => Some(r),
                    _ => None,
                }
            }
        }
    };
}

impl_raster_element_int!(i8, Int8);
impl_raster_element_int!(u8, UInt8);
impl_raster_element_int!(i16, Int16);
impl_raster_element_int!(u16, UInt16);
impl_raster_element_int!(i32, Int32);
impl_raster_element_float!(f32, Float32);
impl_raster_element_float!(f64, Float64);
