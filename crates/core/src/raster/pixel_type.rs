//! Pixel storage kinds

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric storage kind of a raster sample.
///
/// This is the closed set of kinds the algebra supports. Anything else is
/// rejected with [`Error::UnsupportedPixelType`] when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PixelType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    Float32,
    Float64,
}

impl PixelType {
    /// All supported kinds, narrowest integer first
    pub const ALL: [PixelType; 7] = [
        PixelType::Int8,
        PixelType::UInt8,
        PixelType::Int16,
        PixelType::UInt16,
        PixelType::Int32,
        PixelType::Float32,
        PixelType::Float64,
    ];

    /// Lower-case canonical name
    pub fn name(self) -> &'static str {
        match self {
            PixelType::Int8 => "int8",
            PixelType::UInt8 => "uint8",
            PixelType::Int16 => "int16",
            PixelType::UInt16 => "uint16",
            PixelType::Int32 => "int32",
            PixelType::Float32 => "float32",
            PixelType::Float64 => "float64",
        }
    }

    /// Whether samples are floating point
    pub fn is_float(self) -> bool {
        matches!(self, PixelType::Float32 | PixelType::Float64)
    }

    /// Floating kind that holds quotients of this kind without truncation.
    ///
    /// Integers up to 16 bits fit exactly in `float32`; `int32` needs `float64`.
    pub fn division_output(self) -> PixelType {
        match self {
            PixelType::Int8
            | PixelType::UInt8
            | PixelType::Int16
            | PixelType::UInt16
            | PixelType::Float32 => PixelType::Float32,
            PixelType::Int32 | PixelType::Float64 => PixelType::Float64,
        }
    }

    /// Convert `value` into this kind's numeric domain.
    ///
    /// Integers saturate at the kind's bounds and truncate toward zero,
    /// NaN maps to zero. `float32` rounds to single precision and saturates
    /// finite values at `±f32::MAX`.
    pub fn cast(self, value: f64) -> f64 {
        match self {
            PixelType::Int8 => value as i8 as f64,
            PixelType::UInt8 => value as u8 as f64,
            PixelType::Int16 => value as i16 as f64,
            PixelType::UInt16 => value as u16 as f64,
            PixelType::Int32 => value as i32 as f64,
            PixelType::Float32 => {
                if value.is_finite() {
                    value.clamp(f32::MIN as f64, f32::MAX as f64) as f32 as f64
                } else {
                    value as f32 as f64
                }
            }
            PixelType::Float64 => value,
        }
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelType {
    type Err = Error;

    /// Accepts the canonical names as well as GDAL data type names
    /// (`Byte`, `UInt16`, ...), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int8" | "i8" => Ok(PixelType::Int8),
            "uint8" | "u8" | "byte" => Ok(PixelType::UInt8),
            "int16" | "i16" => Ok(PixelType::Int16),
            "uint16" | "u16" => Ok(PixelType::UInt16),
            "int32" | "i32" => Ok(PixelType::Int32),
            "float32" | "f32" => Ok(PixelType::Float32),
            "float64" | "f64" => Ok(PixelType::Float64),
            _ => Err(Error::UnsupportedPixelType(s.to_string())),
        }
    }
}

impl TryFrom<&str> for PixelType {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for PixelType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PixelType> for String {
    fn from(value: PixelType) -> Self {
        value.name().to_string()
    }
}
