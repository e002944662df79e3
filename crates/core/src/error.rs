//! Error types for rasalg

use thiserror::Error;

/// Main error type for rasalg operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("source {index} is missing")]
    NullInput { index: usize },

    #[error("at least {required} sources are required, got {found}")]
    NotEnoughSources { required: usize, found: usize },

    #[error("source {index} CRS {found} does not match {expected}")]
    CrsMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("could not look up a transform between {source_crs} and {target_crs}: {reason}")]
    TransformLookup {
        source_crs: String,
        target_crs: String,
        reason: String,
    },

    #[error("source {index} envelope {found} does not match {expected}")]
    EnvelopeMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("source {index} grid size ({ar}, {ac}) does not match ({er}, {ec})")]
    GridMismatch {
        index: usize,
        er: usize,
        ec: usize,
        ar: usize,
        ac: usize,
    },

    #[error("source {index} pixel type {found} does not match {expected}")]
    DataTypeMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("source {index} has {found} bands, expected {expected}")]
    BandCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid-to-world transform is not invertible (determinant {determinant})")]
    NonInvertibleTransform { determinant: f64 },

    #[error("unsupported pixel type: {0}")]
    UnsupportedPixelType(String),

    #[error("invalid raster dimensions: {bands} bands of {width}x{height}")]
    InvalidDimensions {
        bands: usize,
        width: usize,
        height: usize,
    },

    #[error("index out of bounds: ({band}, {row}, {col}) in raster of size ({bands}, {rows}, {cols})")]
    IndexOutOfBounds {
        band: usize,
        row: usize,
        col: usize,
        bands: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("operation cancelled after {rows_done} rows")]
    Cancelled { rows_done: usize },
}

/// Result type alias for rasalg operations
pub type Result<T> = std::result::Result<T, Error>;
