//! Main Raster type

use crate::crs::CRS;
use crate::error::{Error, Result};
use crate::raster::{Envelope, GeoTransform, GridGeometry, RasterElement, RasterMetadata};
use ndarray::{Array2, Array3, ArrayView2, Axis};

/// A georeferenced multi-band raster grid.
///
/// `Raster<T>` stores values of type `T` as `(band, row, col)` together with
/// its transform, CRS, embedded no-data value and descriptive metadata.
///
/// # Type Parameters
///
/// - `T`: The cell value type, must implement [`RasterElement`]
///
/// # Example
///
/// ```ignore
/// use rasalg_core::Raster;
///
/// let mut raster: Raster<f32> = Raster::new(100, 100);
/// raster.set(10, 20, 42.0)?;
/// let value = raster.get(10, 20)?;
/// ```
#[derive(Debug, Clone)]
pub struct Raster<T: RasterElement> {
    /// Raster data stored as (band, row, col)
    data: Array3<T>,
    /// Affine transformation, upper-left corner convention
    transform: GeoTransform,
    /// Coordinate reference system
    crs: Option<CRS>,
    /// No-data value
    nodata: Option<T>,
    /// Name, sample dimensions and auxiliary properties
    metadata: RasterMetadata,
}

impl<T: RasterElement> Raster<T> {
    /// Create a new single-band raster filled with zeros.
    ///
    /// A zero `rows` or `cols` gives an empty raster, which
    /// [`is_empty`](Self::is_empty) reports and validation rejects.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_parts(Array3::zeros((1, rows, cols)))
    }

    /// Create a new single-band raster filled with a specific value.
    ///
    /// Zero dimensions behave as in [`new`](Self::new).
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self::from_parts(Array3::from_elem((1, rows, cols), value))
    }

    /// Create a single-band raster from row-major data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        Self::from_bands_vec(data, 1, rows, cols)
    }

    /// Create a raster from band-sequential data (all of band 0, then band 1, ...)
    pub fn from_bands_vec(data: Vec<T>, bands: usize, rows: usize, cols: usize) -> Result<Self> {
        let invalid = Error::InvalidDimensions {
            bands,
            width: cols,
            height: rows,
        };
        if bands == 0 || rows == 0 || cols == 0 || data.len() != bands * rows * cols {
            return Err(invalid);
        }

        let array = Array3::from_shape_vec((bands, rows, cols), data).map_err(|_| invalid)?;
        Ok(Self::from_parts(array))
    }

    /// Create a single-band raster from a `(row, col)` ndarray
    pub fn from_array(data: Array2<T>) -> Result<Self> {
        Self::from_array3(data.insert_axis(Axis(0)))
    }

    /// Create a raster from a `(band, row, col)` ndarray.
    ///
    /// Fails with [`Error::InvalidDimensions`] if any axis is empty.
    pub fn from_array3(data: Array3<T>) -> Result<Self> {
        let (bands, rows, cols) = data.dim();
        if bands == 0 || rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions {
                bands,
                width: cols,
                height: rows,
            });
        }
        Ok(Self::from_parts(data))
    }

    fn from_parts(data: Array3<T>) -> Self {
        Self {
            data,
            transform: GeoTransform::default(),
            crs: None,
            nodata: None,
            metadata: RasterMetadata::default(),
        }
    }

    /// Create a raster with the same georeferencing and metadata but a
    /// different data type. The no-data value is not carried over.
    pub fn with_same_meta<U: RasterElement>(&self, data: Array3<U>) -> Raster<U> {
        Raster {
            data,
            transform: self.transform,
            crs: self.crs.clone(),
            nodata: None,
            metadata: self.metadata.clone(),
        }
    }

    /// Builder-style transform setter
    pub fn with_transform(mut self, transform: GeoTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder-style CRS setter
    pub fn with_crs(mut self, crs: CRS) -> Self {
        self.crs = Some(crs);
        self
    }

    /// Builder-style no-data setter
    pub fn with_nodata(mut self, nodata: T) -> Self {
        self.nodata = Some(nodata);
        self
    }

    /// Builder-style metadata setter
    pub fn with_metadata(mut self, metadata: RasterMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Number of bands
    pub fn bands(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Whether any of bands, rows or columns is zero
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col) of the first band
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.get_band(0, row, col)
    }

    /// Get value at (band, row, col)
    pub fn get_band(&self, band: usize, row: usize, col: usize) -> Result<T> {
        self.data
            .get((band, row, col))
            .copied()
            .ok_or_else(|| self.out_of_bounds(band, row, col))
    }

    /// Set value at (row, col) of the first band
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.set_band(0, row, col, value)
    }

    /// Set value at (band, row, col)
    pub fn set_band(&mut self, band: usize, row: usize, col: usize, value: T) -> Result<()> {
        let err = self.out_of_bounds(band, row, col);
        let cell = self.data.get_mut((band, row, col)).ok_or(err)?;
        *cell = value;
        Ok(())
    }

    fn out_of_bounds(&self, band: usize, row: usize, col: usize) -> Error {
        Error::IndexOutOfBounds {
            band,
            row,
            col,
            bands: self.bands(),
            rows: self.rows(),
            cols: self.cols(),
        }
    }

    /// View of one band
    pub fn band(&self, band: usize) -> Option<ArrayView2<'_, T>> {
        (band < self.bands()).then(|| self.data.index_axis(Axis(0), band))
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array3<T> {
        &self.data
    }

    // Metadata

    /// Get the geotransform
    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// Set the geotransform
    pub fn set_transform(&mut self, transform: GeoTransform) {
        self.transform = transform;
    }

    /// Get the CRS
    pub fn crs(&self) -> Option<&CRS> {
        self.crs.as_ref()
    }

    /// Set the CRS
    pub fn set_crs(&mut self, crs: Option<CRS>) {
        self.crs = crs;
    }

    /// Get the no-data value
    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }

    /// Set the no-data value
    pub fn set_nodata(&mut self, nodata: Option<T>) {
        self.nodata = nodata;
    }

    /// Name, sample dimensions and properties
    pub fn metadata(&self) -> &RasterMetadata {
        &self.metadata
    }

    /// Mutable access to the descriptive metadata
    pub fn metadata_mut(&mut self) -> &mut RasterMetadata {
        &mut self.metadata
    }

    /// Transform, CRS and grid span
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.transform, self.crs.clone(), self.rows(), self.cols())
    }

    /// World extent of the grid
    pub fn envelope(&self) -> Envelope {
        self.geometry().envelope()
    }
}
