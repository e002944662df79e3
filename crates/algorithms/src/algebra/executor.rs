//! Pixelwise combination of aligned sources
//!
//! Each output pixel depends only on the same pixel of every source, the
//! mask and the no-data parameters, so rows are computed independently and
//! written into disjoint slices of one output buffer.

use super::nodata::NoDataRange;
use super::operator::Operator;
use super::roi::RoiMask;
use ndarray::{Array3, ArrayView1, Axis};
use rasalg_core::{AnyRaster, Error, PixelType, Raster, RasterElement, Result};
use rasalg_parallel::{CancelFlag, ParallelStrategy, ProcessingMode, Progress, TileIterator};
use tracing::{debug, trace};

/// Value written to skipped pixels when no destination no-data is set
pub const UNMASKED_MARKER: f64 = 0.0;

/// How the executor schedules work
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Threading mode for rows within a tile
    pub mode: ProcessingMode,
    /// Rows per tile; cancellation is checked between tiles
    pub tile_rows: usize,
    /// Optional cancellation flag
    pub cancel: Option<CancelFlag>,
    /// Optional callback told how many rows are done after each tile
    pub progress: Option<Progress>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            mode: ProcessingMode::Parallel,
            tile_rows: 256,
            cancel: None,
            progress: None,
        }
    }
}

impl ExecutionConfig {
    pub fn with_mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_tile_rows(mut self, tile_rows: usize) -> Self {
        self.tile_rows = tile_rows.max(1);
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// Per-run pixel rules, fixed before the first pixel is computed
#[derive(Debug, Clone, Copy)]
struct PixelRules<'a> {
    operator: Operator,
    mask: Option<&'a RoiMask>,
    nodata: Option<&'a NoDataRange>,
    destination: Option<f64>,
}

/// Computes the output grid from validated sources
#[derive(Debug, Clone, Default)]
pub struct AlgebraExecutor {
    config: ExecutionConfig,
}

impl AlgebraExecutor {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Combine `sources` pixel by pixel.
    ///
    /// For every pixel, in order:
    /// 1. outside `roi_mask` → destination
    /// 2. any source value in `nodata` → destination
    /// 3. otherwise the left-to-right fold of `operator` over the sources
    /// 4. a zero denominator in a DIVIDE fold → destination
    /// 5. the result is clamped into the output pixel type
    ///
    /// Destination is `destination` when given, [`UNMASKED_MARKER`]
    /// otherwise. The output keeps the source pixel type except for DIVIDE,
    /// which produces floating point (see [`PixelType::division_output`]).
    ///
    /// Sources are expected to have passed
    /// [`check_all`](super::compat::check_all); mismatched shapes or types
    /// are still rejected here rather than read out of bounds.
    pub fn execute(
        &self,
        sources: &[&AnyRaster],
        operator: Operator,
        roi_mask: Option<&RoiMask>,
        nodata: Option<&NoDataRange>,
        destination: Option<f64>,
    ) -> Result<AnyRaster> {
        let Some((&primary, _)) = sources.split_first() else {
            return Err(Error::NotEnoughSources {
                required: 2,
                found: 0,
            });
        };
        if sources.len() < 2 {
            return Err(Error::NotEnoughSources {
                required: 2,
                found: sources.len(),
            });
        }

        if primary.is_empty() {
            return Err(Error::InvalidDimensions {
                bands: primary.bands(),
                width: primary.cols(),
                height: primary.rows(),
            });
        }

        if let Some(mask) = roi_mask {
            if mask.shape() != primary.shape() {
                let (rows, cols) = mask.shape();
                return Err(Error::InvalidParameter {
                    name: "roi_mask",
                    value: format!("{rows}x{cols}"),
                    reason: format!("sources are {}x{}", primary.rows(), primary.cols()),
                });
            }
        }

        let rules = PixelRules {
            operator,
            mask: roi_mask,
            nodata,
            destination,
        };

        debug!(
            %operator,
            sources = sources.len(),
            pixel_type = %primary.pixel_type(),
            output_type = %operator.output_type(primary.pixel_type()),
            masked = roi_mask.is_some(),
            nodata = nodata.is_some(),
            "executing raster algebra"
        );

        match primary.pixel_type() {
            PixelType::Int8 => self.execute_typed::<i8>(sources, &rules),
            PixelType::UInt8 => self.execute_typed::<u8>(sources, &rules),
            PixelType::Int16 => self.execute_typed::<i16>(sources, &rules),
            PixelType::UInt16 => self.execute_typed::<u16>(sources, &rules),
            PixelType::Int32 => self.execute_typed::<i32>(sources, &rules),
            PixelType::Float32 => self.execute_typed::<f32>(sources, &rules),
            PixelType::Float64 => self.execute_typed::<f64>(sources, &rules),
        }
    }

    fn execute_typed<T: RasterElement>(
        &self,
        sources: &[&AnyRaster],
        rules: &PixelRules<'_>,
    ) -> Result<AnyRaster> {
        let typed = downcast_sources::<T>(sources)?;

        let output_type = rules.operator.output_type(T::PIXEL_TYPE);
        if output_type == T::PIXEL_TYPE {
            self.combine::<T, T>(&typed, rules).map(AnyRaster::from)
        } else if output_type == PixelType::Float32 {
            self.combine::<T, f32>(&typed, rules).map(AnyRaster::from)
        } else {
            self.combine::<T, f64>(&typed, rules).map(AnyRaster::from)
        }
    }

    fn combine<T: RasterElement, U: RasterElement>(
        &self,
        sources: &[&Raster<T>],
        rules: &PixelRules<'_>,
    ) -> Result<Raster<U>> {
        let primary = sources[0];
        let (bands, rows, cols) = primary.data().dim();
        let lines = bands * rows;
        let fill = U::from_f64_clamped(rules.destination.unwrap_or(UNMASKED_MARKER));

        let mut out = vec![U::zero(); lines * cols];
        self.config
            .mode
            .install(|| self.fill_tiles(sources, rules, fill, &mut out, rows, cols))?;

        let data = Array3::from_shape_vec((bands, rows, cols), out).map_err(|_| {
            Error::InvalidDimensions {
                bands,
                width: cols,
                height: rows,
            }
        })?;
        let mut output = primary.with_same_meta(data);
        output.set_nodata(rules.destination.map(U::from_f64_clamped));
        Ok(output)
    }

    /// Compute `out` tile by tile. Lines are `(band, row)` pairs in
    /// band-major order; cancellation is checked before each tile.
    fn fill_tiles<T: RasterElement, U: RasterElement>(
        &self,
        sources: &[&Raster<T>],
        rules: &PixelRules<'_>,
        fill: U,
        out: &mut [U],
        rows: usize,
        cols: usize,
    ) -> Result<()> {
        let lines = out.len() / cols;
        for tile in TileIterator::row_bands(lines, cols, self.config.tile_rows) {
            if let Some(cancel) = &self.config.cancel {
                if cancel.is_cancelled() {
                    debug!(rows_done = tile.row_offset, "raster algebra cancelled");
                    return Err(Error::Cancelled {
                        rows_done: tile.row_offset,
                    });
                }
            }
            trace!(first_line = tile.row_offset, lines = tile.rows, "processing tile");

            let start = tile.row_offset * cols;
            let chunk = &mut out[start..start + tile.len()];
            self.config.mode.par_chunks_mut(chunk, cols, |i, line| {
                let global = tile.row_offset + i;
                combine_line(sources, global / rows, global % rows, line, rules, fill);
            });

            if let Some(progress) = &self.config.progress {
                progress.report(tile.row_end(), lines);
            }
        }
        Ok(())
    }
}

/// Borrow every source as `Raster<T>`, checking shape and band count
/// against the first.
fn downcast_sources<'a, T: RasterElement>(sources: &[&'a AnyRaster]) -> Result<Vec<&'a Raster<T>>> {
    let mut typed: Vec<&'a Raster<T>> = Vec::with_capacity(sources.len());
    for (index, source) in sources.iter().enumerate() {
        let raster = T::from_any(source).ok_or_else(|| Error::DataTypeMismatch {
            index,
            expected: T::PIXEL_TYPE.to_string(),
            found: source.pixel_type().to_string(),
        })?;
        if let Some(first) = typed.first() {
            if raster.shape() != first.shape() {
                let (er, ec) = first.shape();
                let (ar, ac) = raster.shape();
                return Err(Error::GridMismatch { index, er, ec, ar, ac });
            }
            if raster.bands() != first.bands() {
                return Err(Error::BandCountMismatch {
                    index,
                    expected: first.bands(),
                    found: raster.bands(),
                });
            }
        }
        typed.push(raster);
    }
    Ok(typed)
}

/// Compute one row of one band
fn combine_line<T: RasterElement, U: RasterElement>(
    sources: &[&Raster<T>],
    band: usize,
    row: usize,
    line: &mut [U],
    rules: &PixelRules<'_>,
    fill: U,
) {
    let views: Vec<ArrayView1<'_, T>> = sources
        .iter()
        .map(|s| s.data().index_axis(Axis(0), band).index_axis_move(Axis(0), row))
        .collect();
    let mut values: Vec<f64> = Vec::with_capacity(views.len());

    for (col, out) in line.iter_mut().enumerate() {
        if let Some(mask) = rules.mask {
            if !mask.get(row, col) {
                *out = fill;
                continue;
            }
        }

        values.clear();
        values.extend(views.iter().map(|v| v[col].as_f64()));

        if let Some(range) = rules.nodata {
            if values.iter().any(|&v| range.contains(v)) {
                *out = fill;
                continue;
            }
        }

        *out = match rules.operator.fold(&values) {
            Some(result) => U::from_f64_clamped(result),
            None => fill,
        };
    }
}

/// Combine `sources` with the default execution configuration.
///
/// See [`AlgebraExecutor::execute`].
pub fn execute(
    sources: &[&AnyRaster],
    operator: Operator,
    roi_mask: Option<&RoiMask>,
    nodata: Option<&NoDataRange>,
    destination: Option<f64>,
) -> Result<AnyRaster> {
    AlgebraExecutor::default().execute(sources, operator, roi_mask, nodata, destination)
}
