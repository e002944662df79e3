//! Row tiling for large rasters
//!
//! Pixelwise operations need no overlap between tiles, so tiles here are a
//! plain partition of the rows, each spanning the full width.

/// A full-width band of consecutive rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// First row covered by the tile
    pub row_offset: usize,
    /// Number of rows in this tile
    pub rows: usize,
    /// Number of columns in this tile
    pub cols: usize,
}

impl Tile {
    /// Number of cells in the tile
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether the tile holds no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One past the last row covered by the tile
    pub fn row_end(&self) -> usize {
        self.row_offset + self.rows
    }
}

/// Iterator over row bands covering a raster, top to bottom
pub struct TileIterator {
    total_rows: usize,
    total_cols: usize,
    band_rows: usize,
    current_row: usize,
}

impl TileIterator {
    /// Full-width bands of at most `band_rows` rows. Zero is treated as 1.
    pub fn row_bands(total_rows: usize, total_cols: usize, band_rows: usize) -> Self {
        Self {
            total_rows,
            total_cols,
            band_rows: band_rows.max(1),
            current_row: 0,
        }
    }
}

impl Iterator for TileIterator {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.total_rows || self.total_cols == 0 {
            return None;
        }

        let rows = self.band_rows.min(self.total_rows - self.current_row);
        let tile = Tile {
            row_offset: self.current_row,
            rows,
            cols: self.total_cols,
        };
        self.current_row += rows;
        Some(tile)
    }
}
