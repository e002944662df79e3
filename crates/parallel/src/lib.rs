//! # rasalg Parallel
//!
//! Parallel processing strategies for raster algebra.
//!
//! This crate provides:
//! - Row-parallel processing using Rayon (feature `parallel`, on by default)
//! - Tiled partitioning of large rasters
//! - A cooperative cancellation flag and a progress callback, both
//!   serviced between tiles

pub mod cancel;
pub mod progress;
pub mod strategy;
pub mod tiled;

pub use cancel::CancelFlag;
pub use progress::Progress;
pub use strategy::{ParallelStrategy, ProcessingMode};
pub use tiled::{Tile, TileIterator};
