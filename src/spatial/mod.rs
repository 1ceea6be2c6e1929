//! Spatial partitioning of sprite sheets and source images
//!
//! This module contains spatial-related functionality including:
//! - Block grid truncation over source images
//! - Tile cropping and sprite sheet catalog extraction

/// Block grid layout and pixel offsets
pub mod grid;
/// Tile cropping and catalog extraction
pub mod tiles;

pub use grid::BlockGrid;
pub use tiles::{Tile, TileCatalog};
