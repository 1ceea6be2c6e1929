//! Emoji mosaics built by color histogram matching
//!
//! A sprite sheet is cut into square icons, each fingerprinted with an
//! alpha-weighted 6x6x6 color histogram. A source image is cut into blocks of
//! the same size and every block is replaced by the icon whose histogram is
//! nearest in Euclidean distance.

#![forbid(unsafe_code)]

/// Block matching and mosaic compositing
pub mod algorithm;
/// Color signatures of tiles and blocks
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Block grids and sprite sheet tile extraction
pub mod spatial;

pub use algorithm::composer::{MosaicComposer, MosaicPlan, compose};
pub use io::error::{MosaicError, Result};
