//! Alpha-weighted color histograms used as tile and block fingerprints
//!
//! Every pixel votes for the (R, G, B) cell it falls into, with its alpha
//! channel as the vote weight. Mostly transparent sprite pixels therefore
//! barely register, and matching is driven by the solid part of an icon.

use image::{Rgba, RgbaImage};
use ndarray::Array3;

/// Number of uniform bins per color channel
pub const HISTOGRAM_BINS: usize = 6;

// Upper bound of the binned channel range, exclusive
const CHANNEL_RANGE: usize = 256;

/// Weighted 3-D color histogram of a tile or block
///
/// The shape is always `HISTOGRAM_BINS` on every axis, whatever the size of
/// the image it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    histogram: Array3<f64>,
}

impl Default for Signature {
    fn default() -> Self {
        Self::empty()
    }
}

impl Signature {
    /// Signature with no weight in any cell
    pub fn empty() -> Self {
        Self {
            histogram: Array3::zeros((HISTOGRAM_BINS, HISTOGRAM_BINS, HISTOGRAM_BINS)),
        }
    }

    /// Get the weighted histogram indexed by (red, green, blue) bin
    pub const fn histogram(&self) -> &Array3<f64> {
        &self.histogram
    }

    /// Sum of all cell weights, equal to the summed alpha of the source pixels
    pub fn total_weight(&self) -> f64 {
        self.histogram.sum()
    }

    /// Weight accumulated in a single (red, green, blue) bin
    pub fn weight_at(&self, bin: (usize, usize, usize)) -> Option<f64> {
        self.histogram.get(bin).copied()
    }

    /// Number of cells holding any weight
    pub fn occupied_bins(&self) -> usize {
        self.histogram.iter().filter(|&&weight| weight > 0.0).count()
    }

    fn accumulate(&mut self, pixel: Rgba<u8>) {
        let Rgba([red, green, blue, alpha]) = pixel;
        let bin = (bin_index(red), bin_index(green), bin_index(blue));
        if let Some(cell) = self.histogram.get_mut(bin) {
            *cell += f64::from(alpha);
        }
    }
}

/// Map a channel value onto its histogram bin
pub const fn bin_index(channel: u8) -> usize {
    channel as usize * HISTOGRAM_BINS / CHANNEL_RANGE
}

/// Compute the alpha-weighted color histogram of an image region
pub fn signature(tile: &RgbaImage) -> Signature {
    let mut signature = Signature::empty();
    for pixel in tile.pixels() {
        signature.accumulate(*pixel);
    }
    signature
}
