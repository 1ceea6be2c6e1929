//! Block grid laid over a source image
//!
//! The usable area of the source is truncated to whole icons in each
//! dimension. Trailing partial rows and columns are dropped, never padded.

use crate::io::error::{Result, invalid_config, invalid_input};

/// Largest block-aligned (width, height) not exceeding the given dimensions
pub const fn usable_dimensions(width: u32, height: u32, icon_size: u32) -> (u32, u32) {
    if icon_size == 0 {
        return (0, 0);
    }
    (width - width % icon_size, height - height % icon_size)
}

/// Grid of equally sized, non-overlapping blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    rows: u32,
    cols: u32,
    icon_size: u32,
}

impl BlockGrid {
    /// Lay a grid of `icon_size` blocks over an image of the given dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The icon size is zero (configuration error)
    /// - The image is smaller than one block in either dimension (invalid input)
    pub fn new(width: u32, height: u32, icon_size: u32) -> Result<Self> {
        if icon_size == 0 {
            return Err(invalid_config(
                "icon_size",
                &icon_size,
                &"must be a positive number of pixels",
            ));
        }

        let (usable_width, usable_height) = usable_dimensions(width, height, icon_size);
        if usable_width == 0 || usable_height == 0 {
            return Err(invalid_input(&format!(
                "source image {width}x{height} is smaller than one {icon_size}x{icon_size} block"
            )));
        }

        Ok(Self {
            rows: usable_height / icon_size,
            cols: usable_width / icon_size,
            icon_size,
        })
    }

    /// Get the number of block rows
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Get the number of block columns
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Get the block edge length in pixels
    pub const fn icon_size(&self) -> u32 {
        self.icon_size
    }

    /// Get the total number of blocks
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Width of the block-aligned area in pixels
    pub const fn usable_width(&self) -> u32 {
        self.cols * self.icon_size
    }

    /// Height of the block-aligned area in pixels
    pub const fn usable_height(&self) -> u32 {
        self.rows * self.icon_size
    }

    /// Pixel (x, y) of the top-left corner of a block
    pub const fn pixel_offset(&self, row: u32, col: u32) -> (u32, u32) {
        (col * self.icon_size, row * self.icon_size)
    }

    /// Iterate block coordinates as (row, col), rows outer and columns inner
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}
