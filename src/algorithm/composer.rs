//! Block matching and mosaic compositing
//!
//! Composition runs in two passes. Planning walks the block grid, fingerprints
//! every block and records the nearest catalog icon. Rendering pastes the
//! chosen icons onto a fresh canvas, using each icon's alpha channel as the
//! paste mask.

use crate::algorithm::selection::nearest_tile;
use crate::analysis::signature::{Signature, signature};
use crate::io::configuration::BACKGROUND_COLOR;
use crate::io::error::{MosaicError, Result, invalid_config};
use crate::spatial::grid::BlockGrid;
use crate::spatial::tiles::{Tile, TileCatalog, crop, validate_parts};
use image::{DynamicImage, Rgb, RgbImage, Rgba};
use ndarray::Array2;

/// Tile assignment for every block of a source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicPlan {
    grid: BlockGrid,
    assignments: Array2<usize>,
}

impl MosaicPlan {
    /// Get the block grid the plan was computed for
    pub const fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    /// Catalog index chosen for each block, indexed by (row, col)
    pub const fn assignments(&self) -> &Array2<usize> {
        &self.assignments
    }

    /// Catalog index chosen for a single block
    pub fn tile_at(&self, row: usize, col: usize) -> Option<usize> {
        self.assignments.get((row, col)).copied()
    }

    /// Count how many blocks use each catalog index
    pub fn tile_usage(&self, tile_count: usize) -> Vec<usize> {
        let mut usage = vec![0; tile_count];
        for &index in &self.assignments {
            if let Some(count) = usage.get_mut(index) {
                *count += 1;
            }
        }
        usage
    }

    /// Number of different icons appearing in the mosaic
    pub fn distinct_tiles(&self) -> usize {
        let mut seen: Vec<usize> = self.assignments.iter().copied().collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

/// Matches source blocks against a tile catalog and composites the result
#[derive(Debug, Clone, Copy)]
pub struct MosaicComposer<'a> {
    tiles: &'a [Tile],
    signatures: &'a [Signature],
    icon_size: u32,
    background: Rgb<u8>,
}

impl<'a> MosaicComposer<'a> {
    /// Create a composer over index-aligned tiles and signatures
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the icon size is zero, the catalog is
    /// empty or misaligned, or a tile is not `icon_size` pixels square.
    pub fn new(icon_size: u32, tiles: &'a [Tile], signatures: &'a [Signature]) -> Result<Self> {
        validate_parts(tiles, signatures, icon_size)?;
        Ok(Self {
            tiles,
            signatures,
            icon_size,
            background: Rgb(BACKGROUND_COLOR),
        })
    }

    /// Create a composer over an extracted catalog
    pub fn from_catalog(catalog: &'a TileCatalog) -> Self {
        Self {
            tiles: catalog.tiles(),
            signatures: catalog.signatures(),
            icon_size: catalog.icon_size(),
            background: Rgb(BACKGROUND_COLOR),
        }
    }

    /// Replace the canvas color shown beneath transparent icon pixels
    #[must_use]
    pub const fn with_background(mut self, background: Rgb<u8>) -> Self {
        self.background = background;
        self
    }

    /// Get the icon edge length in pixels
    pub const fn icon_size(&self) -> u32 {
        self.icon_size
    }

    /// Choose the nearest icon for every block of the source image
    ///
    /// # Errors
    ///
    /// Returns an error if the source is smaller than one icon or the catalog
    /// holds no icons.
    pub fn plan(&self, source: &DynamicImage) -> Result<MosaicPlan> {
        self.plan_with_progress(source, |_, _| {})
    }

    /// Choose the nearest icon for every block, reporting each finished row
    ///
    /// `on_row` receives the number of completed rows and the total row count.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is smaller than one icon or the catalog
    /// holds no icons.
    pub fn plan_with_progress<F>(&self, source: &DynamicImage, mut on_row: F) -> Result<MosaicPlan>
    where
        F: FnMut(u32, u32),
    {
        // Alpha weighting needs four channels whatever the source layout
        let source = source.to_rgba8();
        let grid = BlockGrid::new(source.width(), source.height(), self.icon_size)?;
        let mut assignments = Array2::zeros((grid.rows() as usize, grid.cols() as usize));

        for (row, col) in grid.cells() {
            let block = crop(&source, row, col, self.icon_size);
            let block_signature = signature(&block);
            let index = nearest_tile(self.signatures, &block_signature)
                .ok_or_else(|| invalid_config("tiles", &0, &"catalog holds no icons"))?;
            if let Some(slot) = assignments.get_mut((row as usize, col as usize)) {
                *slot = index;
            }
            if col + 1 == grid.cols() {
                on_row(row + 1, grid.rows());
            }
        }

        let plan = MosaicPlan { grid, assignments };
        log::debug!(
            "Matched {} blocks ({}x{}) using {} distinct icons",
            grid.cell_count(),
            grid.cols(),
            grid.rows(),
            plan.distinct_tiles()
        );
        Ok(plan)
    }

    /// Paste the planned icons onto a background-filled canvas
    ///
    /// # Errors
    ///
    /// Returns an error if the plan was made for a different icon size or
    /// refers to an icon outside the catalog.
    pub fn render(&self, plan: &MosaicPlan) -> Result<RgbImage> {
        let grid = plan.grid();
        if grid.icon_size() != self.icon_size {
            return Err(invalid_config(
                "plan",
                &grid.icon_size(),
                &format!("plan was made for a different icon size than {}", self.icon_size),
            ));
        }

        let mut canvas =
            RgbImage::from_pixel(grid.usable_width(), grid.usable_height(), self.background);

        for ((row, col), &index) in plan.assignments().indexed_iter() {
            let tile = self
                .tiles
                .get(index)
                .ok_or(MosaicError::InvalidTileIndex {
                    index,
                    max_tiles: self.tiles.len(),
                })?;
            let (x, y) = grid.pixel_offset(row as u32, col as u32);
            paste_masked(&mut canvas, tile, x, y);
        }

        Ok(canvas)
    }

    /// Build the mosaic for a source image
    ///
    /// # Errors
    ///
    /// Returns an error if the source is smaller than one icon.
    pub fn compose(&self, source: &DynamicImage) -> Result<RgbImage> {
        self.compose_with_progress(source, |_, _| {})
    }

    /// Build the mosaic for a source image, reporting each matched row
    ///
    /// # Errors
    ///
    /// Returns an error if the source is smaller than one icon.
    pub fn compose_with_progress<F>(&self, source: &DynamicImage, on_row: F) -> Result<RgbImage>
    where
        F: FnMut(u32, u32),
    {
        let plan = self.plan_with_progress(source, on_row)?;
        self.render(&plan)
    }
}

/// Build the mosaic of `source` from index-aligned tiles and signatures
///
/// The canvas is `source` truncated to whole icons, filled white, with the
/// nearest icon pasted over each block.
///
/// # Errors
///
/// Returns an error if:
/// - The icon size is zero or the catalog is empty or misaligned (configuration)
/// - The source is smaller than one icon in either dimension (invalid input)
pub fn compose(
    source: &DynamicImage,
    icon_size: u32,
    tiles: &[Tile],
    signatures: &[Signature],
) -> Result<RgbImage> {
    MosaicComposer::new(icon_size, tiles, signatures)?.compose(source)
}

/// Paste `tile` onto `canvas` at (x, y) using the tile's alpha as mask
///
/// Fully transparent pixels leave the canvas untouched, opaque pixels
/// overwrite it, and partially transparent pixels blend linearly. Pixels
/// falling outside the canvas are skipped.
pub fn paste_masked(canvas: &mut RgbImage, tile: &Tile, x: u32, y: u32) {
    for (tile_x, tile_y, pixel) in tile.enumerate_pixels() {
        let Rgba([red, green, blue, alpha]) = *pixel;
        if alpha == 0 {
            continue;
        }
        if let Some(target) = canvas.get_pixel_mut_checked(x + tile_x, y + tile_y) {
            let Rgb([under_red, under_green, under_blue]) = *target;
            *target = Rgb([
                blend_channel(red, under_red, alpha),
                blend_channel(green, under_green, alpha),
                blend_channel(blue, under_blue, alpha),
            ]);
        }
    }
}

/// Linear blend of one channel, rounded to nearest
pub const fn blend_channel(over: u8, under: u8, alpha: u8) -> u8 {
    let alpha = alpha as u32;
    let blended = (over as u32 * alpha + under as u32 * (255 - alpha) + 127) / 255;
    blended as u8
}
