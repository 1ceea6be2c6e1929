//! Tile cropping and sprite sheet catalog extraction
//!
//! A sprite sheet is cut into a grid of square icons. Each icon is kept
//! alongside its signature so the composer can scan both sequences in
//! lock-step.

use crate::analysis::signature::{Signature, signature};
use crate::io::error::{Result, invalid_config};
use image::RgbaImage;
use image::imageops;

/// A square icon cut from a sprite sheet
pub type Tile = RgbaImage;

/// Crop the square cell at grid coordinates (`row`, `col`)
///
/// The cell covers pixels `[col * size, (col + 1) * size)` horizontally and
/// `[row * size, (row + 1) * size)` vertically. Callers only ask for cells
/// inside the image; out-of-range requests are clipped by the image crate.
pub fn crop(image: &RgbaImage, row: u32, col: u32, size: u32) -> Tile {
    imageops::crop_imm(image, col * size, row * size, size, size).to_image()
}

/// Ordered set of sprite sheet tiles with their signatures
///
/// Tiles are stored in column-major order (columns outer, rows inner) and
/// `signatures()[i]` always describes `tiles()[i]`.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    tiles: Vec<Tile>,
    signatures: Vec<Signature>,
    icon_size: u32,
}

impl TileCatalog {
    /// Cut a sprite sheet into icons and fingerprint each one
    ///
    /// Trailing partial rows and columns of the sheet are ignored.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - The icon size is zero
    /// - The sheet is smaller than one icon in either dimension
    pub fn extract(sprite_sheet: &RgbaImage, icon_size: u32) -> Result<Self> {
        if icon_size == 0 {
            return Err(invalid_config(
                "icon_size",
                &icon_size,
                &"must be a positive number of pixels",
            ));
        }

        let (width, height) = sprite_sheet.dimensions();
        let cols = width / icon_size;
        let rows = height / icon_size;

        if cols == 0 || rows == 0 {
            return Err(invalid_config(
                "sprite_sheet",
                &format!("{width}x{height}"),
                &format!("holds no complete {icon_size}x{icon_size} icon"),
            ));
        }

        let capacity = (cols * rows) as usize;
        let mut tiles = Vec::with_capacity(capacity);
        let mut signatures = Vec::with_capacity(capacity);

        for col in 0..cols {
            for row in 0..rows {
                let tile = crop(sprite_sheet, row, col, icon_size);
                signatures.push(signature(&tile));
                tiles.push(tile);
            }
        }

        log::debug!(
            "Extracted {} icons ({cols} columns x {rows} rows) from {width}x{height} sprite sheet",
            tiles.len()
        );

        Ok(Self {
            tiles,
            signatures,
            icon_size,
        })
    }

    /// Assemble a catalog from separately computed tiles and signatures
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - The icon size is zero
    /// - The catalog is empty
    /// - The two sequences have different lengths
    /// - A tile is not `icon_size` pixels square
    pub fn from_parts(tiles: Vec<Tile>, signatures: Vec<Signature>, icon_size: u32) -> Result<Self> {
        validate_parts(&tiles, &signatures, icon_size)?;
        Ok(Self {
            tiles,
            signatures,
            icon_size,
        })
    }

    /// Get the icons in catalog order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get the icon signatures, index-aligned with `tiles()`
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Get the icon edge length in pixels
    pub const fn icon_size(&self) -> u32 {
        self.icon_size
    }

    /// Get the number of icons
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check whether the catalog holds no icons
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Get an icon together with its signature
    pub fn get(&self, index: usize) -> Option<(&Tile, &Signature)> {
        self.tiles.get(index).zip(self.signatures.get(index))
    }

    /// Consume the catalog and return its tiles and signatures
    pub fn into_parts(self) -> (Vec<Tile>, Vec<Signature>) {
        (self.tiles, self.signatures)
    }
}

/// Extract the (tiles, signatures) pair from a sprite sheet
///
/// # Errors
///
/// Returns a configuration error under the same conditions as
/// [`TileCatalog::extract`].
pub fn catalog(sprite_sheet: &RgbaImage, icon_size: u32) -> Result<(Vec<Tile>, Vec<Signature>)> {
    TileCatalog::extract(sprite_sheet, icon_size).map(TileCatalog::into_parts)
}

/// Check that tiles and signatures form a usable catalog
///
/// # Errors
///
/// Returns a configuration error if the icon size is zero, the catalog is
/// empty, the sequences differ in length, or a tile has the wrong dimensions.
pub fn validate_parts(tiles: &[Tile], signatures: &[Signature], icon_size: u32) -> Result<()> {
    if icon_size == 0 {
        return Err(invalid_config(
            "icon_size",
            &icon_size,
            &"must be a positive number of pixels",
        ));
    }

    if tiles.len() != signatures.len() {
        return Err(invalid_config(
            "signatures",
            &signatures.len(),
            &format!("expected one signature per tile ({} tiles)", tiles.len()),
        ));
    }

    if tiles.is_empty() {
        return Err(invalid_config("tiles", &0, &"catalog holds no icons"));
    }

    if let Some((index, tile)) = tiles
        .iter()
        .enumerate()
        .find(|(_, tile)| tile.dimensions() != (icon_size, icon_size))
    {
        return Err(invalid_config(
            "tiles",
            &format!("tile {index} is {}x{}", tile.width(), tile.height()),
            &format!("expected {icon_size}x{icon_size} icons"),
        ));
    }

    Ok(())
}
