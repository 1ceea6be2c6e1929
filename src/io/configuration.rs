//! Runtime defaults and configuration validation

use crate::io::error::{Result, invalid_config};

/// Edge length of one emoji in the default sprite sheet, in pixels
pub const DEFAULT_ICON_SIZE: i64 = 20;

/// Sprite sheet looked up when none is given on the command line
pub const DEFAULT_SPRITE_SHEET: &str = "emoji_sprite.png";

// Appended to the full input file name, so `cat.jpg` becomes `cat.jpg.out.png`
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = ".out.png";

/// Canvas color shown beneath transparent tile pixels
pub const BACKGROUND_COLOR: [u8; 3] = [255, 255, 255];

// Progress bar display settings
/// Threshold for adding a batch-level progress bar
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 1;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Check that an icon size is a usable tile edge length
///
/// # Errors
///
/// Returns a configuration error if the size is zero, negative, or does not
/// fit in an image dimension.
pub fn validate_icon_size(icon_size: i64) -> Result<u32> {
    if icon_size <= 0 {
        return Err(invalid_config(
            "icon_size",
            &icon_size,
            &"must be a positive number of pixels",
        ));
    }

    u32::try_from(icon_size)
        .map_err(|_overflow| invalid_config("icon_size", &icon_size, &"exceeds image dimensions"))
}
