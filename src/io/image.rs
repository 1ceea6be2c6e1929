//! Image decoding, PNG export and output naming

use crate::io::configuration::OUTPUT_SUFFIX;
use crate::io::error::{MosaicError, Result};
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use std::path::{Path, PathBuf};

/// Decode an image file in any format supported by the image crate
///
/// The format is detected from the file contents, so the extension does not
/// have to match.
///
/// # Errors
///
/// Returns an image load error if the file cannot be read or decoded.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let load_error = |source| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };

    ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| load_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(load_error)
}

/// Decode an image held in memory
///
/// # Errors
///
/// Returns an image load error if the bytes are not a decodable image.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Check whether a path names a raster format the decoder understands
pub fn is_supported_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled())
}

/// Write the mosaic canvas to disk as PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_canvas(canvas: &RgbImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas
        .save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

/// Location of the mosaic produced for `input_path`
///
/// The full input file name is kept and [`OUTPUT_SUFFIX`] appended. Output goes
/// to `destination` when given, next to the input otherwise.
pub fn output_path(input_path: &Path, destination: Option<&Path>) -> PathBuf {
    let file_name = input_path.file_name().unwrap_or_default();
    let output_name = format!("{}{OUTPUT_SUFFIX}", file_name.to_string_lossy());

    match destination.or_else(|| input_path.parent()) {
        Some(directory) => directory.join(output_name),
        None => PathBuf::from(output_name),
    }
}

/// Check whether a path looks like a previously written mosaic
pub fn is_mosaic_output(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(OUTPUT_SUFFIX))
}
