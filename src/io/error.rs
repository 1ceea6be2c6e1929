//! Error types for catalog extraction, mosaic composition and file handling

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to decode a source image or sprite sheet
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Configuration rejected before any pixels were processed
    ///
    /// Raised for a non-positive icon size and for catalogs whose tiles and
    /// signatures do not line up.
    Config {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Source image cannot be partitioned into at least one block
    InvalidInput {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// Mosaic plan refers to a tile outside the catalog
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles in the catalog
        max_tiles: usize,
    },

    /// Failed to encode the composed mosaic to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::Config {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid configuration '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidInput { reason } => {
                write!(f, "Invalid input: {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(
                    f,
                    "Tile index {index} is out of bounds (catalog holds {max_tiles} tiles)"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<memory>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl MosaicError {
    /// Whether the error was raised while validating configuration
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Whether the error was raised because the source image is unusable
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Whether the error was raised while decoding an image
    pub const fn is_image_load(&self) -> bool {
        matches!(self, Self::ImageLoad { .. })
    }
}

/// Create a configuration error
pub fn invalid_config(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::Config {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid input error
pub fn invalid_input(reason: &impl ToString) -> MosaicError {
    MosaicError::InvalidInput {
        reason: reason.to_string(),
    }
}
