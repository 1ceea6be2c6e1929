//! Input/output operations, configuration and error handling

/// Command-line parsing and batch file processing
pub mod cli;
/// Defaults and configuration validation
pub mod configuration;
/// Error types shared by the whole crate
pub mod error;
/// Image decoding, encoding and output naming
pub mod image;
/// Terminal progress bars
pub mod progress;
