//! Color analysis of tiles and source blocks

/// Alpha-weighted color histogram signatures
pub mod signature;
