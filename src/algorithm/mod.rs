/// Block matching and alpha-masked compositing
pub mod composer;
/// Signature distance and nearest-tile search
pub mod selection;
