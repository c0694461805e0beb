use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatternError>;

/// Why a tile could not be generated.
///
/// Every variant aborts the whole run. The compositor never hands back a
/// partially composed tile or swaps in a placeholder asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("asset library is empty")]
    EmptyLibrary,

    #[error("asset has no content: {name}")]
    MissingAsset { name: String },

    #[error("asset is not an <svg> document: {name}")]
    MalformedAsset { name: String },

    #[error("palette has no colors besides its darkest entry")]
    NoUsableColors,

    #[error(
        "grid size must be 1..={} and tile size non-zero (grid={grid_size}, tile={tile_size})",
        crate::compositor::MAX_GRID_SIZE
    )]
    InvalidGrid { grid_size: u32, tile_size: u32 },
}
