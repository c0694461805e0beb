//! # kw-pattern — Deterministic background tile compositor
//!
//! Turns a handful of 24×24 line icons into one seamless, faint background
//! tile. Every placement decision comes from a seeded linear-congruential
//! generator, so the same seed, assets, and palette always produce the
//! same SVG, byte for byte. The tile is committed as a static asset and
//! never recomputed at display time, which is why that matters.
//!
//! # Pipeline
//!
//! ```text
//! TileSpec { seed, grid_size, tile_size } + AssetLibrary + Palette
//!     │
//!     ▼
//! lcg.rs:        advance seed per cell, derive r ∈ [0, 1)
//!     │
//!     ▼
//! placement.rs:  r → asset, color, jitter, rotation, scale
//!     │
//!     ▼
//! markup.rs:     strip <svg> wrapper, recolor primitives
//!     │
//!     ▼
//! compositor.rs: place groups on the grid, serialize the tile
//! ```
//!
//! No I/O happens here. Assets arrive as markup strings and the tile
//! leaves as a string.

// Grid indices and seed fractions cross between integers and floats.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod compositor;
pub mod error;
pub mod lcg;
pub mod markup;
pub mod placement;

pub use compositor::{
    Asset, AssetLibrary, ELEMENT_OPACITY, MAX_GRID_SIZE, PlacedElement, TileDocument, TileSpec, generate,
};
pub use error::PatternError;
