//! Tile composition — grid walk, element placement, SVG serialization.

use std::fmt;

use kw_color::{Palette, Rgb};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{PatternError, Result};
use crate::lcg::Lcg;
use crate::markup::{recolor, strip_wrapper};
use crate::placement::{Cell, place};

/// Opacity of every element group inside the tile.
pub const ELEMENT_OPACITY: f64 = 0.15;

/// Largest accepted `grid_size`. A tile holds `grid_size²` elements, and
/// past this the pattern stops reading as a texture anyway.
pub const MAX_GRID_SIZE: u32 = 256;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Shape and seed of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TileSpec {
    pub seed: u32,
    /// Cells per side; the tile holds `grid_size²` elements.
    pub grid_size: u32,
    /// Side length of the square canvas, in logical units.
    pub tile_size: u32,
}

impl Default for TileSpec {
    fn default() -> Self {
        Self {
            seed: 12345,
            grid_size: 4,
            tile_size: 400,
        }
    }
}

impl TileSpec {
    fn cell_size(self) -> f64 {
        f64::from(self.tile_size) / f64::from(self.grid_size)
    }
}

/// One icon's name and raw markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub markup: String,
}

/// Icons available to the compositor, in a fixed order.
///
/// Order is part of the determinism contract: the same icons in a
/// different order produce a different tile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetLibrary {
    assets: Vec<Asset>,
}

impl AssetLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, markup: impl Into<String>) {
        self.assets.push(Asset {
            name: name.into(),
            markup: markup.into(),
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Asset> {
        self.assets.iter()
    }
}

impl<N: Into<String>, M: Into<String>> FromIterator<(N, M)> for AssetLibrary {
    fn from_iter<I: IntoIterator<Item = (N, M)>>(iter: I) -> Self {
        let mut lib = Self::new();
        for (name, markup) in iter {
            lib.push(name, markup);
        }
        lib
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One icon placed on the tile.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedElement {
    pub row: u32,
    pub col: u32,
    pub asset: String,
    pub color: Rgb,
    pub x: f64,
    pub y: f64,
    pub rotation: u32,
    pub scale: f64,
    /// Recolored icon body, without its `<svg>` wrapper.
    pub content: String,
}

impl PlacedElement {
    /// `translate(x, y) rotate(θ) scale(s)`.
    #[must_use]
    pub fn transform(&self) -> String {
        format!(
            "translate({}, {}) rotate({}) scale({})",
            self.x, self.y, self.rotation, self.scale
        )
    }
}

/// A generated tile, ready to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct TileDocument {
    pub tile_size: u32,
    /// Elements in row-major generation order.
    pub elements: Vec<PlacedElement>,
}

impl TileDocument {
    /// Serialize the tile as a standalone SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TileDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.tile_size;
        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(f, r#"<svg xmlns="http://www.w3.org/2000/svg""#)?;
        writeln!(f, r#"     viewBox="0 0 {size} {size}""#)?;
        writeln!(f, r#"     width="{size}""#)?;
        writeln!(f, r#"     height="{size}">"#)?;
        writeln!(f, "  <defs>")?;
        writeln!(f, "    <style>")?;
        writeln!(f, "      * {{ shape-rendering: geometricPrecision; }}")?;
        writeln!(f, "    </style>")?;
        writeln!(f, "  </defs>")?;
        writeln!(f)?;
        writeln!(f, "  <!-- Background (transparent) -->")?;
        writeln!(f, r#"  <rect width="{size}" height="{size}" fill="none"/>"#)?;
        writeln!(f)?;
        writeln!(f, "  <!-- Pattern elements -->")?;
        for el in &self.elements {
            writeln!(
                f,
                "  <g transform=\"{}\" opacity=\"{ELEMENT_OPACITY}\">\n    {}\n  </g>",
                el.transform(),
                el.content
            )?;
        }
        write!(f, "</svg>")
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Compose a tile from `assets` colored with `palette`.
///
/// Cells are visited row by row. Each advances the seed once and derives
/// its asset, color (any palette entry except the darkest), jitter,
/// rotation, and scale from that single draw.
///
/// # Errors
///
/// - [`PatternError::InvalidGrid`] if the grid or tile size is zero, or the
///   grid is larger than [`MAX_GRID_SIZE`]
/// - [`PatternError::EmptyLibrary`] if there are no assets
/// - [`PatternError::MissingAsset`] if an asset's markup is blank
/// - [`PatternError::MalformedAsset`] if an asset has no `<svg>` wrapper
/// - [`PatternError::NoUsableColors`] if the palette has nothing but its
///   darkest entry
///
/// Every asset is checked before any element is placed, whether or not
/// the seed would ever pick it.
pub fn generate(spec: &TileSpec, assets: &AssetLibrary, palette: &Palette) -> Result<TileDocument> {
    if spec.grid_size == 0 || spec.grid_size > MAX_GRID_SIZE || spec.tile_size == 0 {
        return Err(PatternError::InvalidGrid {
            grid_size: spec.grid_size,
            tile_size: spec.tile_size,
        });
    }
    if assets.is_empty() {
        return Err(PatternError::EmptyLibrary);
    }

    let bodies = assets
        .iter()
        .map(|asset| {
            if asset.markup.trim().is_empty() {
                return Err(PatternError::MissingAsset {
                    name: asset.name.clone(),
                });
            }
            strip_wrapper(&asset.markup).ok_or_else(|| PatternError::MalformedAsset {
                name: asset.name.clone(),
            })
        })
        .collect::<Result<Vec<&str>>>()?;

    let colors = match palette.darkest() {
        Some(darkest) => palette.colors_except(&darkest.name),
        None => Vec::new(),
    };
    if colors.is_empty() {
        return Err(PatternError::NoUsableColors);
    }

    let cell_size = spec.cell_size();
    let mut lcg = Lcg::new(spec.seed);
    let side = spec.grid_size as usize;
    let mut elements = Vec::with_capacity(side * side);

    for row in 0..spec.grid_size {
        for col in 0..spec.grid_size {
            let r = lcg.next_fraction();
            let cell = Cell {
                row,
                col,
                size: cell_size,
            };
            let p = place(r, cell, bodies.len(), colors.len());
            let asset = &assets.assets[p.asset_index];
            let color = colors[p.color_index];

            debug!(
                row,
                col,
                asset = %asset.name,
                color = %color,
                rotation = p.rotation,
                "placed element"
            );

            elements.push(PlacedElement {
                row,
                col,
                asset: asset.name.clone(),
                color,
                x: p.x,
                y: p.y,
                rotation: p.rotation,
                scale: p.scale,
                content: recolor(bodies[p.asset_index], &color.to_hex()),
            });
        }
    }

    info!(
        seed = spec.seed,
        elements = elements.len(),
        size = spec.tile_size,
        "generated background tile"
    );

    Ok(TileDocument {
        tile_size: spec.tile_size,
        elements,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
