//! # kw-color — Color science for the Kiroween theme
//!
//! Small, pure numeric routines over 8-bit sRGB colors. Nothing in this
//! crate touches the file system; callers hand in text and get values or
//! a [`ColorError`] back.
//!
//! # Architecture
//!
//! ```text
//! "#fff" / "FFB200" / "#abcdef"
//!     │
//!     ▼
//! color.rs:    normalize → Rgb::parse (InvalidColor on bad digits)
//!     │
//!     ├──▶ contrast.rs: WCAG relative luminance + contrast ratio
//!     │
//!     └──▶ palette.rs:  membership, nearest match, darkest entry
//!
//! opacity.rs:  [0.02, 0.08] bounds — clamp or check
//! extract.rs:  pull `#rgb` / `#rrggbb` tokens out of markup
//! ```
//!
//! The built-in palette ([`Palette::kiroween`]) is a process-wide static,
//! built once on first use and never mutated.

// Single-char channel names (r, g, b) are standard in color science.
#![allow(clippy::many_single_char_names)]

pub mod color;
pub mod contrast;
pub mod error;
pub mod extract;
pub mod opacity;
pub mod palette;

pub use color::{Rgb, normalize};
pub use contrast::{MIN_CONTRAST_RATIO, contrast_ratio, contrast_ratio_hex, relative_luminance};
pub use error::ColorError;
pub use extract::extract_color_tokens;
pub use opacity::{OPACITY_MAX, OPACITY_MIN, clamp_opacity, is_opacity_valid, parse_opacity};
pub use palette::{NearestMatch, Palette, PaletteEntry};
