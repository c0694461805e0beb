//! WCAG relative luminance and contrast ratio.
//!
//! Used to check that theme text stays readable over the background and
//! to rank palette entries by brightness:
//!
//! - Normal text: contrast ratio >= [`MIN_CONTRAST_RATIO`] (WCAG AA, 4.5:1)
//! - Ratios range from 1:1 (identical colors) to 21:1 (black on white)
//!
//! Luminance uses the WCAG 2.0 linearization threshold of `0.03928`, which
//! is what the published theme was checked against.

use crate::color::Rgb;
use crate::error::ColorError;

/// WCAG AA minimum contrast for normal-size text.
pub const MIN_CONTRAST_RATIO: f64 = 4.5;

/// Remove the sRGB gamma from one channel in 0.0–1.0.
#[inline]
fn linearize(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Compute the relative luminance of a color per WCAG.
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    let (r, g, b) = color.to_unit();
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Compute the WCAG contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0]. The formula is:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// The result is the same regardless of argument order.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// [`contrast_ratio`] over hex text.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColor`] if either input is not a valid
/// hex color.
pub fn contrast_ratio_hex(a: &str, b: &str) -> Result<f64, ColorError> {
    Ok(contrast_ratio(Rgb::parse(a)?, Rgb::parse(b)?))
}

/// Whether `fg` over `bg` reaches [`MIN_CONTRAST_RATIO`].
#[must_use]
pub fn meets_min_contrast(fg: Rgb, bg: Rgb) -> bool {
    contrast_ratio(fg, bg) >= MIN_CONTRAST_RATIO
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
