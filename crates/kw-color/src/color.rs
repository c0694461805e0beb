// SPDX-License-Identifier: MIT
//
// kw-color hex colors — 8-bit sRGB triples and their text form.
//
// Everything the theme ships is written as `#RRGGBB`, so the canonical
// representation here is the plain byte triple rather than a perceptual
// space. Text is accepted case-insensitively, with or without the `#`,
// and in 3-digit shorthand; it always comes back out as uppercase
// 6-digit hex.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

// ─── Normalization ───────────────────────────────────────────────────────────

/// Normalize hex color text to `#RRGGBB` form.
///
/// Strips one optional leading `#`, upper-cases, and doubles each digit of
/// a 3-character shorthand. The digits themselves are **not** validated —
/// `normalize("#xyz")` is `"#XXYYZZ"`. Use [`Rgb::parse`] when the text has
/// to be a real color.
///
/// ```
/// use kw_color::normalize;
///
/// assert_eq!(normalize("#fff"), "#FFFFFF");
/// assert_eq!(normalize("eb5b00"), "#EB5B00");
/// ```
#[must_use]
pub fn normalize(hex: &str) -> String {
    let digits = hex.strip_prefix('#').unwrap_or(hex).to_uppercase();

    let mut out = String::with_capacity(7);
    out.push('#');
    if digits.chars().count() == 3 {
        for ch in digits.chars() {
            out.push(ch);
            out.push(ch);
        }
    } else {
        out.push_str(&digits);
    }
    out
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An opaque sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse hex color text.
    ///
    /// The text is [normalized](normalize) first, so `#abc`, `ABC`, and
    /// `#AABBCC` all parse to the same color.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColor`] (carrying the original input)
    /// unless the normalized text is exactly six hex digits.
    pub fn parse(hex: &str) -> Result<Self, ColorError> {
        let normalized = normalize(hex);
        parse_digits(&normalized[1..]).ok_or_else(|| ColorError::InvalidColor(hex.to_string()))
    }

    /// Canonical `#RRGGBB` text.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels scaled into 0.0–1.0.
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Euclidean distance in RGB space: `sqrt(Δr² + Δg² + Δb²)`.
    ///
    /// Not perceptual. Palette matching only needs a stable ordering.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        db.mul_add(db, dr.mul_add(dr, dg * dg)).sqrt()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_digits(s: &str) -> Option<Rgb> {
    let bytes = s.as_bytes();
    if bytes.len() != 6 {
        return None;
    }
    let r = parse_hex_byte(&bytes[0..2])?;
    let g = parse_hex_byte(&bytes[2..4])?;
    let b = parse_hex_byte(&bytes[4..6])?;
    Some(Rgb::new(r, g, b))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── normalize ───────────────────────────────────────────────────

    #[test]
    fn normalize_expands_shorthand() {
        assert_eq!(normalize("#fff"), "#FFFFFF");
        assert_eq!(normalize("#a1b"), "#AA11BB");
    }

    #[test]
    fn normalize_adds_hash() {
        assert_eq!(normalize("ffb200"), "#FFB200");
    }

    #[test]
    fn normalize_keeps_six_digits() {
        assert_eq!(normalize("#Eb5B00"), "#EB5B00");
    }

    #[test]
    fn normalize_does_not_validate() {
        assert_eq!(normalize("#xyz"), "#XXYYZZ");
        assert_eq!(normalize("#12345"), "#12345");
    }

    // ── parse ───────────────────────────────────────────────────────

    #[test]
    fn parse_white_and_black() {
        assert_eq!(Rgb::parse("#FFFFFF"), Ok(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::parse("#000000"), Ok(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn parse_shorthand_and_bare() {
        assert_eq!(Rgb::parse("#fff"), Ok(Rgb::WHITE));
        assert_eq!(Rgb::parse("d91656"), Ok(Rgb::new(0xD9, 0x16, 0x56)));
    }

    #[test]
    fn parse_rejects_bad_digits() {
        assert_eq!(
            Rgb::parse("#GG0000"),
            Err(ColorError::InvalidColor("#GG0000".to_string()))
        );
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(Rgb::parse("#12345").is_err());
        assert!(Rgb::parse("#1234567").is_err());
        assert!(Rgb::parse("").is_err());
        assert!(Rgb::parse("#").is_err());
    }

    #[test]
    fn parse_rejects_non_ascii_without_panicking() {
        assert!(Rgb::parse("#ééé").is_err());
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let c: Rgb = "#3D0842".parse().unwrap();
        assert_eq!(c, Rgb::new(0x3D, 0x08, 0x42));
    }

    // ── text form ───────────────────────────────────────────────────

    #[test]
    fn to_hex_is_uppercase() {
        assert_eq!(Rgb::new(0xab, 0xcd, 0xef).to_hex(), "#ABCDEF");
        assert_eq!(Rgb::new(0xab, 0xcd, 0xef).to_string(), "#ABCDEF");
    }

    // ── distance ────────────────────────────────────────────────────

    #[test]
    fn distance_to_self_is_zero() {
        let c = Rgb::new(10, 20, 30);
        assert!(c.distance(c).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_black_white() {
        let d = Rgb::BLACK.distance(Rgb::WHITE);
        assert!((d - (3.0f64 * 255.0 * 255.0).sqrt()).abs() < 1e-9);
    }

    // ── properties ──────────────────────────────────────────────────

    proptest! {
        #[test]
        fn normalize_is_idempotent(hex in "#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})") {
            let once = normalize(&hex);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn parse_then_format_matches_normalize(hex in "#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})") {
            let c = Rgb::parse(&hex).unwrap();
            prop_assert_eq!(c.to_hex(), normalize(&hex));
        }
    }
}
