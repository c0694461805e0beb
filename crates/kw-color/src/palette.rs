//! Named color palettes — membership, nearest match, and brightness order.
//!
//! A [`Palette`] is an ordered list of uniquely named colors. Order is
//! insertion order and it matters: [`Palette::nearest`] and
//! [`Palette::darkest`] both break ties in favor of the earlier entry.

use std::borrow::Cow;
use std::sync::LazyLock;

use crate::color::{Rgb, normalize};
use crate::contrast::relative_luminance;

// ---------------------------------------------------------------------------
// Kiroween palette
// ---------------------------------------------------------------------------

/// The Kiroween theme colors, in declaration order.
pub const KIROWEEN_ENTRIES: [(&str, Rgb); 7] = [
    ("goldenYellow", Rgb::new(0xFF, 0xB2, 0x00)),
    ("burntOrange", Rgb::new(0xEB, 0x5B, 0x00)),
    ("hotPink", Rgb::new(0xD9, 0x16, 0x56)),
    ("deepPurple", Rgb::new(0x64, 0x0D, 0x5F)),
    ("darkPurple", Rgb::new(0x3D, 0x08, 0x42)),
    ("veryDark", Rgb::new(0x1A, 0x0A, 0x1F)),
    ("fogGrey", Rgb::new(0xC6, 0xC6, 0xC6)),
];

static KIROWEEN: LazyLock<Palette> = LazyLock::new(|| Palette {
    entries: KIROWEEN_ENTRIES
        .iter()
        .map(|&(name, color)| PaletteEntry { name: Cow::Borrowed(name), color })
        .collect(),
});

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// One named palette color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: Cow<'static, str>,
    pub color: Rgb,
}

/// Result of [`Palette::nearest`].
#[derive(Debug, Clone, PartialEq)]
pub struct NearestMatch {
    pub name: String,
    pub color: Rgb,
    /// Euclidean RGB distance from the query color.
    pub distance: f64,
}

/// An ordered set of uniquely named colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette from `(name, color)` pairs, keeping their order.
    ///
    /// Returns `None` if a name appears twice.
    #[must_use]
    pub fn new<N>(entries: impl IntoIterator<Item = (N, Rgb)>) -> Option<Self>
    where
        N: Into<Cow<'static, str>>,
    {
        let mut out: Vec<PaletteEntry> = Vec::new();
        for (name, color) in entries {
            let name = name.into();
            if out.iter().any(|e| e.name == name) {
                return None;
            }
            out.push(PaletteEntry { name, color });
        }
        Some(Self { entries: out })
    }

    /// The built-in Kiroween palette.
    #[must_use]
    pub fn kiroween() -> &'static Self {
        &KIROWEEN
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    /// Look up a color by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.color)
    }

    /// Whether `color` is exactly one of the palette colors.
    #[must_use]
    pub fn contains(&self, color: Rgb) -> bool {
        self.entries.iter().any(|e| e.color == color)
    }

    /// Whether hex text names a palette color.
    ///
    /// The text is normalized and compared against each entry's canonical
    /// hex. Exact match only; text that isn't a color is simply `false`.
    #[must_use]
    pub fn is_in_palette(&self, hex: &str) -> bool {
        let wanted = normalize(hex);
        self.entries.iter().any(|e| e.color.to_hex() == wanted)
    }

    /// The inputs that are not palette colors, in input order.
    ///
    /// An empty result means every color passed.
    #[must_use]
    pub fn validate_colors<S: AsRef<str>>(&self, colors: &[S]) -> Vec<String> {
        colors
            .iter()
            .map(AsRef::as_ref)
            .filter(|c| !self.is_in_palette(c))
            .map(str::to_string)
            .collect()
    }

    /// The palette entry closest to `color` by Euclidean RGB distance.
    ///
    /// Ties go to the entry that comes first. `None` only when the palette
    /// is empty.
    #[must_use]
    pub fn nearest(&self, color: Rgb) -> Option<NearestMatch> {
        let mut best: Option<(&PaletteEntry, f64)> = None;
        for entry in &self.entries {
            let distance = color.distance(entry.color);
            // Strict `<` keeps the first entry on ties.
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((entry, distance));
            }
        }
        best.map(|(entry, distance)| NearestMatch {
            name: entry.name.to_string(),
            color: entry.color,
            distance,
        })
    }

    /// The entry with the lowest relative luminance (first wins on ties).
    #[must_use]
    pub fn darkest(&self) -> Option<&PaletteEntry> {
        let mut best: Option<(&PaletteEntry, f64)> = None;
        for entry in &self.entries {
            let lum = relative_luminance(entry.color);
            if best.is_none_or(|(_, l)| lum < l) {
                best = Some((entry, lum));
            }
        }
        best.map(|(entry, _)| entry)
    }

    /// Colors of every entry except `excluded`, in palette order.
    #[must_use]
    pub fn colors_except(&self, excluded: &str) -> Vec<Rgb> {
        self.entries
            .iter()
            .filter(|e| e.name != excluded)
            .map(|e| e.color)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
