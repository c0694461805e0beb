//! The line-icon contract.
//!
//! Every icon is a 24×24 outline drawn with `currentColor`, a 2-unit
//! stroke, and no fill or gradients. The host tints icons through
//! `currentColor` and the pattern compositor recolors them the same way,
//! so an icon that breaks the contract renders wrong in both places.

use std::sync::LazyLock;

use kw_color::{Palette, extract_color_tokens};
use regex::Regex;

bitflags::bitflags! {
    /// Contract requirements, one bit each.
    ///
    /// ```
    /// use kw_extension::icons::ContractFlags;
    ///
    /// let met = ContractFlags::STROKE_CURRENT_COLOR | ContractFlags::FILL_NONE;
    /// let missing = ContractFlags::all() - met;
    /// assert!(missing.contains(ContractFlags::VIEWBOX_24));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct ContractFlags: u8 {
        /// `stroke="currentColor"` somewhere in the icon.
        const STROKE_CURRENT_COLOR = 1 << 0;
        /// `fill="none"` somewhere in the icon.
        const FILL_NONE            = 1 << 1;
        /// `stroke-width="2"`.
        const STROKE_WIDTH_2       = 1 << 2;
        /// Root `<svg>` has `viewBox="0 0 24 24"`.
        const VIEWBOX_24           = 1 << 3;
        /// Root `<svg>` declares the SVG namespace.
        const SVG_NAMESPACE        = 1 << 4;
        /// No linear or radial gradients.
        const NO_GRADIENT          = 1 << 5;
    }
}

const DESCRIPTIONS: [(ContractFlags, &str); 6] = [
    (ContractFlags::STROKE_CURRENT_COLOR, r#"stroke="currentColor""#),
    (ContractFlags::FILL_NONE, r#"fill="none""#),
    (ContractFlags::STROKE_WIDTH_2, r#"stroke-width="2""#),
    (ContractFlags::VIEWBOX_24, r#"viewBox="0 0 24 24""#),
    (ContractFlags::SVG_NAMESPACE, "SVG namespace on <svg>"),
    (ContractFlags::NO_GRADIENT, "no gradients"),
];

impl ContractFlags {
    /// Short human-readable description of one requirement.
    #[must_use]
    pub fn describe(self) -> &'static str {
        DESCRIPTIONS
            .iter()
            .find(|(flag, _)| *flag == self)
            .map_or("combined requirements", |&(_, text)| text)
    }
}

static SVG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<svg\b[^>]*>").expect("svg tag regex"));

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment regex"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").expect("blank line regex"));

/// How one icon measures up against the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconReport {
    /// `false` when the text has no `<svg>` start tag at all.
    pub has_root: bool,
    pub satisfied: ContractFlags,
    /// Hard-coded hex colors that aren't palette colors.
    pub foreign_colors: Vec<String>,
}

impl IconReport {
    #[must_use]
    pub fn missing(&self) -> ContractFlags {
        ContractFlags::all() - self.satisfied
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.has_root && self.missing().is_empty() && self.foreign_colors.is_empty()
    }
}

/// Check icon markup against the contract and `palette`.
#[must_use]
pub fn check_icon(svg: &str, palette: &Palette) -> IconReport {
    let root = SVG_TAG.find(svg).map(|m| m.as_str());
    let mut satisfied = ContractFlags::empty();

    satisfied.set(
        ContractFlags::STROKE_CURRENT_COLOR,
        svg.contains(r#"stroke="currentColor""#),
    );
    satisfied.set(ContractFlags::FILL_NONE, svg.contains(r#"fill="none""#));
    satisfied.set(ContractFlags::STROKE_WIDTH_2, svg.contains(r#"stroke-width="2""#));
    satisfied.set(
        ContractFlags::VIEWBOX_24,
        root.is_some_and(|tag| tag.contains(r#"viewBox="0 0 24 24""#)),
    );
    satisfied.set(
        ContractFlags::SVG_NAMESPACE,
        root.is_some_and(|tag| tag.contains(r#"xmlns="http://www.w3.org/2000/svg""#)),
    );
    satisfied.set(
        ContractFlags::NO_GRADIENT,
        !svg.contains("<linearGradient") && !svg.contains("<radialGradient"),
    );

    let foreign_colors = extract_color_tokens(svg)
        .into_iter()
        .filter(|hex| !palette.is_in_palette(hex))
        .collect();

    IconReport {
        has_root: root.is_some(),
        satisfied,
        foreign_colors,
    }
}

/// Remove XML comments and the blank lines they leave behind.
#[must_use]
pub fn strip_comments(svg: &str) -> String {
    let without = COMMENT.replace_all(svg, "");
    let mut out = without.into_owned();
    // Collapsing one blank line can expose the next, so repeat to a fixpoint.
    loop {
        let next = BLANK_LINES.replace_all(&out, "\n").into_owned();
        if next == out {
            return out;
        }
        out = next;
    }
}
