//! Hex color tokens in markup text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::color::normalize;

// A `#` followed by the longest run of hex digits. Runs of any length other
// than 3 or 6 are not colors, so `#abcd` and `#1234567` yield nothing.
static HEX_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9A-Fa-f]+)").expect("hex run regex"));

/// Collect every `#rgb` / `#rrggbb` token in `text`.
///
/// Tokens are normalized (uppercase, shorthand expanded) and deduplicated,
/// in the order they first appear. Named colors such as `currentColor`,
/// `none`, or `red` are not recognized, so an empty result means the
/// markup takes its color from context rather than that it is broken.
///
/// ```
/// use kw_color::extract_color_tokens;
///
/// let tokens = extract_color_tokens(r##"fill="#fff" stroke="#ABCDEF""##);
/// assert_eq!(tokens, ["#FFFFFF", "#ABCDEF"]);
/// ```
#[must_use]
pub fn extract_color_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for caps in HEX_RUN.captures_iter(text) {
        let digits = &caps[1];
        if digits.len() != 3 && digits.len() != 6 {
            continue;
        }
        let hex = normalize(digits);
        if seen.insert(hex.clone()) {
            out.push(hex);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn attribute_colors() {
        let tokens = extract_color_tokens(r##"fill="#fff" stroke="#ABCDEF""##);
        assert_eq!(tokens, vec!["#FFFFFF".to_string(), "#ABCDEF".to_string()]);
    }

    #[test]
    fn duplicates_collapse_after_normalizing() {
        let tokens = extract_color_tokens("#fff #FFFFFF #FfF #eb5b00");
        assert_eq!(tokens, vec!["#FFFFFF".to_string(), "#EB5B00".to_string()]);
    }

    #[test]
    fn css_declarations() {
        let tokens = extract_color_tokens("color: #abc; background:#123456;");
        assert_eq!(tokens, vec!["#AABBCC".to_string(), "#123456".to_string()]);
    }

    #[test]
    fn wrong_lengths_are_skipped() {
        assert!(extract_color_tokens("#abcd #12345 #1234567 #ab").is_empty());
    }

    #[test]
    fn run_must_end_at_non_hex() {
        // "#abcg": the run is "abc", bounded by a non-hex "g".
        assert_eq!(extract_color_tokens("#abcg"), vec!["#AABBCC".to_string()]);
    }

    #[test]
    fn named_colors_are_not_tokens() {
        let svg = r#"<path stroke="currentColor" fill="none"/><rect fill="red"/>"#;
        assert!(extract_color_tokens(svg).is_empty());
    }

    #[test]
    fn fragment_ids_are_not_colors() {
        assert!(extract_color_tokens(r##"<use href="#ghost"/>"##).is_empty());
    }
}
