//! Textual transforms over icon markup.
//!
//! The icon set is small, fixed, and written in-house, so these work on
//! the text with a few patterns instead of parsing XML. Each transform
//! checks the shape it expects and reports when it is absent.

use std::sync::LazyLock;

use regex::Regex;

static WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<svg\b[^>]*>(.*)</svg>").expect("svg wrapper regex"));

static PRIMITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(path|circle|ellipse|line|polyline|polygon|rect)\b([^>]*?)(/?)>")
        .expect("primitive tag regex")
});

// Existing paint attributes on a primitive, in either quote style.
// `stroke-width` and friends are left alone because only whitespace may
// sit between the name and `=`.
static PAINT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s(?:stroke|fill)\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("paint attribute regex")
});

static CURRENT_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s)(stroke|fill)\s*=\s*(?:"currentColor"|'currentColor')"#)
        .expect("currentColor regex")
});

/// The markup between the outer `<svg ...>` and `</svg>`, trimmed.
///
/// Returns `None` when there is no wrapper to strip.
#[must_use]
pub fn strip_wrapper(svg: &str) -> Option<&str> {
    WRAPPER
        .captures(svg)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Paint icon content with one explicit color.
///
/// `currentColor` placeholders become `color`, and every primitive shape
/// gets explicit paint: outlines (`path`, `line`, `rect`, ...) get
/// `stroke=color fill="none"`, circles are filled solid. Any paint the
/// primitive already carried is replaced, so no element ends up with two
/// `stroke` or `fill` attributes.
#[must_use]
pub fn recolor(content: &str, color: &str) -> String {
    let replaced = CURRENT_COLOR.replace_all(content, |caps: &regex::Captures<'_>| {
        format!(r#"{}{}="{color}""#, &caps[1], &caps[2])
    });

    PRIMITIVE
        .replace_all(&replaced, |caps: &regex::Captures<'_>| {
            let tag = &caps[1];
            let attrs = PAINT_ATTR.replace_all(&caps[2], "");
            let close = &caps[3];
            let fill = if tag == "circle" { color } else { "none" };
            format!(r#"<{tag} stroke="{color}" fill="{fill}"{attrs}{close}>"#)
        })
        .into_owned()
}
