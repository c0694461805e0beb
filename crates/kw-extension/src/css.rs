//! The background stylesheet — rendering and checking.
//!
//! The stylesheet paints the tile behind the editor's text lines and
//! fades it with a `::before` overlay. The host's custom-CSS loader reads
//! it from disk, so the tile URL is relative to the stylesheet's own
//! directory.

use std::sync::LazyLock;

use kw_color::{ColorError, OPACITY_MAX, OPACITY_MIN, clamp_opacity, is_opacity_valid, parse_opacity};
use regex::Regex;

/// Element the background is painted on.
pub const TARGET_SELECTOR: &str = ".monaco-editor .view-lines";

/// Tile URL as seen from `themes/`.
pub const PATTERN_URL: &str = "../assets/background-pattern.svg";

static OPACITY_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^|[\s;{])opacity:\s*([^;}\s]+)").expect("opacity regex"));

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Parameters of the background stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundCss {
    pub pattern_url: String,
    pub tile_size: u32,
    /// Overlay opacity; clamped into the allowed band when rendered.
    pub opacity: f64,
    pub blend_mode: String,
}

impl Default for BackgroundCss {
    fn default() -> Self {
        Self {
            pattern_url: PATTERN_URL.to_string(),
            tile_size: 400,
            opacity: 0.05,
            blend_mode: "lighten".to_string(),
        }
    }
}

impl BackgroundCss {
    /// Render the stylesheet.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidOpacity`] if the opacity is NaN or infinite.
    pub fn render(&self) -> Result<String, ColorError> {
        let opacity = clamp_opacity(self.opacity)?;
        let size = self.tile_size;

        let url = &self.pattern_url;
        let blend = &self.blend_mode;

        Ok(format!(
            "/* Kiroween background pattern */
{TARGET_SELECTOR} {{
  background-image: url('{url}');
  background-repeat: repeat;
  background-size: {size}px {size}px;
  background-position: center;
  background-attachment: local;
}}

{TARGET_SELECTOR}::before {{
  content: '';
  position: absolute;
  top: 0;
  left: 0;
  right: 0;
  bottom: 0;
  background: inherit;
  opacity: {opacity};
  mix-blend-mode: {blend};
  pointer-events: none;
  z-index: -1;
}}
"
        ))
    }
}

// ---------------------------------------------------------------------------
// Checking
// ---------------------------------------------------------------------------

/// Outcome of one stylesheet check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssCheck {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

/// All checks run against a stylesheet, in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssReport {
    pub checks: Vec<CssCheck>,
}

impl CssReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CssCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

fn check(name: &'static str, passed: bool, detail: impl Into<String>) -> CssCheck {
    CssCheck {
        name,
        passed,
        detail: detail.into(),
    }
}

/// Check a background stylesheet for everything the overlay relies on.
#[must_use]
pub fn check_stylesheet(css: &str) -> CssReport {
    let mut checks = Vec::with_capacity(6);

    checks.push(check(
        "background-image",
        css.contains("background-image:") && css.contains("background-pattern.svg"),
        "background-image referencing background-pattern.svg",
    ));

    checks.push(check(
        "tiling",
        css.contains("background-repeat: repeat") && css.contains("background-size:"),
        "background-repeat: repeat with an explicit background-size",
    ));

    checks.push(opacity_check(css));

    checks.push(check(
        "blend-mode",
        css.contains("mix-blend-mode:"),
        "mix-blend-mode declared",
    ));

    checks.push(check(
        "target",
        css.contains(TARGET_SELECTOR),
        format!("targets {TARGET_SELECTOR}"),
    ));

    checks.push(check(
        "relative-url",
        css.contains(&format!("url('{PATTERN_URL}')")) || css.contains(&format!("url(\"{PATTERN_URL}\")")),
        format!("tile referenced as {PATTERN_URL}"),
    ));

    CssReport { checks }
}

fn opacity_check(css: &str) -> CssCheck {
    let Some(caps) = OPACITY_DECL.captures(css) else {
        return check("opacity", false, "no opacity declaration");
    };
    match parse_opacity(&caps[1]) {
        Ok(value) if is_opacity_valid(value) => {
            check("opacity", true, format!("opacity {value} within {OPACITY_MIN}-{OPACITY_MAX}"))
        }
        Ok(value) => check(
            "opacity",
            false,
            format!("opacity {value} outside {OPACITY_MIN}-{OPACITY_MAX}"),
        ),
        Err(e) => check("opacity", false, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_render_passes_checks() {
        let css = BackgroundCss::default().render().unwrap();
        let report = check_stylesheet(&css);
        assert!(report.passed(), "failures: {:?}", report.failures().collect::<Vec<_>>());
        assert_eq!(report.checks.len(), 6);
    }

    #[test]
    fn render_clamps_opacity() {
        let css = BackgroundCss { opacity: 0.5, ..BackgroundCss::default() }
            .render()
            .unwrap();
        assert!(css.contains("  opacity: 0.08;"));
    }

    #[test]
    fn render_rejects_nan() {
        let css = BackgroundCss { opacity: f64::NAN, ..BackgroundCss::default() }.render();
        assert!(matches!(css, Err(ColorError::InvalidOpacity(_))));
    }

    #[test]
    fn render_uses_tile_size_and_blend() {
        let css = BackgroundCss {
            tile_size: 200,
            blend_mode: "screen".to_string(),
            ..BackgroundCss::default()
        }
        .render()
        .unwrap();
        assert!(css.contains("background-size: 200px 200px;"));
        assert!(css.contains("mix-blend-mode: screen;"));
    }

    #[test]
    fn opacity_out_of_range_fails() {
        let css = BackgroundCss::default().render().unwrap().replace("opacity: 0.05", "opacity: 0.5");
        let report = check_stylesheet(&css);
        let failed: Vec<&str> = report.failures().map(|c| c.name).collect();
        assert_eq!(failed, ["opacity"]);
    }

    #[test]
    fn opacity_missing_fails() {
        let report = check_stylesheet(".monaco-editor .view-lines { color: red; }");
        let opacity = report.checks.iter().find(|c| c.name == "opacity").unwrap();
        assert!(!opacity.passed);
        assert_eq!(opacity.detail, "no opacity declaration");
    }

    #[test]
    fn fill_opacity_is_not_opacity() {
        let report = check_stylesheet("a { fill-opacity: 0.05; }");
        let opacity = report.checks.iter().find(|c| c.name == "opacity").unwrap();
        assert!(!opacity.passed);
    }

    #[test]
    fn absolute_url_fails_relative_check() {
        let css = BackgroundCss {
            pattern_url: "file:///opt/kiroween/assets/background-pattern.svg".to_string(),
            ..BackgroundCss::default()
        }
        .render()
        .unwrap();
        let failed: Vec<&str> = check_stylesheet(&css).failures().map(|c| c.name).collect();
        assert_eq!(failed, ["relative-url"]);
    }

    #[test]
    fn double_quoted_url_is_accepted() {
        let css = BackgroundCss::default()
            .render()
            .unwrap()
            .replace("url('../assets/background-pattern.svg')", "url(\"../assets/background-pattern.svg\")");
        assert!(check_stylesheet(&css).passed());
    }
}
