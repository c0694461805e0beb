//! Optional JSON config for the CLI.
//!
//! Every field has a default, so `{}` is a complete config and any subset
//! of keys can be given:
//!
//! ```json
//! {
//!   "pattern": { "seed": 12345, "grid_size": 4, "tile_size": 400 },
//!   "assets": ["ghost.svg", "pumpkin.svg"],
//!   "theme_id": "KiroTheme",
//!   "opacity": 0.05,
//!   "blend_mode": "lighten"
//! }
//! ```
//!
//! Command-line flags win over values from the file.

use std::path::Path;

use kw_extension::assets::{PATTERN_ASSETS, read_text};
use kw_extension::css::BackgroundCss;
use kw_extension::settings::THEME_ID;
use kw_pattern::TileSpec;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pattern: TileSpec,
    /// Icon file names composed into the tile, in order.
    pub assets: Vec<String>,
    pub theme_id: String,
    pub opacity: f64,
    pub blend_mode: String,
}

impl Default for Config {
    fn default() -> Self {
        let css = BackgroundCss::default();
        Self {
            pattern: TileSpec::default(),
            assets: PATTERN_ASSETS.iter().map(ToString::to_string).collect(),
            theme_id: THEME_ID.to_string(),
            opacity: css.opacity,
            blend_mode: css.blend_mode,
        }
    }
}

impl Config {
    /// Read `path`, or the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// [`Error::Extension`] if the file can't be read, [`Error::Config`] if
    /// it isn't a valid config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = read_text(path)?;
        let config = Self::parse(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Stylesheet parameters for a tile of the configured size.
    #[must_use]
    pub fn background_css(&self) -> BackgroundCss {
        BackgroundCss {
            tile_size: self.pattern.tile_size,
            opacity: self.opacity,
            blend_mode: self.blend_mode.clone(),
            ..BackgroundCss::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.pattern, TileSpec { seed: 12345, grid_size: 4, tile_size: 400 });
        assert_eq!(c.assets.len(), 5);
        assert_eq!(c.assets[0], "ghost.svg");
        assert_eq!(c.theme_id, "KiroTheme");
        assert_eq!(c.blend_mode, "lighten");
    }

    #[test]
    fn partial_pattern_keeps_other_defaults() {
        let c = Config::parse(r#"{ "pattern": { "seed": 7 }, "opacity": 0.03 }"#).unwrap();
        assert_eq!(c.pattern.seed, 7);
        assert_eq!(c.pattern.grid_size, 4);
        assert_eq!(c.pattern.tile_size, 400);
        assert!((c.opacity - 0.03).abs() < f64::EPSILON);
        assert_eq!(c.theme_id, "KiroTheme");
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(Config::parse(r#"{ "assets": "ghost.svg" }"#).is_err());
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn load_names_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiroween.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("kiroween.json"));
    }

    #[test]
    fn css_follows_config() {
        let c = Config {
            opacity: 0.07,
            blend_mode: "screen".to_string(),
            pattern: TileSpec { tile_size: 200, ..TileSpec::default() },
            ..Config::default()
        };
        let css = c.background_css();
        assert_eq!(css.tile_size, 200);
        assert_eq!(css.blend_mode, "screen");
        assert_eq!(css.pattern_url, "../assets/background-pattern.svg");
    }
}
