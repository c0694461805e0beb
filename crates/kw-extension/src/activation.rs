//! Background activation.
//!
//! The stylesheet import is only injected when the assets are on disk, the
//! background flag is on, and the Kiroween theme is the active one. The
//! checks run in that order and the first failing one decides the outcome.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::assets::{CSS_FILE, css_uri, missing_assets};
use crate::error::{ExtensionError, Result};
use crate::settings::HostSettings;

/// What activation should do for the current settings and files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Required files are absent (relative paths, in check order).
    MissingAssets(Vec<&'static str>),
    /// The user turned the background off.
    Disabled,
    /// Some other color theme is active.
    ThemeInactive,
    /// Everything is in place; import this stylesheet.
    Inject { uri: String },
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAssets(files) => {
                write!(f, "background assets are missing: {}", files.join(", "))
            }
            Self::Disabled => f.write_str("background is disabled"),
            Self::ThemeInactive => f.write_str("Kiroween theme is not active"),
            Self::Inject { uri } => write!(f, "inject {uri}"),
        }
    }
}

/// Decide what to do for the extension installed at `root`.
#[must_use]
pub fn plan(root: &Path, settings: &HostSettings, theme_id: &str) -> Activation {
    let missing = missing_assets(root);
    if !missing.is_empty() {
        warn!(files = ?missing, "background assets missing");
        return Activation::MissingAssets(missing);
    }
    if !settings.background_enabled() {
        return Activation::Disabled;
    }
    if !settings.is_theme_active(theme_id) {
        return Activation::ThemeInactive;
    }
    // The stylesheet was just seen on disk; a race with deletion falls back
    // to reporting it missing.
    match css_uri(root) {
        Some(uri) => Activation::Inject { uri },
        None => Activation::MissingAssets(vec![CSS_FILE]),
    }
}

/// Add the stylesheet import. Returns `true` if the settings changed.
///
/// # Errors
///
/// [`ExtensionError::InvalidSettings`] if the import list is malformed.
pub fn apply_injection(settings: &mut HostSettings, uri: &str) -> Result<bool> {
    settings.add_import(uri)
}

/// Remove every import that points at the background stylesheet.
///
/// # Errors
///
/// [`ExtensionError::InvalidSettings`] if the import list is malformed.
pub fn remove_injection(settings: &mut HostSettings) -> Result<bool> {
    let name = CSS_FILE.rsplit('/').next().unwrap_or(CSS_FILE);
    settings.remove_imports_containing(name)
}

/// Flip the background flag and bring the import list in line with it.
///
/// Returns the new flag value. Turning the background on requires the
/// stylesheet to exist under `root`; the flag is left untouched if not.
///
/// # Errors
///
/// [`ExtensionError::MissingAsset`] when enabling without the stylesheet,
/// [`ExtensionError::InvalidSettings`] if the import list is malformed.
pub fn toggle(settings: &mut HostSettings, root: &Path) -> Result<bool> {
    let enable = !settings.background_enabled();
    if enable {
        let uri = css_uri(root).ok_or_else(|| ExtensionError::MissingAsset {
            path: root.join(CSS_FILE),
        })?;
        settings.add_import(&uri)?;
    } else {
        remove_injection(settings)?;
    }
    settings.set_background_enabled(enable);
    info!(enabled = enable, "background toggled");
    Ok(enable)
}
