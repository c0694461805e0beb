//! Asset locations, file URIs, and icon loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use kw_pattern::AssetLibrary;
use tracing::{debug, info, warn};

use crate::error::{ExtensionError, Result};

/// Background stylesheet, relative to the extension root.
pub const CSS_FILE: &str = "themes/kiroween-background.css";

/// Generated background tile, relative to the extension root.
pub const PATTERN_FILE: &str = "assets/background-pattern.svg";

/// Directory of the pattern icons, relative to the extension root.
pub const PATTERN_ASSET_DIR: &str = "assets";

/// Directory of the product icon theme's icons.
pub const PRODUCT_ICON_DIR: &str = "product-icons/icons";

/// Icons composed into the background tile, in tile order.
pub const PATTERN_ASSETS: [&str; 5] = [
    "ghost.svg",
    "pumpkin.svg",
    "skull.svg",
    "witch-hat.svg",
    "eyeball.svg",
];

/// Icons the product icon theme ships.
pub const PRODUCT_ICONS: [&str; 9] = [
    "pumpkin.svg",
    "eyeball.svg",
    "dead-tree-branch.svg",
    "lightning-bolt.svg",
    "witch-hat.svg",
    "cauldron.svg",
    "coffin.svg",
    "skull.svg",
    "haunted-eye.svg",
];

/// Files the background needs that are absent under `root`.
#[must_use]
pub fn missing_assets(root: &Path) -> Vec<&'static str> {
    [CSS_FILE, PATTERN_FILE]
        .into_iter()
        .filter(|rel| !root.join(rel).is_file())
        .collect()
}

/// `file:///` URI for a path, with forward slashes on every platform.
///
/// ```
/// use std::path::Path;
/// use kw_extension::assets::file_uri;
///
/// assert_eq!(file_uri(Path::new("/opt/kiroween/theme.css")), "file:///opt/kiroween/theme.css");
/// ```
#[must_use]
pub fn file_uri(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    format!("file:///{}", text.trim_start_matches('/'))
}

/// URI of the background stylesheet, or `None` if it doesn't exist.
#[must_use]
pub fn css_uri(root: &Path) -> Option<String> {
    let path = root.join(CSS_FILE);
    path.is_file().then(|| file_uri(&path))
}

/// Read a UTF-8 text file.
///
/// # Errors
///
/// [`ExtensionError::Io`] naming the path on any read failure.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ExtensionError::io(path, e))
}

/// Write a text file, creating parent directories as needed.
///
/// # Errors
///
/// [`ExtensionError::Io`] naming the path on any write failure.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExtensionError::io(parent, e))?;
    }
    fs::write(path, text).map_err(|e| ExtensionError::io(path, e))?;
    info!(path = %path.display(), bytes = text.len(), "wrote file");
    Ok(())
}

/// Load icon files from `dir` into a library, keeping `names` order.
///
/// # Errors
///
/// [`ExtensionError::MissingAsset`] for the first icon that doesn't exist,
/// [`ExtensionError::Io`] if one exists but can't be read. A library is
/// never returned with icons left out.
pub fn load_library<S: AsRef<str>>(dir: &Path, names: &[S]) -> Result<AssetLibrary> {
    let mut library = AssetLibrary::new();
    for name in names {
        let name = name.as_ref();
        let path: PathBuf = dir.join(name);
        match fs::read_to_string(&path) {
            Ok(markup) => {
                debug!(asset = name, "loaded asset");
                library.push(name, markup);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "asset not found");
                return Err(ExtensionError::MissingAsset { path });
            }
            Err(e) => return Err(ExtensionError::io(path, e)),
        }
    }
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn both_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(missing_assets(dir.path()), vec![CSS_FILE, PATTERN_FILE]);
    }

    #[test]
    fn only_pattern_missing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), CSS_FILE);
        assert_eq!(missing_assets(dir.path()), vec![PATTERN_FILE]);
    }

    #[test]
    fn nothing_missing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), CSS_FILE);
        touch(dir.path(), PATTERN_FILE);
        assert!(missing_assets(dir.path()).is_empty());
    }

    #[test]
    fn windows_paths_get_forward_slashes() {
        assert_eq!(
            file_uri(Path::new(r"C:\Users\me\kiroween\themes\kiroween-background.css")),
            "file:///C:/Users/me/kiroween/themes/kiroween-background.css"
        );
    }

    #[test]
    fn css_uri_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(css_uri(dir.path()), None);
        touch(dir.path(), CSS_FILE);
        let uri = css_uri(dir.path()).unwrap();
        assert!(uri.starts_with("file:///"));
        assert!(uri.ends_with("themes/kiroween-background.css"));
    }

    #[test]
    fn write_creates_parents_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets").join("out.svg");
        write_text(&path, "<svg/>").unwrap();
        assert_eq!(read_text(&path).unwrap(), "<svg/>");
    }

    #[test]
    fn load_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.svg"), "B").unwrap();
        fs::write(dir.path().join("a.svg"), "A").unwrap();
        let lib = load_library(dir.path(), &["b.svg", "a.svg"]).unwrap();
        let names: Vec<&str> = lib.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["b.svg", "a.svg"]);
    }

    #[test]
    fn load_fails_on_first_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ghost.svg"), "<svg></svg>").unwrap();
        let err = load_library(dir.path(), &["ghost.svg", "pumpkin.svg", "skull.svg"]).unwrap_err();
        match err {
            ExtensionError::MissingAsset { path } => assert!(path.ends_with("pumpkin.svg")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
