//! Host editor user settings — the slice of `settings.json` the theme owns.
//!
//! Three keys matter:
//!
//! | Key                            | Type       | Default |
//! |--------------------------------|------------|---------|
//! | `kiroween.background.enabled`  | bool       | true    |
//! | `workbench.colorTheme`         | string     | (none)  |
//! | `vscode_custom_css.imports`    | [string]   | []      |
//!
//! Every other key is carried through untouched, so loading and saving a
//! user's settings never loses their configuration.
//!
//! The host writes these files as JSON with comments: `//` and `/* */`
//! comments and trailing commas are accepted on load. Saving writes plain
//! JSON, so comments in the file do not survive a save.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::assets::{read_text, write_text};
use crate::error::{ExtensionError, Result};

pub const ENABLED_KEY: &str = "kiroween.background.enabled";
pub const THEME_KEY: &str = "workbench.colorTheme";
pub const IMPORTS_KEY: &str = "vscode_custom_css.imports";

/// Color theme id the background belongs to.
pub const THEME_ID: &str = "KiroTheme";

/// A user settings object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSettings {
    values: Map<String, Value>,
}

impl HostSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from `path`. A missing or blank file is empty settings.
    ///
    /// Comments and trailing commas are stripped before parsing.
    ///
    /// # Errors
    ///
    /// - [`ExtensionError::Io`] if the file exists but can't be read
    /// - [`ExtensionError::Json`] if it isn't valid JSON once comments and
    ///   trailing commas are gone
    /// - [`ExtensionError::InvalidSettings`] if the top level isn't an object
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let text = read_text(path)?;
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: Value =
            serde_json::from_str(&strip_jsonc(&text)).map_err(|source| ExtensionError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_value(value)
    }

    /// Wrap an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// [`ExtensionError::InvalidSettings`] unless `value` is an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(ExtensionError::InvalidSettings(format!(
                "expected a JSON object at the top level, found {other}"
            ))),
        }
    }

    /// Write settings to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`ExtensionError::Io`] if the file can't be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut text = self.to_json_pretty();
        text.push('\n');
        write_text(path, &text)
    }

    #[must_use]
    pub fn to_json_pretty(&self) -> String {
        // Serializing a map of JSON values cannot fail.
        serde_json::to_string_pretty(&self.values).unwrap_or_default()
    }

    // ── Background flag ────────────────────────────────────────────

    #[must_use]
    pub fn background_enabled(&self) -> bool {
        self.values
            .get(ENABLED_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    pub fn set_background_enabled(&mut self, enabled: bool) {
        self.values.insert(ENABLED_KEY.to_string(), Value::Bool(enabled));
        info!(enabled, "background flag updated");
    }

    // ── Color theme ────────────────────────────────────────────────

    #[must_use]
    pub fn color_theme(&self) -> Option<&str> {
        self.values.get(THEME_KEY).and_then(Value::as_str)
    }

    pub fn set_color_theme(&mut self, id: &str) {
        self.values
            .insert(THEME_KEY.to_string(), Value::String(id.to_string()));
    }

    #[must_use]
    pub fn is_theme_active(&self, id: &str) -> bool {
        self.color_theme() == Some(id)
    }

    // ── Stylesheet imports ─────────────────────────────────────────

    /// The string entries of the import list.
    #[must_use]
    pub fn imports(&self) -> Vec<&str> {
        self.values
            .get(IMPORTS_KEY)
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Append `uri` to the import list unless it is already there.
    ///
    /// Returns `true` if the list changed.
    ///
    /// # Errors
    ///
    /// [`ExtensionError::InvalidSettings`] if the import key holds
    /// something other than an array.
    pub fn add_import(&mut self, uri: &str) -> Result<bool> {
        let list = self.imports_mut()?;
        if list.iter().any(|v| v.as_str() == Some(uri)) {
            return Ok(false);
        }
        list.push(Value::String(uri.to_string()));
        info!(uri, "stylesheet import added");
        Ok(true)
    }

    /// Drop every import whose text contains `fragment`.
    ///
    /// Returns `true` if anything was removed.
    ///
    /// # Errors
    ///
    /// [`ExtensionError::InvalidSettings`] if the import key holds
    /// something other than an array.
    pub fn remove_imports_containing(&mut self, fragment: &str) -> Result<bool> {
        if !self.values.contains_key(IMPORTS_KEY) {
            return Ok(false);
        }
        let list = self.imports_mut()?;
        let before = list.len();
        list.retain(|v| !v.as_str().is_some_and(|s| s.contains(fragment)));
        let removed = before - list.len();
        if removed > 0 {
            info!(fragment, removed, "stylesheet imports removed");
        }
        Ok(removed > 0)
    }

    fn imports_mut(&mut self) -> Result<&mut Vec<Value>> {
        let entry = self
            .values
            .entry(IMPORTS_KEY.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        match entry {
            Value::Array(list) => Ok(list),
            other => Err(ExtensionError::InvalidSettings(format!(
                "{IMPORTS_KEY} must be an array, found {other}"
            ))),
        }
    }
}

/// Blank out comments and trailing commas so `serde_json` accepts the text.
///
/// Comments become spaces (newlines are kept), so line and column numbers
/// in parse errors still point into the original file. String contents are
/// never touched.
fn strip_jsonc(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out: Vec<char> = Vec::with_capacity(chars.len());
    let mut i = 0;
    let mut in_string = false;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(&next) = chars.get(i + 1) {
                    out.push(next);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match (c, chars.get(i + 1)) {
            ('"', _) => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            ('/', Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    out.push(' ');
                    i += 1;
                }
            }
            ('/', Some('*')) => {
                out.extend([' ', ' ']);
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    out.push(if chars[i] == '\n' { '\n' } else { ' ' });
                    i += 1;
                }
                if i < chars.len() {
                    out.extend([' ', ' ']);
                    i += 2;
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    // Comments are blank now, so a trailing comma is one followed only by
    // whitespace and a closing bracket.
    let mut in_string = false;
    let mut escaped = false;
    for idx in 0..out.len() {
        let c = out[idx];
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = out[idx + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                out[idx] = ' ';
            }
        }
    }

    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn settings(value: Value) -> HostSettings {
        HostSettings::from_value(value).unwrap()
    }

    // ── Flag and theme ─────────────────────────────────────────────

    #[test]
    fn enabled_by_default() {
        assert!(HostSettings::new().background_enabled());
    }

    #[test]
    fn enabled_reads_flag() {
        let s = settings(json!({ ENABLED_KEY: false }));
        assert!(!s.background_enabled());
    }

    #[test]
    fn non_bool_flag_falls_back_to_default() {
        let s = settings(json!({ ENABLED_KEY: "no" }));
        assert!(s.background_enabled());
    }

    #[test]
    fn theme_active() {
        let mut s = HostSettings::new();
        assert!(!s.is_theme_active(THEME_ID));
        s.set_color_theme(THEME_ID);
        assert!(s.is_theme_active(THEME_ID));
        assert!(!s.is_theme_active("Default Dark+"));
    }

    // ── Imports ────────────────────────────────────────────────────

    #[test]
    fn add_import_is_idempotent() {
        let mut s = HostSettings::new();
        assert!(s.add_import("file:///a.css").unwrap());
        assert!(!s.add_import("file:///a.css").unwrap());
        assert_eq!(s.imports(), vec!["file:///a.css"]);
    }

    #[test]
    fn add_import_appends_after_existing() {
        let mut s = settings(json!({ IMPORTS_KEY: ["file:///other.css"] }));
        s.add_import("file:///kiroween-background.css").unwrap();
        assert_eq!(
            s.imports(),
            vec!["file:///other.css", "file:///kiroween-background.css"]
        );
    }

    #[test]
    fn remove_only_matching() {
        let mut s = settings(json!({
            IMPORTS_KEY: ["file:///x/kiroween-background.css", "file:///other.css"]
        }));
        assert!(s.remove_imports_containing("kiroween-background.css").unwrap());
        assert_eq!(s.imports(), vec!["file:///other.css"]);
        assert!(!s.remove_imports_containing("kiroween-background.css").unwrap());
    }

    #[test]
    fn remove_without_key_does_not_create_it() {
        let mut s = HostSettings::new();
        assert!(!s.remove_imports_containing("x").unwrap());
        assert_eq!(s.to_json_pretty(), "{}");
    }

    #[test]
    fn imports_must_be_array() {
        let mut s = settings(json!({ IMPORTS_KEY: "file:///a.css" }));
        assert!(matches!(
            s.add_import("file:///b.css"),
            Err(ExtensionError::InvalidSettings(_))
        ));
    }

    #[test]
    fn top_level_must_be_object() {
        assert!(matches!(
            HostSettings::from_value(json!([1, 2])),
            Err(ExtensionError::InvalidSettings(_))
        ));
    }

    // ── Files ──────────────────────────────────────────────────────

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let s = HostSettings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(s, HostSettings::new());
    }

    #[test]
    fn round_trip_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "editor.fontSize": 14, "files.autoSave": "off" }"#).unwrap();

        let mut s = HostSettings::load(&path).unwrap();
        s.set_background_enabled(false);
        s.add_import("file:///k.css").unwrap();
        s.save(&path).unwrap();

        let back = HostSettings::load(&path).unwrap();
        assert!(!back.background_enabled());
        assert_eq!(back.imports(), vec!["file:///k.css"]);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"editor.fontSize\": 14"));
        assert!(text.contains("\"files.autoSave\": \"off\""));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn broken_json_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        match HostSettings::load(&path) {
            Err(ExtensionError::Json { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected: {other:?}"),
        }
    }

    // ── Comments and trailing commas ───────────────────────────────

    #[test]
    fn load_accepts_comments_and_trailing_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{
  // theme picked in the UI
  "workbench.colorTheme": "KiroTheme",
  /* imports
     for the loader */
  "vscode_custom_css.imports": ["file:///a.css",],
  "editor.fontSize": 14,
}
"#,
        )
        .unwrap();
        let s = HostSettings::load(&path).unwrap();
        assert!(s.is_theme_active(THEME_ID));
        assert_eq!(s.imports(), vec!["file:///a.css"]);
    }

    #[test]
    fn comment_markers_inside_strings_are_kept() {
        let text = r#"{ "url": "http://x/*y*/", "q": "a\"//b", "list": ",]" }"#;
        let value: Value = serde_json::from_str(&strip_jsonc(text)).unwrap();
        assert_eq!(
            value,
            json!({ "url": "http://x/*y*/", "q": "a\"//b", "list": ",]" })
        );
    }

    #[test]
    fn stripped_text_keeps_line_numbers() {
        let text = "{\n  /* a\n b */\n  \"k\": 1,\n}";
        let stripped = strip_jsonc(text);
        assert_eq!(stripped.lines().count(), text.lines().count());
        assert_eq!(stripped.len(), text.len());
    }
}
