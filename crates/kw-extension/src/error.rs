use std::path::PathBuf;

use kw_color::ColorError;
use kw_pattern::PatternError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtensionError>;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("required asset does not exist: {path}")]
    MissingAsset { path: PathBuf },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl ExtensionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_path() {
        let err = ExtensionError::io(
            "themes/kiroween-background.css",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "I/O error on themes/kiroween-background.css: gone");
    }

    #[test]
    fn wrapped_errors_are_transparent() {
        let err: ExtensionError = ColorError::InvalidOpacity("x".to_string()).into();
        assert_eq!(err.to_string(), "invalid opacity value: x");

        let err: ExtensionError = PatternError::EmptyLibrary.into();
        assert_eq!(err.to_string(), "asset library is empty");
    }
}
