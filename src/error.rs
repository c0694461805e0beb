use std::path::PathBuf;

use kw_color::ColorError;
use kw_extension::ExtensionError;
use kw_pattern::PatternError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Anything that stops a command. `main` prints it and exits with 1.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error(transparent)]
    Extension(#[from] ExtensionError),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}
