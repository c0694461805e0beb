//! # kw-extension — Host-side plumbing for the Kiroween theme
//!
//! The theme's background is an SVG tile shown through an external
//! stylesheet that the host editor's "custom CSS" loader imports. This
//! crate covers everything around that tile that touches files:
//!
//! - **[`assets`]** — where the stylesheet and tile live, `file:///` URIs,
//!   loading icon files into an [`AssetLibrary`](kw_pattern::AssetLibrary)
//! - **[`settings`]** — the user settings JSON: enable flag, active color
//!   theme, stylesheet import list
//! - **[`css`]** — render and check the background stylesheet
//! - **[`icons`]** — the 24×24 line-icon contract every asset must follow
//! - **[`lint`]** — structural SVG checks (duplicate attributes, root,
//!   namespace)
//! - **[`activation`]** — decide whether to inject the stylesheet import,
//!   and toggle it
//!
//! Nothing here runs concurrently. Each operation reads, decides, writes,
//! and returns.

pub mod activation;
pub mod assets;
pub mod css;
pub mod error;
pub mod icons;
pub mod lint;
pub mod settings;

pub use activation::Activation;
pub use error::{ExtensionError, Result};
pub use settings::HostSettings;
