// SPDX-License-Identifier: MIT
//
// kiroween — command-line toolkit for the Kiroween editor theme.
//
// This is the binary that wires the crates together:
//
//   kw-color     → palette, contrast, opacity, hex tokens
//   kw-pattern   → deterministic background tile
//   kw-extension → settings file, stylesheet, icon contract, SVG lint
//
// Each subcommand maps to one function in `commands`. A run ends one of
// three ways:
//
//   Ok(Passed)  → exit 0
//   Ok(Failed)  → exit 1, the report on stdout says why
//   Err(e)      → exit 1, "kiroween: <e>" on stderr

mod commands;
mod config;
mod error;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use kw_extension::assets::{PATTERN_ASSET_DIR, PRODUCT_ICON_DIR};
use kw_pattern::TileSpec;
use tracing_subscriber::EnvFilter;

use commands::Status;
use config::Config;
use error::Result;

#[derive(Parser, Debug)]
#[command(name = "kiroween", version, about = "Kiroween theme toolkit", long_about = None)]
struct Cli {
    /// JSON config file (tile spec, assets, theme id, opacity, blend mode)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose the background tile from icon files
    Generate {
        /// Directory holding the icon files
        #[arg(long, default_value = PATTERN_ASSET_DIR)]
        assets_dir: PathBuf,
        #[arg(long)]
        seed: Option<u32>,
        /// Cells per side
        #[arg(long)]
        grid: Option<u32>,
        #[arg(long)]
        tile_size: Option<u32>,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the palette with luminance
    Palette,
    /// WCAG contrast ratio of two colors (fails below 4.5:1)
    Contrast { foreground: String, background: String },
    /// Closest palette color
    Nearest { color: String },
    /// Check that files only hard-code palette colors
    Colors {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Check icons against the line-icon contract
    CheckIcons {
        /// Icon directory [default: assets, or product-icons/icons with --product]
        dir: Option<PathBuf>,
        /// Check the product icon set instead of the pattern icons
        #[arg(long)]
        product: bool,
    },
    /// Structural SVG lint
    LintSvg {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Strip XML comments from SVG files
    CleanSvg {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Rewrite the files instead of printing
        #[arg(long)]
        in_place: bool,
    },
    /// Render the background stylesheet
    Css {
        #[arg(long)]
        opacity: Option<f64>,
        #[arg(long)]
        blend_mode: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a background stylesheet
    CheckCss { file: PathBuf },
    /// Inject the stylesheet import into the host settings
    Activate {
        /// Host settings file (comments and trailing commas are accepted;
        /// it is saved back as plain JSON)
        #[arg(long)]
        settings: PathBuf,
        /// Extension root holding themes/ and assets/
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Flip the background flag and sync the import
    Toggle {
        /// Host settings file (JSON with comments accepted)
        #[arg(long)]
        settings: PathBuf,
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Remove the stylesheet import from the host settings
    Deactivate {
        /// Host settings file (JSON with comments accepted)
        #[arg(long)]
        settings: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "debug"
    } else {
        "warn,kiroween=info,kw_extension=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Default directory for `check-icons`.
fn icon_dir(product: bool) -> PathBuf {
    PathBuf::from(if product { PRODUCT_ICON_DIR } else { PATTERN_ASSET_DIR })
}

/// Apply flag overrides on top of the configured tile spec.
fn tile_spec(base: TileSpec, seed: Option<u32>, grid: Option<u32>, tile_size: Option<u32>) -> TileSpec {
    TileSpec {
        seed: seed.unwrap_or(base.seed),
        grid_size: grid.unwrap_or(base.grid_size),
        tile_size: tile_size.unwrap_or(base.tile_size),
    }
}

fn run(cli: Cli) -> Result<Status> {
    let config = Config::load(cli.config.as_deref())?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Generate {
            assets_dir,
            seed,
            grid,
            tile_size,
            output,
        } => {
            let spec = tile_spec(config.pattern, seed, grid, tile_size);
            commands::generate(&spec, &assets_dir, &config.assets, output.as_deref(), &mut out)
        }
        Command::Palette => commands::palette(&mut out),
        Command::Contrast {
            foreground,
            background,
        } => commands::contrast(&foreground, &background, &mut out),
        Command::Nearest { color } => commands::nearest(&color, &mut out),
        Command::Colors { files } => commands::colors(&files, &mut out),
        Command::CheckIcons { dir, product } => {
            let dir = dir.unwrap_or_else(|| icon_dir(product));
            commands::check_icons(&dir, product, &mut out)
        }
        Command::LintSvg { files } => commands::lint(&files, &mut out),
        Command::CleanSvg { files, in_place } => commands::clean(&files, in_place, &mut out),
        Command::Css {
            opacity,
            blend_mode,
            output,
        } => {
            let mut params = config.background_css();
            if let Some(opacity) = opacity {
                params.opacity = opacity;
            }
            if let Some(blend_mode) = blend_mode {
                params.blend_mode = blend_mode;
            }
            commands::css(&params, output.as_deref(), &mut out)
        }
        Command::CheckCss { file } => commands::check_css(&file, &mut out),
        Command::Activate { settings, root } => {
            commands::activate(&root, &settings, &config.theme_id, &mut out)
        }
        Command::Toggle { settings, root } => commands::toggle(&root, &settings, &mut out),
        Command::Deactivate { settings } => commands::deactivate(&settings, &mut out),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(Status::Passed) => {}
        Ok(Status::Failed) => process::exit(1),
        Err(e) => {
            eprintln!("kiroween: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
