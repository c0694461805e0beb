//! One function per subcommand.
//!
//! Commands write their report to `out` and return whether the things they
//! checked passed. An `Err` means the command couldn't run at all.

use std::io::Write;
use std::path::{Path, PathBuf};

use kw_color::{MIN_CONTRAST_RATIO, Palette, Rgb, contrast_ratio, extract_color_tokens, relative_luminance};
use kw_extension::activation::{self, Activation};
use kw_extension::assets::{self, PATTERN_ASSETS, PRODUCT_ICONS, read_text, write_text};
use kw_extension::css::{BackgroundCss, check_stylesheet};
use kw_extension::icons::{check_icon, strip_comments};
use kw_extension::lint::lint_svg;
use kw_extension::HostSettings;
use kw_pattern::TileSpec;
use tracing::info;

use crate::error::Result;

/// Whether a command's checks held up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Passed,
    Failed,
}

impl Status {
    const fn from_passed(passed: bool) -> Self {
        if passed { Self::Passed } else { Self::Failed }
    }
}

/// Where rendered text goes: a file, or `out` when no path is given.
fn emit(output: Option<&Path>, text: &str, out: &mut impl Write) -> Result<()> {
    match output {
        Some(path) => write_text(path, text)?,
        None => writeln!(out, "{text}")?,
    }
    Ok(())
}

// ─── Pattern ────────────────────────────────────────────────────────────────

pub fn generate(
    spec: &TileSpec,
    assets_dir: &Path,
    names: &[String],
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<Status> {
    let library = assets::load_library(assets_dir, names)?;
    let tile = kw_pattern::generate(spec, &library, Palette::kiroween())?;
    emit(output, &tile.to_svg(), out)?;
    Ok(Status::Passed)
}

// ─── Colors ─────────────────────────────────────────────────────────────────

pub fn palette(out: &mut impl Write) -> Result<Status> {
    for entry in Palette::kiroween() {
        writeln!(
            out,
            "{:<14} {}  luminance {:.4}",
            entry.name,
            entry.color,
            relative_luminance(entry.color)
        )?;
    }
    Ok(Status::Passed)
}

/// Fails when the pair is below the WCAG AA text minimum.
pub fn contrast(fg: &str, bg: &str, out: &mut impl Write) -> Result<Status> {
    let ratio = contrast_ratio(Rgb::parse(fg)?, Rgb::parse(bg)?);
    let passed = ratio >= MIN_CONTRAST_RATIO;
    let verdict = if passed { "passes" } else { "fails" };
    writeln!(out, "{ratio:.2}:1 ({verdict} AA {MIN_CONTRAST_RATIO}:1)")?;
    Ok(Status::from_passed(passed))
}

pub fn nearest(color: &str, out: &mut impl Write) -> Result<Status> {
    let color = Rgb::parse(color)?;
    if let Some(m) = Palette::kiroween().nearest(color) {
        writeln!(out, "{} {} (distance {:.2})", m.name, m.color, m.distance)?;
    }
    Ok(Status::Passed)
}

/// Fails if any file hard-codes a color outside the palette.
pub fn colors(files: &[PathBuf], out: &mut impl Write) -> Result<Status> {
    let palette = Palette::kiroween();
    let mut passed = true;
    for file in files {
        let tokens = extract_color_tokens(&read_text(file)?);
        let foreign = palette.validate_colors(&tokens);
        if foreign.is_empty() {
            writeln!(out, "ok   {} ({} colors)", file.display(), tokens.len())?;
        } else {
            passed = false;
            writeln!(out, "FAIL {}: {}", file.display(), foreign.join(", "))?;
        }
    }
    Ok(Status::from_passed(passed))
}

// ─── SVG ────────────────────────────────────────────────────────────────────

/// Check the pattern icons (or the product icons) in `dir`.
pub fn check_icons(dir: &Path, product: bool, out: &mut impl Write) -> Result<Status> {
    let names: &[&str] = if product { &PRODUCT_ICONS } else { &PATTERN_ASSETS };
    let palette = Palette::kiroween();
    let mut passed = true;

    for name in names {
        let path = dir.join(name);
        if !path.is_file() {
            passed = false;
            writeln!(out, "FAIL {name}: missing")?;
            continue;
        }
        let report = check_icon(&read_text(&path)?, palette);
        if report.passed() {
            writeln!(out, "ok   {name}")?;
            continue;
        }
        passed = false;
        let mut problems: Vec<String> = Vec::new();
        if !report.has_root {
            problems.push("no <svg> root".to_string());
        }
        problems.extend(report.missing().iter().map(|flag| format!("needs {}", flag.describe())));
        if !report.foreign_colors.is_empty() {
            problems.push(format!("off-palette {}", report.foreign_colors.join(" ")));
        }
        writeln!(out, "FAIL {name}: {}", problems.join("; "))?;
    }
    Ok(Status::from_passed(passed))
}

/// Fails if any file has lint errors; warnings are only reported.
pub fn lint(files: &[PathBuf], out: &mut impl Write) -> Result<Status> {
    let mut passed = true;
    for file in files {
        let report = lint_svg(&read_text(file)?);
        for finding in &report.errors {
            writeln!(out, "{}: error: {finding}", file.display())?;
        }
        for finding in &report.warnings {
            writeln!(out, "{}: warning: {finding}", file.display())?;
        }
        if report.is_clean() {
            writeln!(out, "{}: ok", file.display())?;
        }
        passed &= report.passed();
    }
    Ok(Status::from_passed(passed))
}

/// Strip comments, rewriting the files in place or printing the result.
pub fn clean(files: &[PathBuf], in_place: bool, out: &mut impl Write) -> Result<Status> {
    for file in files {
        let text = read_text(file)?;
        let cleaned = strip_comments(&text);
        if !in_place {
            writeln!(out, "{cleaned}")?;
        } else if cleaned != text {
            write_text(file, &cleaned)?;
        } else {
            info!(path = %file.display(), "no comments to strip");
        }
    }
    Ok(Status::Passed)
}

// ─── Stylesheet ─────────────────────────────────────────────────────────────

pub fn css(params: &BackgroundCss, output: Option<&Path>, out: &mut impl Write) -> Result<Status> {
    emit(output, &params.render()?, out)?;
    Ok(Status::Passed)
}

pub fn check_css(file: &Path, out: &mut impl Write) -> Result<Status> {
    let report = check_stylesheet(&read_text(file)?);
    for check in &report.checks {
        let mark = if check.passed { "ok  " } else { "FAIL" };
        writeln!(out, "{mark} {}: {}", check.name, check.detail)?;
    }
    Ok(Status::from_passed(report.passed()))
}

// ─── Host settings ──────────────────────────────────────────────────────────

/// Inject the stylesheet import when everything is in place.
///
/// A disabled background or another active theme is not a failure; missing
/// assets are.
pub fn activate(root: &Path, settings_path: &Path, theme_id: &str, out: &mut impl Write) -> Result<Status> {
    let mut settings = HostSettings::load(settings_path)?;
    let plan = activation::plan(root, &settings, theme_id);
    writeln!(out, "{plan}")?;
    match plan {
        Activation::Inject { uri } => {
            if activation::apply_injection(&mut settings, &uri)? {
                settings.save(settings_path)?;
            } else {
                writeln!(out, "already imported")?;
            }
            Ok(Status::Passed)
        }
        Activation::MissingAssets(_) => Ok(Status::Failed),
        Activation::Disabled | Activation::ThemeInactive => Ok(Status::Passed),
    }
}

pub fn toggle(root: &Path, settings_path: &Path, out: &mut impl Write) -> Result<Status> {
    let mut settings = HostSettings::load(settings_path)?;
    let enabled = activation::toggle(&mut settings, root)?;
    settings.save(settings_path)?;
    writeln!(out, "background {}", if enabled { "enabled" } else { "disabled" })?;
    Ok(Status::Passed)
}

pub fn deactivate(settings_path: &Path, out: &mut impl Write) -> Result<Status> {
    let mut settings = HostSettings::load(settings_path)?;
    if activation::remove_injection(&mut settings)? {
        settings.save(settings_path)?;
        writeln!(out, "stylesheet import removed")?;
    } else {
        writeln!(out, "no stylesheet import to remove")?;
    }
    Ok(Status::Passed)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
