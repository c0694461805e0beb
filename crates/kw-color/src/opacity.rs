//! Background overlay opacity bounds.
//!
//! The pattern has to stay a faint texture behind code, so its overlay
//! opacity lives in a narrow band. Callers pick between rejecting values
//! outside the band ([`is_opacity_valid`]) and pulling them back inside
//! ([`clamp_opacity`]).

use crate::error::ColorError;

pub const OPACITY_MIN: f64 = 0.02;
pub const OPACITY_MAX: f64 = 0.08;

/// Clamp `value` into [`OPACITY_MIN`, `OPACITY_MAX`].
///
/// # Errors
///
/// Returns [`ColorError::InvalidOpacity`] if `value` is NaN or infinite.
pub fn clamp_opacity(value: f64) -> Result<f64, ColorError> {
    if !value.is_finite() {
        return Err(ColorError::InvalidOpacity(value.to_string()));
    }
    Ok(value.clamp(OPACITY_MIN, OPACITY_MAX))
}

/// Inclusive range check, no clamping.
#[must_use]
pub fn is_opacity_valid(value: f64) -> bool {
    (OPACITY_MIN..=OPACITY_MAX).contains(&value)
}

/// Parse opacity text such as `"0.05"`.
///
/// # Errors
///
/// Returns [`ColorError::InvalidOpacity`] unless the text is a finite number.
pub fn parse_opacity(text: &str) -> Result<f64, ColorError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ColorError::InvalidOpacity(text.to_string()))
}
