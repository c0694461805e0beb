//! Seeded linear-congruential generator.
//!
//! The classic `1103515245 · s + 12345 (mod 2³¹)` recurrence, done in
//! `u64` with the modulo applied on every step. No floating point touches
//! the seed, so the sequence is identical on every platform.

const MULTIPLIER: u64 = 1_103_515_245;
const INCREMENT: u64 = 12_345;
const MODULUS: u64 = 1 << 31;

// Second-stage mix that turns a seed into a fraction in [0, 1).
const MIX_MULTIPLIER: u64 = 9_301;
const MIX_INCREMENT: u64 = 49_297;
const MIX_MODULUS: u64 = 233_280;

/// Deterministic seed sequence, one step per grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed as u64 }
    }

    /// Advance to the next seed and return it. Always below 2³¹.
    pub const fn advance(&mut self) -> u64 {
        // state < 2³² and MULTIPLIER < 2³¹, so the product fits in u64.
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state
    }

    /// Advance and return the cell fraction for the new seed.
    pub fn next_fraction(&mut self) -> f64 {
        fraction(self.advance())
    }
}

/// `((seed · 9301 + 49297) mod 233280) / 233280`, in [0, 1).
///
/// The numerator is computed exactly in integers. Only the final division
/// is floating point.
#[must_use]
pub fn fraction(seed: u64) -> f64 {
    let numerator = (seed % MODULUS * MIX_MULTIPLIER + MIX_INCREMENT) % MIX_MODULUS;
    numerator as f64 / MIX_MODULUS as f64
}
