//! Level conversion math.
//!
//! Gains are composed in decibels (additive) throughout the calibration
//! pipeline and converted to linear multipliers only at the point where
//! they touch a sample stream. These two functions are that boundary.

use libm::{exp, log};

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Returns
/// Linear gain value (e.g., 0 dB → 1.0, -20 dB → 0.1, +6 dB → 2.0)
///
/// # Example
/// ```rust
/// use oido_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-12);
/// assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-12);
/// ```
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f64 = core::f64::consts::LN_10 / 20.0;
    exp(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Defined for positive inputs; values at or below zero are clamped to a
/// floor of roughly -240 dB so diagnostics never produce NaN. Callers that
/// must treat zero as an error (e.g. normalization) check before calling.
///
/// # Example
/// ```rust
/// use oido_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 1e-12);
/// assert!((linear_to_db(0.1) + 20.0).abs() < 1e-12);
/// ```
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    // 20 * log10(x) = 20 * ln(x) / ln(10)
    const FACTOR: f64 = 20.0 / core::f64::consts::LN_10;
    log(linear.max(1e-12)) * FACTOR
}
