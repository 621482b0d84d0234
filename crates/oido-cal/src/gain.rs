//! Loudness and gain composition.
//!
//! Gains are composed additively in dB and converted to a linear multiplier
//! exactly once, here, at the end of the chain:
//!
//! ```text
//! gain_dB = user_trim
//!         + (perceptual ? equal_loudness[band] - house_curve[band] : 0)
//!         + OUTPUT_HEADROOM_DB
//! ```
//!
//! The reference tone is the fixed anchor the variable tone is judged
//! against: it takes only the headroom bias, never user trim or perceptual
//! offsets.

use oido_core::db_to_linear;

use crate::bands::BAND_COUNT;
use crate::curves::{EQUAL_LOUDNESS_80_PHON, HOUSE_CURVE};
use crate::error::CurveError;

/// Fixed negative output bias in dB, applied uniformly to both tones.
///
/// Guards against clipping when the normalized (-20 dBFS RMS) reference and
/// variable tones are audible back to back with positive trims in play.
pub const OUTPUT_HEADROOM_DB: f64 = -8.0;

/// Whether the variable tone carries perceptual loudness compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GainMode {
    /// Raw A/B comparison: user trim and headroom only.
    Raw,
    /// Weight the trim by the equal-loudness contour minus the house curve.
    #[default]
    Perceptual,
}

/// Composed gain for the variable (test) tone, in dB.
///
/// # Errors
///
/// Returns [`CurveError::OutOfRange`] for an invalid band index and
/// [`CurveError::InvalidValue`] for a non-finite trim.
pub fn tone_gain_db(band: usize, trim_db: f64, mode: GainMode) -> Result<f64, CurveError> {
    if band >= BAND_COUNT {
        return Err(CurveError::OutOfRange {
            index: band,
            count: BAND_COUNT,
        });
    }
    if !trim_db.is_finite() {
        return Err(CurveError::InvalidValue { value: trim_db });
    }

    let perceptual = match mode {
        GainMode::Raw => 0.0,
        GainMode::Perceptual => EQUAL_LOUDNESS_80_PHON[band] - HOUSE_CURVE[band],
    };

    Ok(trim_db + perceptual + OUTPUT_HEADROOM_DB)
}

/// Composed linear gain for the variable tone.
///
/// The single place the composed dB value becomes a sample multiplier.
pub fn tone_gain(band: usize, trim_db: f64, mode: GainMode) -> Result<f64, CurveError> {
    tone_gain_db(band, trim_db, mode).map(db_to_linear)
}

/// Linear gain for the fixed reference tone (headroom only).
pub fn reference_gain() -> f64 {
    db_to_linear(OUTPUT_HEADROOM_DB)
}
