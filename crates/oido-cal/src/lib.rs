//! Oido calibration domain.
//!
//! Everything band-indexed lives here: the canonical third-octave frequency
//! table and its nearest-band mapper, the read-only perceptual offset
//! curves, the mutable per-session calibration curve store, and the gain
//! compositor that folds user trim, perceptual correction, and output
//! headroom into one playback gain.
//!
//! Band index (0-based, 0..28) is the sole external identifier of a band;
//! frequency is always derived from the table, never stored redundantly.

pub mod bands;
pub mod curves;
pub mod error;
pub mod gain;
pub mod store;

pub use bands::{
    BAND_COUNT, FREQUENCY_TABLE, REFERENCE_FREQ, band_index_of, frequency_of, reference_band,
};
pub use curves::{EQUAL_LOUDNESS_80_PHON, HOUSE_CURVE};
pub use error::CurveError;
pub use gain::{GainMode, OUTPUT_HEADROOM_DB, reference_gain, tone_gain, tone_gain_db};
pub use store::{CalibrationCurve, CurveRecord};
