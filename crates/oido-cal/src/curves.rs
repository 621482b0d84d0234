//! Perceptual offset curves.
//!
//! Fixed dB-offset tables aligned index-for-index with
//! [`FREQUENCY_TABLE`](crate::bands::FREQUENCY_TABLE). They are sampled at
//! the 28 band centers and selected by configuration, never mutated by the
//! user.

use crate::bands::BAND_COUNT;

/// 80-phon equal-loudness contour sampled at the band centers, in dB.
///
/// Offsets describe how much more level a band needs than 500 Hz to sound
/// equally loud at an 80-phon listening level. This is the canonical table;
/// an earlier revision with a steeper low-frequency tilt was superseded.
pub const EQUAL_LOUDNESS_80_PHON: [f64; BAND_COUNT] = [
    21.8, 20.8, 18.8, 17.5, 14.3, 11.6, 9.2, 6.9, 5.0, 3.4, 2.0, 0.8, 0.0, -0.7, -1.2, -0.9, 1.6,
    2.8, -0.3, -3.0, -3.8, -2.6, 0.7, 5.9, 10.5, 10.8, 4.5, 3.8,
];

/// Harman-style headphone house target at the band centers, in dB.
///
/// Subtracted from the equal-loudness offset so the correction aims at the
/// preferred listening tilt rather than a ruler-flat response.
pub const HOUSE_CURVE: [f64; BAND_COUNT] = [
    6.4, 6.4, 6.2, 5.9, 5.0, 3.8, 2.6, 1.5, 0.9, 0.7, 0.5, 0.4, 0.3, 0.3, 0.1, 0.0, -0.1, -0.3,
    -0.4, -0.5, -0.7, -0.9, -1.0, -1.2, -1.4, -1.6, -1.9, -2.2,
];
