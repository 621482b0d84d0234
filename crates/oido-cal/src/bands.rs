//! Canonical third-octave band table and index mapping.

use crate::error::CurveError;

/// Number of calibration bands.
pub const BAND_COUNT: usize = 28;

/// ANSI base-10 third-octave center frequencies in Hz.
///
/// Fixed for the process lifetime; every 28-entry curve in this workspace
/// is aligned index-for-index with this table.
pub const FREQUENCY_TABLE: [f64; BAND_COUNT] = [
    31.5, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 315.0, 400.0, 500.0, 630.0,
    800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3150.0, 4000.0, 5000.0, 6300.0, 8000.0,
    10000.0, 12500.0, 16000.0,
];

/// Frequency of the fixed reference tone in Hz.
pub const REFERENCE_FREQ: f64 = 500.0;

/// Center frequency of the band at `index`.
///
/// # Errors
///
/// Returns [`CurveError::OutOfRange`] when `index >= BAND_COUNT`.
pub fn frequency_of(index: usize) -> Result<f64, CurveError> {
    FREQUENCY_TABLE
        .get(index)
        .copied()
        .ok_or(CurveError::OutOfRange {
            index,
            count: BAND_COUNT,
        })
}

/// Index of the band whose center is nearest to `freq`.
///
/// Ties resolve to the lower index (the first minimum found scanning
/// ascending). Total: the table is non-empty, so some index always wins.
/// The tie-break is observable behavior (callers re-derive band indices
/// from arbitrary frequencies with it) and is pinned by a unit test.
pub fn band_index_of(freq: f64) -> usize {
    let mut closest = 0;
    let mut min_diff = (FREQUENCY_TABLE[0] - freq).abs();

    for (i, &center) in FREQUENCY_TABLE.iter().enumerate().skip(1) {
        let diff = (center - freq).abs();
        if diff < min_diff {
            min_diff = diff;
            closest = i;
        }
    }
    closest
}

/// Band index of the reference tone.
pub fn reference_band() -> usize {
    band_index_of(REFERENCE_FREQ)
}
