//! Calibration curve store.
//!
//! Holds the user's per-band trim values for one session. Trims live in
//! "user adjustment" sign convention: the value the listener dialed in to
//! make the band match the reference. The exported record is the *error*
//! to correct (the negated trim) and import negates back, so export then
//! import is the identity. Both inversions live here; no collaborator
//! ever touches the sign rule.

use serde::{Deserialize, Serialize};

use crate::bands::{BAND_COUNT, FREQUENCY_TABLE};
use crate::error::CurveError;

/// One exported curve row: a band center and its error level in dB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveRecord {
    /// Band center frequency in Hz.
    pub frequency: f64,
    /// Response error at that band in dB (negated trim).
    pub level_db: f64,
}

/// Number of low bands seeded with a starting bias.
const SEEDED_LOW_BANDS: usize = 6;

/// Starting trim for the seeded low bands, in dB.
const LOW_BAND_SEED_DB: f64 = -6.0;

/// The per-session 28-band trim curve.
///
/// The only mutable shared state in the core. Always exactly
/// [`BAND_COUNT`] entries; imports of any other length are rejected whole.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationCurve {
    trims: [f64; BAND_COUNT],
}

impl CalibrationCurve {
    /// A fresh session curve.
    ///
    /// The six lowest bands start at -6 dB; headphone low-frequency
    /// roll-off lands them near there for almost every listener.
    pub fn new() -> Self {
        let mut trims = [0.0; BAND_COUNT];
        for trim in trims.iter_mut().take(SEEDED_LOW_BANDS) {
            *trim = LOW_BAND_SEED_DB;
        }
        Self { trims }
    }

    /// An all-zero curve.
    pub fn flat() -> Self {
        Self {
            trims: [0.0; BAND_COUNT],
        }
    }

    /// Stored trim for `band`, in dB.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::OutOfRange`] for an invalid band index.
    pub fn get(&self, band: usize) -> Result<f64, CurveError> {
        self.trims
            .get(band)
            .copied()
            .ok_or(CurveError::OutOfRange {
                index: band,
                count: BAND_COUNT,
            })
    }

    /// Overwrites the trim for `band`.
    ///
    /// No range clamp beyond the caller's UI; any finite dB value is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::OutOfRange`] for an invalid band index and
    /// [`CurveError::InvalidValue`] for NaN or infinite trims.
    pub fn set(&mut self, band: usize, trim_db: f64) -> Result<(), CurveError> {
        if !trim_db.is_finite() {
            return Err(CurveError::InvalidValue { value: trim_db });
        }
        let slot = self
            .trims
            .get_mut(band)
            .ok_or(CurveError::OutOfRange {
                index: band,
                count: BAND_COUNT,
            })?;
        *slot = trim_db;
        Ok(())
    }

    /// All trims in band order.
    pub fn trims(&self) -> &[f64; BAND_COUNT] {
        &self.trims
    }

    /// The curve as exportable records, ascending by band.
    ///
    /// Levels are negated trims: the response *error* the playback EQ
    /// should correct.
    pub fn export_records(&self) -> Vec<CurveRecord> {
        FREQUENCY_TABLE
            .iter()
            .zip(self.trims.iter())
            .map(|(&frequency, &trim)| CurveRecord {
                frequency,
                level_db: -trim,
            })
            .collect()
    }

    /// Replaces the whole curve from exported records.
    ///
    /// Atomic: on any error the existing curve is left fully intact.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::LengthMismatch`] unless exactly
    /// [`BAND_COUNT`] records are supplied, and
    /// [`CurveError::InvalidValue`] when any level is non-finite.
    pub fn import_records(&mut self, records: &[CurveRecord]) -> Result<(), CurveError> {
        if records.len() != BAND_COUNT {
            return Err(CurveError::LengthMismatch {
                expected: BAND_COUNT,
                actual: records.len(),
            });
        }

        let mut trims = [0.0; BAND_COUNT];
        for (slot, record) in trims.iter_mut().zip(records) {
            if !record.level_db.is_finite() {
                return Err(CurveError::InvalidValue {
                    value: record.level_db,
                });
            }
            *slot = -record.level_db;
        }

        self.trims = trims;
        Ok(())
    }
}

impl Default for CalibrationCurve {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_low_bands() {
        let curve = CalibrationCurve::new();
        for band in 0..SEEDED_LOW_BANDS {
            assert_eq!(curve.get(band).unwrap(), -6.0);
        }
        for band in SEEDED_LOW_BANDS..BAND_COUNT {
            assert_eq!(curve.get(band).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_flat_is_all_zero() {
        let curve = CalibrationCurve::flat();
        assert!(curve.trims().iter().all(|&t| t == 0.0));
    }

    #[test]
    fn test_set_get() {
        let mut curve = CalibrationCurve::flat();
        curve.set(15, 3.5).unwrap();
        assert_eq!(curve.get(15).unwrap(), 3.5);
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        let mut curve = CalibrationCurve::flat();
        assert!(matches!(
            curve.set(BAND_COUNT, 0.0),
            Err(CurveError::OutOfRange { .. })
        ));
        assert!(matches!(
            curve.get(BAND_COUNT),
            Err(CurveError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_set_rejects_non_finite() {
        let mut curve = CalibrationCurve::flat();
        assert!(matches!(
            curve.set(0, f64::NAN),
            Err(CurveError::InvalidValue { .. })
        ));
        assert!(matches!(
            curve.set(0, f64::NEG_INFINITY),
            Err(CurveError::InvalidValue { .. })
        ));
        // the failed set left the slot untouched
        assert_eq!(curve.get(0).unwrap(), 0.0);
    }

    #[test]
    fn test_export_negates_trims() {
        let mut curve = CalibrationCurve::flat();
        curve.set(10, 4.0).unwrap();
        let records = curve.export_records();
        assert_eq!(records.len(), BAND_COUNT);
        assert_eq!(records[10].frequency, FREQUENCY_TABLE[10]);
        assert_eq!(records[10].level_db, -4.0);
    }

    #[test]
    fn test_export_import_roundtrip() {
        let mut original = CalibrationCurve::new();
        original.set(3, 2.5).unwrap();
        original.set(20, -7.25).unwrap();

        let mut restored = CalibrationCurve::flat();
        restored.import_records(&original.export_records()).unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn test_import_length_mismatch_leaves_curve_intact() {
        let mut curve = CalibrationCurve::flat();
        curve.set(5, 1.5).unwrap();
        let before = curve.clone();

        let short: Vec<CurveRecord> = curve.export_records().into_iter().take(27).collect();
        let err = curve.import_records(&short).unwrap_err();

        assert_eq!(
            err,
            CurveError::LengthMismatch {
                expected: 28,
                actual: 27
            }
        );
        assert_eq!(curve, before);
    }

    #[test]
    fn test_import_non_finite_is_atomic() {
        let mut curve = CalibrationCurve::new();
        let before = curve.clone();

        let mut records = curve.export_records();
        records[27].level_db = f64::NAN;
        let err = curve.import_records(&records).unwrap_err();

        assert!(matches!(err, CurveError::InvalidValue { .. }));
        // nothing was overwritten, not even the valid leading records
        assert_eq!(curve, before);
    }
}
