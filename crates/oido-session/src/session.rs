//! Session facade: one calibration run's config and curve.

use tracing::info;

use oido_cal::{
    CalibrationCurve, CurveRecord, band_index_of, frequency_of, tone_gain_db,
};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::playback::{AudioSink, PlaybackLoop};

/// One band's user-facing view: table frequency, current trim, and the
/// composed playback gain in dB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandView {
    /// Canonical center frequency in Hz.
    pub frequency: f64,
    /// User trim in dB.
    pub trim_db: f64,
    /// Composed gain the variable tone would play at, in dB.
    pub gain_db: f64,
}

/// A calibration session: configuration plus the curve being shaped.
///
/// The curve starts from the seeded defaults and accumulates user trims
/// until exported. [`Session`] is the unit a UI or CLI front end holds on
/// to; playback loops are spawned from it and borrow the curve per event.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    curve: CalibrationCurve,
}

impl Session {
    /// Opens a session with the seeded default curve.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            curve: CalibrationCurve::new(),
        }
    }

    /// The session's processing constants.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The curve being shaped.
    pub fn curve(&self) -> &CalibrationCurve {
        &self.curve
    }

    /// Sets the trim for `band` in dB.
    ///
    /// # Errors
    ///
    /// Rejects out-of-range bands and non-finite trims; the curve is
    /// unchanged on error.
    pub fn set_trim(&mut self, band: usize, trim_db: f64) -> Result<(), SessionError> {
        self.curve.set(band, trim_db)?;
        Ok(())
    }

    /// Reads the trim for `band` in dB.
    ///
    /// # Errors
    ///
    /// Rejects out-of-range bands.
    pub fn trim(&self, band: usize) -> Result<f64, SessionError> {
        Ok(self.curve.get(band)?)
    }

    /// The display view for `band`: frequency, trim, and composed gain.
    ///
    /// # Errors
    ///
    /// Rejects out-of-range bands.
    pub fn band_view(&self, band: usize) -> Result<BandView, SessionError> {
        let frequency = frequency_of(band)?;
        let trim_db = self.curve.get(band)?;
        let gain_db = tone_gain_db(band, trim_db, self.config.gain_mode())?;
        Ok(BandView {
            frequency,
            trim_db,
            gain_db,
        })
    }

    /// The band index whose table frequency is nearest `freq`.
    pub fn band_for_frequency(&self, freq: f64) -> usize {
        band_index_of(freq)
    }

    /// Exports the curve as error-curve records, ready for serialization.
    pub fn export(&self) -> Vec<CurveRecord> {
        info!("exporting calibration curve");
        self.curve.export_records()
    }

    /// Replaces the curve from imported error-curve records.
    ///
    /// All-or-nothing: a malformed record set leaves the current curve
    /// untouched.
    ///
    /// # Errors
    ///
    /// Rejects record sets with the wrong length or non-finite levels.
    pub fn import(&mut self, records: &[CurveRecord]) -> Result<(), SessionError> {
        self.curve.import_records(records)?;
        info!("imported calibration curve");
        Ok(())
    }

    /// Spawns an idle playback loop over `sink` sharing this session's
    /// config.
    pub fn playback<S: AudioSink>(&self, sink: S) -> PlaybackLoop<S> {
        PlaybackLoop::new(self.config.clone(), sink)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
