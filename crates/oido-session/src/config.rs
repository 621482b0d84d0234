//! Session configuration.
//!
//! The processing constants of the pipeline, loadable from TOML. Defaults
//! reproduce the canonical calibration setup: one-second tones at 48 kHz,
//! a 720-sample de-click window, a -20 dBFS RMS target, and perceptual
//! correction enabled. Output headroom is not configurable; it is a
//! compositor constant ([`oido_cal::OUTPUT_HEADROOM_DB`]) applied to both
//! tones.

use std::path::Path;

use serde::{Deserialize, Serialize};

use oido_cal::GainMode;
use oido_core::db_to_linear;

use crate::error::SessionError;

/// Processing constants for one calibration session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Processing sample rate in Hz.
    pub sample_rate: f64,
    /// Duration of each tone buffer in seconds.
    pub tone_duration: f64,
    /// De-click edge window length in samples.
    pub declick_samples: usize,
    /// Normalization target in dBFS RMS.
    pub target_rms_db: f64,
    /// Whether the variable tone carries perceptual loudness compensation.
    pub perceptual_correction: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            tone_duration: 1.0,
            declick_samples: 720,
            target_rms_db: -20.0,
            perceptual_correction: true,
        }
    }
}

impl SessionConfig {
    /// Loads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ReadConfig`] when the file cannot be read
    /// and [`SessionError::ParseConfig`] for malformed TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(text)?)
    }

    /// The gain mode implied by `perceptual_correction`.
    pub fn gain_mode(&self) -> GainMode {
        if self.perceptual_correction {
            GainMode::Perceptual
        } else {
            GainMode::Raw
        }
    }

    /// The RMS normalization target as a linear level.
    pub fn target_rms_linear(&self) -> f64 {
        db_to_linear(self.target_rms_db)
    }
}
