//! Error type for session operations.

use std::path::PathBuf;
use thiserror::Error;

use oido_cal::CurveError;
use oido_core::DspError;

/// Errors that can occur while running a calibration session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A DSP step (filter design, windowing, normalization) failed.
    #[error(transparent)]
    Dsp(#[from] DspError),

    /// A calibration-curve operation failed.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Failed to read a config file.
    #[error("failed to read config '{path}': {source}")]
    ReadConfig {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse config TOML.
    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),
}
