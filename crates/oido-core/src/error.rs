//! Error types for DSP operations.

/// Errors that can occur while designing or conditioning a band signal.
///
/// All variants are local, recoverable conditions: a failed band leaves the
/// rest of the pipeline (and any stored calibration data) untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DspError {
    /// The requested band cutoffs cannot be realized at this sample rate.
    InvalidCutoff {
        /// Highpass cutoff in Hz.
        lower: f64,
        /// Lowpass cutoff in Hz.
        upper: f64,
        /// Nyquist frequency (half the sample rate) in Hz.
        nyquist: f64,
    },
    /// The de-click window does not leave a steady interior.
    WindowTooLarge {
        /// Requested window length in samples.
        window: usize,
        /// Buffer length in samples.
        len: usize,
    },
    /// The signal has zero RMS and cannot be normalized.
    DegenerateSignal,
}

impl core::fmt::Display for DspError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidCutoff {
                lower,
                upper,
                nyquist,
            } => write!(
                f,
                "band cutoffs {lower:.2}..{upper:.2} Hz outside (0, {nyquist:.0}) Hz"
            ),
            Self::WindowTooLarge { window, len } => write!(
                f,
                "de-click window of {window} samples too large for a {len}-sample buffer"
            ),
            Self::DegenerateSignal => write!(f, "signal has zero RMS, cannot normalize"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DspError {}
