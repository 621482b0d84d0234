//! Signal conditioning: one noise buffer in, one playable band tone out.
//!
//! The fixed order of operations matters:
//!
//! 1. design and apply the third-octave band filter
//! 2. de-click the buffer edges
//! 3. measure RMS over the steady interior (the tapered edges are not
//!    representative) and peak over the full buffer
//! 4. scale everything to the target RMS
//!
//! Non-finite samples after filtering indicate instability at the
//! requested frequency. They are counted and surfaced in the
//! [`Diagnostics`], never silently masked and never fatal.

use tracing::debug;

use oido_core::{
    BandFilter, BandSpec, DspError, count_non_finite, declick, level, linear_to_db,
};

use crate::config::SessionConfig;

/// Measurements taken while conditioning one band tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    /// Interior RMS before normalization, in dBFS.
    pub rms_db: f64,
    /// Peak level after normalization, in dBFS.
    pub peak_db: f64,
    /// Peak-to-RMS ratio in dB. Band-limited noise sits around 10-14 dB.
    pub crest_factor_db: f64,
    /// Number of non-finite samples produced by the filter.
    pub nan_count: usize,
}

/// A conditioned, normalized band tone plus its measurements.
#[derive(Debug, Clone)]
pub struct Conditioned {
    /// Normalized samples, ready for gain staging and playback.
    pub samples: Vec<f64>,
    /// Level measurements for calibration and debugging.
    pub diagnostics: Diagnostics,
}

/// Renders the band tone at `center_freq` from a shared noise buffer.
///
/// The noise buffer is borrowed, not consumed: one buffer is reused for
/// both tones of a playback cycle so the reference is not re-randomized.
///
/// # Errors
///
/// - [`DspError::InvalidCutoff`] when the band cannot be realized at the
///   configured sample rate
/// - [`DspError::WindowTooLarge`] when the de-click window does not leave
///   a steady interior
/// - [`DspError::DegenerateSignal`] when the filtered buffer has zero RMS
pub fn condition(
    noise: &[f64],
    center_freq: f64,
    config: &SessionConfig,
) -> Result<Conditioned, DspError> {
    let filter = BandFilter::design(&BandSpec::third_octave(center_freq, config.sample_rate))?;
    let mut samples = filter.apply(noise);

    let window = config.declick_samples;
    declick(&mut samples, window)?;

    let nan_count = count_non_finite(&samples);
    let rms = level::rms(&samples[window..samples.len() - window]);
    let peak = level::peak(&samples);

    if rms == 0.0 {
        return Err(DspError::DegenerateSignal);
    }

    let gain = config.target_rms_linear() / rms;
    for sample in &mut samples {
        *sample *= gain;
    }

    let diagnostics = Diagnostics {
        rms_db: linear_to_db(rms),
        peak_db: linear_to_db(peak * gain),
        crest_factor_db: linear_to_db(peak / rms),
        nan_count,
    };

    debug!(
        freq = center_freq,
        peak_db = diagnostics.peak_db,
        crest_db = diagnostics.crest_factor_db,
        rms_db = diagnostics.rms_db,
        nan_count,
        "conditioned band tone"
    );

    Ok(Conditioned {
        samples,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oido_core::Noise;

    fn test_noise() -> Vec<f64> {
        Noise::with_seed(0xABCD).generate(1.0, 48000.0)
    }

    #[test]
    fn test_output_length_matches_input() {
        let noise = test_noise();
        let conditioned = condition(&noise, 1000.0, &SessionConfig::default()).unwrap();
        assert_eq!(conditioned.samples.len(), noise.len());
    }

    #[test]
    fn test_normalized_to_target_rms() {
        let config = SessionConfig::default();
        let noise = test_noise();
        let conditioned = condition(&noise, 1000.0, &config).unwrap();

        let w = config.declick_samples;
        let interior = &conditioned.samples[w..conditioned.samples.len() - w];
        let rms_db = linear_to_db(level::rms(interior));
        assert!(
            (rms_db - config.target_rms_db).abs() < 0.01,
            "normalized RMS {rms_db} dB"
        );
    }

    #[test]
    fn test_edge_ramp_law() {
        // out[j] = (j/W) * filtered[j] * gain for j < W. Reconstruct the
        // un-windowed filtered signal independently and check.
        let config = SessionConfig::default();
        let noise = test_noise();
        let conditioned = condition(&noise, 1000.0, &config).unwrap();

        let filter =
            BandFilter::design(&BandSpec::third_octave(1000.0, config.sample_rate)).unwrap();
        let filtered = filter.apply(&noise);

        // De-click only touches the edges, so the steady interior of the
        // raw filtered signal carries the same RMS the conditioner saw.
        let w = config.declick_samples;
        let rms = level::rms(&filtered[w..filtered.len() - w]);
        let gain = config.target_rms_linear() / rms;

        for j in [0, 1, w / 2, w - 1] {
            let expected = (j as f64 / w as f64) * filtered[j] * gain;
            assert!(
                (conditioned.samples[j] - expected).abs() < 1e-9,
                "ramp law broken at {j}"
            );
        }
        assert_eq!(conditioned.samples[0], 0.0);
    }

    #[test]
    fn test_silent_buffer_is_degenerate() {
        let silence = vec![0.0; 48000];
        let err = condition(&silence, 1000.0, &SessionConfig::default()).unwrap_err();
        assert_eq!(err, DspError::DegenerateSignal);
    }

    #[test]
    fn test_nyquist_violation_propagates() {
        let noise = test_noise();
        let err = condition(&noise, 22000.0, &SessionConfig::default()).unwrap_err();
        assert!(matches!(err, DspError::InvalidCutoff { .. }));
    }

    #[test]
    fn test_window_too_large_propagates() {
        let noise = Noise::with_seed(1).generate(0.02, 48000.0); // 960 samples
        let err = condition(&noise, 1000.0, &SessionConfig::default()).unwrap_err();
        assert!(matches!(err, DspError::WindowTooLarge { .. }));
    }

    #[test]
    fn test_crest_factor_positive_and_finite() {
        let noise = test_noise();
        let conditioned = condition(&noise, 1000.0, &SessionConfig::default()).unwrap();
        let crest = conditioned.diagnostics.crest_factor_db;
        assert!(crest.is_finite());
        assert!(crest > 0.0, "crest factor {crest} dB");
        assert_eq!(conditioned.diagnostics.nan_count, 0);
    }
}
