//! WAV output for rendered tones.

use std::path::Path;

use anyhow::Context;
use hound::{SampleFormat, WavWriter};

/// Writes mono samples as 32-bit IEEE float WAV.
///
/// Samples are stored as f64 in the pipeline; the file narrows to f32,
/// which keeps more headroom than any calibration tone needs.
pub fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) -> anyhow::Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("failed to create '{}'", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }
    writer
        .finalize()
        .with_context(|| format!("failed to finalize '{}'", path.display()))?;
    Ok(())
}
