//! All-bands diagnostic sweep command.

use clap::Args;
use tracing::warn;

use oido_cal::{BAND_COUNT, frequency_of};
use oido_core::Noise;
use oido_session::{SessionConfig, condition};

#[derive(Args)]
pub struct SweepArgs {
    /// Duration of each tone in seconds
    #[arg(long, default_value = "1.0")]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: f64,

    /// Noise seed for reproducible output
    #[arg(long)]
    seed: Option<u32>,
}

pub fn run(args: SweepArgs) -> anyhow::Result<()> {
    let config = SessionConfig {
        sample_rate: args.sample_rate,
        tone_duration: args.duration,
        ..SessionConfig::default()
    };

    let mut noise = match args.seed {
        Some(seed) => Noise::with_seed(seed),
        None => Noise::new(),
    };
    let buffer = noise.generate(config.tone_duration, config.sample_rate);

    println!(
        "{:>4}  {:>10}  {:>9}  {:>9}  {:>8}  {:>4}",
        "band", "freq (Hz)", "rms (dB)", "peak (dB)", "crest", "nans"
    );

    let mut failures = 0usize;
    for band in 0..BAND_COUNT {
        let freq = frequency_of(band)?;
        match condition(&buffer, freq, &config) {
            Ok(conditioned) => {
                let d = conditioned.diagnostics;
                println!(
                    "{band:>4}  {freq:>10}  {:>9.2}  {:>9.2}  {:>8.2}  {:>4}",
                    d.rms_db, d.peak_db, d.crest_factor_db, d.nan_count
                );
            }
            Err(err) => {
                failures += 1;
                warn!(%err, band, freq, "band failed to condition");
                println!("{band:>4}  {freq:>10}  failed: {err}");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {BAND_COUNT} bands failed");
    }
    Ok(())
}
