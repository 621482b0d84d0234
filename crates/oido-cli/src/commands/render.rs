//! Single band tone rendering command.

use std::path::PathBuf;

use clap::Args;

use tracing::debug;

use oido_cal::{GainMode, frequency_of, tone_gain};
use oido_core::Noise;
use oido_session::{SessionConfig, condition};

use crate::wav::write_wav;

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Band index (0-27)
    #[arg(long, default_value = "15")]
    band: usize,

    /// User trim in dB
    #[arg(long, default_value = "0.0")]
    trim: f64,

    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: f64,

    /// Skip perceptual loudness compensation
    #[arg(long)]
    raw: bool,

    /// Noise seed for reproducible output
    #[arg(long)]
    seed: Option<u32>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let config = SessionConfig {
        sample_rate: args.sample_rate,
        tone_duration: args.duration,
        perceptual_correction: !args.raw,
        ..SessionConfig::default()
    };

    let freq = frequency_of(args.band)?;
    debug!(
        band = args.band,
        freq,
        trim = args.trim,
        raw = args.raw,
        "rendering band tone"
    );
    println!("Rendering band {} ({} Hz)...", args.band, freq);

    let mut noise = match args.seed {
        Some(seed) => Noise::with_seed(seed),
        None => Noise::new(),
    };
    let buffer = noise.generate(config.tone_duration, config.sample_rate);

    let conditioned = condition(&buffer, freq, &config)?;
    let mode = if args.raw {
        GainMode::Raw
    } else {
        GainMode::Perceptual
    };
    let gain = tone_gain(args.band, args.trim, mode)?;
    let samples: Vec<f64> = conditioned.samples.iter().map(|s| s * gain).collect();

    write_wav(&args.output, &samples, config.sample_rate as u32)?;

    let d = conditioned.diagnostics;
    println!("  RMS:   {:.2} dBFS (pre-gain)", d.rms_db);
    println!("  Peak:  {:.2} dBFS (pre-gain)", d.peak_db);
    println!("  Crest: {:.2} dB", d.crest_factor_db);
    if d.nan_count > 0 {
        println!("  WARNING: {} non-finite samples", d.nan_count);
    }
    println!(
        "Wrote {} samples to {}",
        samples.len(),
        args.output.display()
    );
    Ok(())
}
