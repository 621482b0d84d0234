//! Calibration curve file commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use tracing::debug;

use oido_cal::CalibrationCurve;

use crate::curve_file;

#[derive(Args)]
pub struct CurveArgs {
    #[command(subcommand)]
    command: CurveCommand,
}

#[derive(Subcommand)]
enum CurveCommand {
    /// Write the seeded default curve to a file
    Init {
        /// Output curve file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Print a curve file as bands, trims and error levels
    Show {
        /// Input curve file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Validate a curve file and re-emit it in canonical form
    Rewrite {
        /// Input curve file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output curve file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

pub fn run(args: CurveArgs) -> anyhow::Result<()> {
    match args.command {
        CurveCommand::Init { output } => {
            let curve = CalibrationCurve::new();
            let text = curve_file::to_text(&curve.export_records());
            std::fs::write(&output, text)?;
            println!("Wrote default curve to {}", output.display());
        }

        CurveCommand::Show { input } => {
            let curve = load_curve(&input)?;
            println!("{:>4}  {:>10}  {:>9}  {:>10}", "band", "freq (Hz)", "trim (dB)", "level (dB)");
            for (band, record) in curve.export_records().iter().enumerate() {
                let trim = curve.get(band)?;
                println!(
                    "{band:>4}  {:>10}  {trim:>9.2}  {:>10.2}",
                    record.frequency, record.level_db
                );
            }
        }

        CurveCommand::Rewrite { input, output } => {
            let curve = load_curve(&input)?;
            let text = curve_file::to_text(&curve.export_records());
            std::fs::write(&output, text)?;
            println!("Rewrote {} to {}", input.display(), output.display());
        }
    }

    Ok(())
}

fn load_curve(path: &Path) -> anyhow::Result<CalibrationCurve> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| anyhow::anyhow!("failed to read '{}': {err}", path.display()))?;
    let records = curve_file::from_text(&text)?;
    debug!(records = records.len(), path = %path.display(), "loaded curve file");
    let mut curve = CalibrationCurve::flat();
    curve.import_records(&records)?;
    Ok(curve)
}
