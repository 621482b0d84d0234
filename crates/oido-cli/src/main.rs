//! Oido CLI - equal-loudness headphone calibration from the command line.

mod commands;
mod curve_file;
mod wav;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oido")]
#[command(author, version, about = "Oido equal-loudness calibration CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the third-octave calibration bands
    Bands(commands::bands::BandsArgs),

    /// Render one band tone to a WAV file
    Render(commands::render::RenderArgs),

    /// Condition every band and report level diagnostics
    Sweep(commands::sweep::SweepArgs),

    /// Create, inspect and convert calibration curve files
    Curve(commands::curve::CurveArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bands(args) => commands::bands::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Sweep(args) => commands::sweep::run(args),
        Commands::Curve(args) => commands::curve::run(args),
    }
}
