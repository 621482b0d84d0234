//! Band table listing command.

use clap::Args;

use oido_cal::{BAND_COUNT, frequency_of, reference_band};

#[derive(Args)]
pub struct BandsArgs {}

pub fn run(_args: BandsArgs) -> anyhow::Result<()> {
    println!("{:>4}  {:>10}", "band", "freq (Hz)");
    for band in 0..BAND_COUNT {
        let freq = frequency_of(band)?;
        let marker = if band == reference_band() {
            "  (reference)"
        } else {
            ""
        };
        println!("{band:>4}  {freq:>10}{marker}");
    }
    Ok(())
}
