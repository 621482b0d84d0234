//! Oido Core - DSP primitives for loudness calibration
//!
//! This crate provides the signal-processing building blocks used by the
//! oido calibration pipeline: band-limited noise synthesis, Butterworth
//! band filter design, edge windowing, and level measurement.
//!
//! # Core Abstractions
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order IIR section with RBJ cookbook coefficients
//! - [`BandSpec`] - Pure-data description of a third-octave band filter
//! - [`BandFilter`] - Designed highpass+lowpass Butterworth cascade
//!
//! ## Signal Conditioning
//!
//! - [`Noise`] - Broadband noise source (xorshift PRNG)
//! - [`declick`] - Linear fade-in/out edge window
//! - Level measurement: [`rms`], [`peak`], [`count_non_finite`]
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`]
//!
//! # Sample Format
//!
//! All processing is `f64`. The band cascades run 12th-order Butterworth
//! stages down to 28 Hz at 48 kHz; single precision does not leave enough
//! coefficient headroom there.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! oido-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod cascade;
pub mod error;
pub mod level;
pub mod math;
pub mod noise;
pub mod window;

// Re-export main types at crate root
pub use biquad::{Biquad, Coefficients};
pub use cascade::{BANDWIDTH_RATIO, BandFilter, BandSpec, STAGE_ORDER};
pub use error::DspError;
pub use level::{count_non_finite, peak, rms};
pub use math::{db_to_linear, linear_to_db};
pub use noise::Noise;
pub use window::declick;
