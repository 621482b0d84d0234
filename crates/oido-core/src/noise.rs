//! Broadband noise source.
//!
//! The calibration tones start from uniform white noise; per-band filtering
//! strips the out-of-band energy afterwards, so the exact distribution shape
//! is not load-bearing as long as it is broadband and zero-mean. Uniform
//! noise is preferred over Gaussian here for its lower crest factor.
//!
//! Uses a xorshift32 PRNG: cheap, allocation-free, and good enough for an
//! audio noise bed.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

#[cfg(feature = "std")]
use core::sync::atomic::{AtomicU32, Ordering};

/// Xorshift32 noise generator producing samples uniform in (-1, 1].
#[derive(Debug, Clone)]
pub struct Noise {
    state: u32,
}

impl Noise {
    /// Creates a generator from an explicit seed (deterministic).
    ///
    /// A zero seed would lock xorshift at zero forever, so it is replaced
    /// with a fixed nonzero constant.
    pub const fn with_seed(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x12345678 } else { seed },
        }
    }

    /// Creates a generator with a fresh seed.
    ///
    /// Seeds from the wall clock mixed with a process-wide counter, so
    /// generators created back-to-back within one clock tick still draw
    /// independent sequences.
    #[cfg(feature = "std")]
    pub fn new() -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(0);

        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.subsec_nanos());
        let salt = COUNTER.fetch_add(1, Ordering::Relaxed).wrapping_mul(0x9E3779B9);
        Self::with_seed(nanos ^ salt)
    }

    /// Next noise sample in (-1, 1].
    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;

        // xorshift never emits zero, so this maps onto (-1, 1] exactly
        f64::from(x) * (2.0 / f64::from(u32::MAX)) - 1.0
    }

    /// Fills a buffer of `round(duration_secs * sample_rate)` samples.
    pub fn generate(&mut self, duration_secs: f64, sample_rate: f64) -> Vec<f64> {
        let len = libm::round(duration_secs * sample_rate) as usize;
        (0..len).map(|_| self.next_sample()).collect()
    }
}

#[cfg(feature = "std")]
impl Default for Noise {
    fn default() -> Self {
        Self::new()
    }
}
