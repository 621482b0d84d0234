//! Edge windowing (de-click).
//!
//! A buffer started or stopped at a non-zero-crossing boundary produces an
//! audible click. Ramping the first and last `W` samples linearly to zero
//! removes the transient without touching the steady interior.

use crate::error::DspError;

/// Applies a linear fade-in/out over the first and last `window` samples.
///
/// Sample `i < window` is scaled by `i / window`; the trailing edge is
/// scaled symmetrically (the sample at distance `i` from the end by
/// `i / window`), so both endpoints land exactly on zero.
///
/// # Errors
///
/// Returns [`DspError::WindowTooLarge`] unless `window` is smaller than
/// half the buffer length; larger windows would overlap and leave no
/// steady interior to measure.
pub fn declick(samples: &mut [f64], window: usize) -> Result<(), DspError> {
    if window * 2 >= samples.len() {
        return Err(DspError::WindowTooLarge {
            window,
            len: samples.len(),
        });
    }

    let last = samples.len() - 1;
    let scale = 1.0 / window as f64;
    for i in 0..window {
        let ramp = i as f64 * scale;
        samples[i] *= ramp;
        samples[last - i] *= ramp;
    }

    Ok(())
}
