//! Level measurement: RMS, peak, and non-finite accounting.
//!
//! Filter instability shows up as NaN or infinite samples. Those are
//! surfaced to callers as a count rather than poisoning the measurements,
//! so both [`rms`] and [`peak`] skip non-finite values.

/// RMS (root mean square) level over `samples`, linear scale.
///
/// Non-finite samples are excluded from the mean. Returns 0.0 for an empty
/// (or all-non-finite) slice.
pub fn rms(samples: &[f64]) -> f64 {
    let mut sum_sq = 0.0;
    let mut count = 0usize;
    for &x in samples {
        if x.is_finite() {
            sum_sq += x * x;
            count += 1;
        }
    }

    if count == 0 {
        0.0
    } else {
        libm::sqrt(sum_sq / count as f64)
    }
}

/// Peak absolute value over `samples`, skipping non-finite values.
pub fn peak(samples: &[f64]) -> f64 {
    samples
        .iter()
        .filter(|x| x.is_finite())
        .fold(0.0, |acc: f64, &x| acc.max(x.abs()))
}

/// Number of NaN or infinite samples in the buffer.
pub fn count_non_finite(samples: &[f64]) -> usize {
    samples.iter().filter(|x| !x.is_finite()).count()
}
