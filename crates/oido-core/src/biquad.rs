//! Biquad (bi-quadratic) filter section.
//!
//! Provides a second-order IIR section plus the RBJ Audio EQ Cookbook
//! coefficient formulas for the lowpass and highpass responses the band
//! cascade is built from.

use core::f64::consts::PI;
use libm::{cos, sin};

/// Normalized biquad coefficients (a0 divided out).
///
/// Pure data: a `Coefficients` value owns no filter state, so a set of
/// designed sections can be applied to any number of buffers, each time
/// with fresh IIR memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feedforward coefficients
    pub b0: f64,
    /// Feedforward z^-1
    pub b1: f64,
    /// Feedforward z^-2
    pub b2: f64,
    /// Feedback z^-1
    pub a1: f64,
    /// Feedback z^-2
    pub a2: f64,
}

impl Coefficients {
    /// Lowpass coefficients from the RBJ cookbook formula.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Cutoff frequency in Hz
    /// * `q` - Section Q factor
    /// * `sample_rate` - Sample rate in Hz
    pub fn lowpass(frequency: f64, q: f64, sample_rate: f64) -> Self {
        let omega = 2.0 * PI * frequency / sample_rate;
        let cos_omega = cos(omega);
        let sin_omega = sin(omega);
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 - cos_omega) / 2.0;
        let b1 = 1.0 - cos_omega;
        let b2 = (1.0 - cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self::normalized(b0, b1, b2, a0, a1, a2)
    }

    /// Highpass coefficients from the RBJ cookbook formula.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Cutoff frequency in Hz
    /// * `q` - Section Q factor
    /// * `sample_rate` - Sample rate in Hz
    pub fn highpass(frequency: f64, q: f64, sample_rate: f64) -> Self {
        let omega = 2.0 * PI * frequency / sample_rate;
        let cos_omega = cos(omega);
        let sin_omega = sin(omega);
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 + cos_omega) / 2.0;
        let b1 = -(1.0 + cos_omega);
        let b2 = (1.0 + cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self::normalized(b0, b1, b2, a0, a1, a2)
    }

    /// Passthrough coefficients: `y[n] = x[n]`.
    pub const fn identity() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        }
    }

    fn normalized(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// True when every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }
}

/// A biquad section: coefficients plus IIR delay-line state.
///
/// Implements the Direct Form I structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: Coefficients,
    /// Input delay line: x[n-1], x[n-2]
    x1: f64,
    x2: f64,
    /// Output delay line: y[n-1], y[n-2]
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Creates a section with zeroed delay lines.
    pub const fn new(coeffs: Coefficients) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Processes a single sample through the section.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output =
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the delay lines without touching the coefficients.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new(Coefficients::identity())
    }
}
