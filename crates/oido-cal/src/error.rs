//! Error types for calibration curve operations.

use thiserror::Error;

/// Errors that can occur while reading or mutating calibration data.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CurveError {
    /// Band index outside the frequency table.
    #[error("band index {index} out of range (table has {count} bands)")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// Number of bands in the table.
        count: usize,
    },

    /// A level value was NaN or infinite.
    #[error("level must be finite, got {value}")]
    InvalidValue {
        /// The offending value.
        value: f64,
    },

    /// An imported curve did not match the table length.
    #[error("curve import needs {expected} records, got {actual}")]
    LengthMismatch {
        /// Required record count.
        expected: usize,
        /// Records actually supplied.
        actual: usize,
    },
}
