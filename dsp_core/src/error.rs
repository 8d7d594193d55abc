//! Error types for the DSP core.

use thiserror::Error;

/// Result type for DSP operations.
pub type DspResult<T> = Result<T, DspError>;

/// Errors raised by the signal-processing stages.
///
/// Configuration problems are reported immediately; none of the stages try
/// to repair their inputs or substitute fallback values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    /// A parameter is outside its valid domain (non-positive length or
    /// sampling rate, negative noise, non-finite reflection, ...).
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// A required sample vector is empty.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// A receive vector does not match the length a compressor was planned for.
    #[error("length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The FFT stage produced unusable output.
    #[error("FFT backend failure: {0}")]
    Backend(String),
}

impl DspError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DspError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Reject non-finite or non-positive values.
pub fn ensure_positive(field: &'static str, value: f64) -> DspResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DspError::invalid(
            field,
            format!("must be finite and > 0 (got {value})"),
        ));
    }
    Ok(())
}

/// Reject non-finite or negative values.
pub fn ensure_non_negative(field: &'static str, value: f64) -> DspResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DspError::invalid(
            field,
            format!("must be finite and >= 0 (got {value})"),
        ));
    }
    Ok(())
}

/// Reject non-finite values.
pub fn ensure_finite(field: &'static str, value: f64) -> DspResult<()> {
    if !value.is_finite() {
        return Err(DspError::invalid(field, format!("must be finite (got {value})")));
    }
    Ok(())
}
