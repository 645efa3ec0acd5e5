//! Error types for the Nutri Clinic calculations

use thiserror::Error;

/// Errors raised by the pure calculation functions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Invalid measurement: {field} must be a positive number (got {value})")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[error("Invalid hour: {0} (expected HH:MM)")]
    InvalidHour(String),

    #[error("Projection of {weeks} weeks is out of range")]
    ProjectionOutOfRange { weeks: i64 },
}

/// Reject non-positive or non-finite measurements
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64, CalculationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalculationError::InvalidMeasurement { field, value })
    }
}
