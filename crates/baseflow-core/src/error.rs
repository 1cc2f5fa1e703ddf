//! Error types for baseflow separation.
//!
//! The numeric kernels (filters, graphical methods, metrics) are infallible.
//! Errors are raised only where input is validated or where an estimator has
//! nothing to work with.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BaseflowError {
    #[error("discharge series is empty")]
    EmptySeries,

    #[error("invalid discharge value {value} at index {index} (must be finite and non-negative)")]
    InvalidDischarge { index: usize, value: f64 },

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("not enough strict-baseflow recession days to estimate k (found {candidates})")]
    InsufficientRecession { candidates: usize },

    #[error("unknown separation method: {0}")]
    UnknownMethod(String),

    #[error("calibration grid is empty")]
    EmptyGrid,

    #[error("invalid ice period: {0}")]
    InvalidIcePeriod(String),

    #[error("an ice period was given but no calendar dates were supplied")]
    MissingCalendar,
}

pub type Result<T> = std::result::Result<T, BaseflowError>;
