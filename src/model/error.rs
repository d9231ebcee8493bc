//! Error types for order construction.

use thiserror::Error;

/// Reasons a ticket cannot become an [`Order`](crate::model::Order).
///
/// Only the offending order is rejected; the kitchen keeps running.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Shelf life must be a finite number of seconds greater than zero.
    #[error("Invalid shelf life: {0}")]
    InvalidShelfLife(f64),

    /// Decay rate must be finite and non-negative.
    #[error("Invalid decay rate: {0}")]
    InvalidDecayRate(f64),
}
