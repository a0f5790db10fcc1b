//! Domain error types

use crate::session::phase::Phase;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Stock ticker cannot be empty")]
    EmptyTicker,

    #[error("Duration of {requested}s is outside the allowed range {min}s..={max}s")]
    DurationOutOfRange { requested: i64, min: i64, max: i64 },

    #[error("Share quantity of {requested} is outside the allowed range {min}..={max}")]
    QuantityOutOfRange { requested: u32, min: u32, max: u32 },

    #[error("A session is already in progress (phase: {0})")]
    SessionInProgress(Phase),
}

impl DomainError {
    /// Check if this error is a validation failure of the operator's input
    /// (as opposed to an invalid state transition).
    pub fn is_validation(&self) -> bool {
        !matches!(self, DomainError::SessionInProgress(_))
    }
}
