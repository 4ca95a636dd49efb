//! Binding-layer errors

use crate::graph::{ChartOutput, Derivation};
use launch_derive::DeriveError;

/// Errors from building the binding graph or dispatching a control event
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindingError {
    /// Binding graph contains a cycle
    #[error("binding graph contains a cycle")]
    CycleDetected,

    /// Derivation declared with no trigger inputs
    #[error("derivation {0} has no trigger inputs")]
    EmptyTrigger(Derivation),

    /// Derivation bound twice
    #[error("derivation {0} is already bound")]
    DerivationAlreadyBound(Derivation),

    /// Chart already fed by another derivation
    #[error("chart output '{0}' is already bound")]
    OutputAlreadyBound(ChartOutput),

    /// Payload interval outside the dataset's slider range
    #[error("payload interval [{low}, {high}] outside bounds [{min}, {max}]")]
    IntervalOutOfBounds {
        /// Requested lower endpoint
        low: f64,
        /// Requested upper endpoint
        high: f64,
        /// Smallest payload in the dataset
        min: f64,
        /// Largest payload in the dataset
        max: f64,
    },

    /// Control snapshot failed validation
    #[error("invalid control state: {0}")]
    Derive(#[from] DeriveError),

    /// Worker task panicked or was cancelled
    #[error("derivation worker failed: {0}")]
    Worker(String),
}

impl BindingError {
    /// Whether the error is a caller contract violation (bad control snapshot)
    #[inline]
    #[must_use]
    pub fn is_caller_violation(&self) -> bool {
        matches!(self, Self::IntervalOutOfBounds { .. } | Self::Derive(_))
    }
}
