//! Derivation-layer errors
//!
//! Derivations themselves never fail. These errors come from validating a
//! control snapshot before it reaches a derivation.

/// Control-state validation failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeriveError {
    /// Interval with `low > high` or a NaN endpoint
    #[error("invalid payload interval [{low}, {high}]")]
    InvalidInterval {
        /// Lower endpoint as given
        low: f64,
        /// Upper endpoint as given
        high: f64,
    },

    /// Site not present in the dataset
    #[error("unknown launch site: '{0}'")]
    UnknownSite(String),

    /// Jitter half-width negative, NaN or infinite
    #[error("invalid jitter amplitude {0}, expected a finite value >= 0")]
    InvalidAmplitude(f64),
}
