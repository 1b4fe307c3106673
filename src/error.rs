//! Error taxonomy for the cache, migration engine and simulation harness.
//!
//! [`Error::NotFound`] is locally recoverable and is consumed at the boundary
//! of residency tests (see [`crate::machine::Machine::locate`]). Every other
//! variant is fatal: library code returns it rather than calling
//! `exit`/`panic!`, and only the `tiersim` binary turns it into a process
//! exit code.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// `get` was called on a key that isn't tracked by the cache.
    #[error("key not present in cache")]
    NotFound,

    /// A structural invariant of the policy/cache/migration machinery was
    /// violated: policy/cache desynchronization, an ARC bound overrun, a
    /// corrupted victim status, an unknown device kind, or a tier with no
    /// lower successor.
    #[error("invariant violation: {detail}")]
    InvariantViolation { detail: String },

    /// A configuration value was missing or out of its valid range.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub fn invariant(detail: impl Into<String>) -> Self {
        Error::InvariantViolation {
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
