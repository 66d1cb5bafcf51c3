//! Error types for sandtime.

use thiserror::Error;

/// Why a string could not be read as a [`Timestamp`](crate::Timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTimestamp {
    /// Fewer than the six mandatory fields (year through second).
    #[error("expected at least 6 date/time fields, found {found}")]
    TooFewFields { found: usize },

    /// A field token is not an unsigned decimal number.
    #[error("invalid {field} field: {token:?}")]
    InvalidField { field: &'static str, token: String },

    /// A field is numeric but too large for the timestamp to be representable.
    #[error("{field} field out of range: {token:?}")]
    OutOfRange { field: &'static str, token: String },
}

/// Name that matches no [`Easing`](crate::Easing) curve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown easing curve: {0:?}")]
pub struct UnknownEasing(pub String);

/// Crate-level errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The frame-locker tick thread could not be started.
    #[error("failed to spawn frame locker thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// Timestamp parsing failed.
    #[error("malformed timestamp: {0}")]
    Malformed(#[from] MalformedTimestamp),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
