//! Error types for the state crate.

use std::time::Duration;

use market_core::{PayloadError, PayloadKind};

/// Errors a [`MarketState`](crate::MarketState) operation can fail with.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StateError {
    /// The operation itself failed inside the state implementation.
    #[error("{0}")]
    Failed(String),

    /// The operation was handed a payload of the wrong kind.
    #[error("{operation} expects {expected}, got {actual}")]
    PayloadMismatch {
        operation: &'static str,
        expected: PayloadKind,
        actual: PayloadKind,
    },

    /// The downstream URL could not be used.
    #[error("invalid downstream url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The downstream request could not be sent or its answer not read.
    #[error("downstream request failed: {0}")]
    Transport(String),

    /// The downstream worker answered with a non-success status.
    #[error("downstream {operation} answered {status}: {body}")]
    Rejected {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The downstream worker did not answer in time.
    #[error("downstream {operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    /// A payload could not be encoded for forwarding.
    #[error(transparent)]
    Payload(#[from] PayloadError),
}
