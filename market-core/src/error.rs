/// Errors produced by the `market-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PayloadError {
    /// The body was empty or contained only whitespace.
    #[error("request body is empty")]
    EmptyBody,

    /// The body was neither JSON nor valid standard base64.
    #[error("invalid base64 encoding: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The body did not parse into the expected JSON shape.
    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A tuple parsed but one of its fields failed validation.
    #[error("invalid tuple at index {index}: {reason}")]
    InvalidTuple { index: usize, reason: String },

    /// A payload could not be serialized for delivery.
    #[error("could not encode payload: {0}")]
    Encode(#[source] serde_json::Error),
}
