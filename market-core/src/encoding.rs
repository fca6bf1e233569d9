//! Textual body encoding shared by both payload decoders.
//!
//! A body is either a JSON array, or the standard base64 encoding of one.
//! The first non-whitespace byte decides: `[` means JSON, anything else is
//! treated as base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PayloadError;

/// Parse `body` as a JSON array of `T`, unwrapping a base64 layer if present.
///
/// # Errors
/// Returns [`PayloadError::EmptyBody`] for blank input, [`PayloadError::Base64`]
/// when the non-JSON form is not valid base64, and [`PayloadError::Json`] when
/// the JSON does not match `T`.
pub(crate) fn decode_json_array<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, PayloadError> {
    let trimmed = body.trim_ascii();
    if trimmed.is_empty() {
        return Err(PayloadError::EmptyBody);
    }
    if trimmed.first() == Some(&b'[') {
        return Ok(serde_json::from_slice(trimmed)?);
    }

    let unwrapped = STANDARD.decode(trimmed)?;
    let inner = unwrapped.trim_ascii();
    if inner.is_empty() {
        return Err(PayloadError::EmptyBody);
    }
    Ok(serde_json::from_slice(inner)?)
}

/// Serialize `items` as a JSON array.
///
/// # Errors
/// Returns [`PayloadError::Encode`] if serialization fails.
pub(crate) fn encode_json_array<T: Serialize>(items: &[T]) -> Result<String, PayloadError> {
    serde_json::to_string(items).map_err(PayloadError::Encode)
}

/// Wrap an already-encoded JSON payload in standard base64.
///
/// The decoders accept the result as-is.
#[must_use]
pub fn wrap_base64(json: &str) -> String {
    STANDARD.encode(json.as_bytes())
}
