use serde::{Deserialize, Serialize};

use crate::encoding::{decode_json_array, encode_json_array};
use crate::error::PayloadError;

/// Identifier of an item in the reference catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

/// Decode a request body into item ids.
///
/// # Errors
/// Returns a [`PayloadError`] if the body is blank, badly encoded, or not an
/// array of non-negative integers that fit in `u32`.
pub fn decode_item_ids(body: &[u8]) -> Result<Vec<ItemId>, PayloadError> {
    decode_json_array(body)
}

/// Encode item ids as the JSON text [`decode_item_ids`] accepts.
///
/// # Errors
/// Returns [`PayloadError::Encode`] if serialization fails.
pub fn encode_item_ids(ids: &[ItemId]) -> Result<String, PayloadError> {
    encode_json_array(ids)
}
