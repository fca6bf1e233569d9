//! Payload types for the market command gateway.
//!
//! Defines the region/realm/timestamp tuple and item id types, and the pure
//! decoders that turn a raw request body into them.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod encoding;
pub mod error;
pub mod item;
pub mod payload;
pub mod tuple;

pub use encoding::wrap_base64;
pub use error::PayloadError;
pub use item::{decode_item_ids, encode_item_ids, ItemId};
pub use payload::{Payload, PayloadKind};
pub use tuple::{decode_tuples, encode_tuples, RegionRealmTimestampTuple};
