//! Payload kinds carried by gateway commands.

use std::fmt;

use crate::error::PayloadError;
use crate::item::{decode_item_ids, ItemId};
use crate::tuple::{decode_tuples, RegionRealmTimestampTuple};

/// The shape of body a command expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PayloadKind {
    /// No body is read.
    None,
    /// A sequence of region/realm/timestamp tuples.
    Tuples,
    /// A sequence of item ids.
    ItemIds,
}

impl PayloadKind {
    /// Human-readable name used in decode failure messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::None => "empty payload",
            Self::Tuples => "region-realm-timestamp tuples",
            Self::ItemIds => "item-ids",
        }
    }

    /// Whether a body has to be read for this kind.
    #[must_use]
    pub const fn has_body(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Decode `body` into a payload of this kind.
    ///
    /// [`PayloadKind::None`] ignores the body and always succeeds.
    ///
    /// # Errors
    /// Propagates the [`PayloadError`] of the matching decoder.
    pub fn decode(self, body: &[u8]) -> Result<Payload, PayloadError> {
        match self {
            Self::None => Ok(Payload::None),
            Self::Tuples => decode_tuples(body).map(Payload::Tuples),
            Self::ItemIds => decode_item_ids(body).map(Payload::ItemIds),
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A decoded command payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Payload {
    None,
    Tuples(Vec<RegionRealmTimestampTuple>),
    ItemIds(Vec<ItemId>),
}

impl Payload {
    /// The kind this payload was decoded as.
    #[must_use]
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::None => PayloadKind::None,
            Self::Tuples(_) => PayloadKind::Tuples,
            Self::ItemIds(_) => PayloadKind::ItemIds,
        }
    }

    /// Number of elements carried, zero for [`Payload::None`].
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Tuples(t) => t.len(),
            Self::ItemIds(ids) => ids.len(),
        }
    }

    /// Returns `true` if the payload carries no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
