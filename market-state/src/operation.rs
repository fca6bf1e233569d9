//! The catalogue of named market operations.

use std::fmt;
use std::str::FromStr;

use market_core::{Payload, PayloadKind};

use crate::{MarketState, StateError};

/// A named operation on the market state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Operation {
    DownloadAllAuctions,
    CleanupAllManifests,
    CleanupAllAuctions,
    ComputeAllLiveAuctions,
    ComputeAllPricelistHistories,
    SyncAllItems,
    CleanupAllPricelistHistories,
}

impl Operation {
    /// Every operation, in catalogue order.
    pub const ALL: [Operation; 7] = [
        Self::DownloadAllAuctions,
        Self::CleanupAllManifests,
        Self::CleanupAllAuctions,
        Self::ComputeAllLiveAuctions,
        Self::ComputeAllPricelistHistories,
        Self::SyncAllItems,
        Self::CleanupAllPricelistHistories,
    ];

    /// Kebab-case name, used in paths, messages and downstream URLs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DownloadAllAuctions => "download-all-auctions",
            Self::CleanupAllManifests => "cleanup-all-manifests",
            Self::CleanupAllAuctions => "cleanup-all-auctions",
            Self::ComputeAllLiveAuctions => "compute-all-live-auctions",
            Self::ComputeAllPricelistHistories => "compute-all-pricelist-histories",
            Self::SyncAllItems => "sync-all-items",
            Self::CleanupAllPricelistHistories => "cleanup-all-pricelist-histories",
        }
    }

    /// The payload this operation consumes.
    #[must_use]
    pub const fn payload(self) -> PayloadKind {
        match self {
            Self::ComputeAllLiveAuctions | Self::ComputeAllPricelistHistories => {
                PayloadKind::Tuples
            }
            Self::SyncAllItems => PayloadKind::ItemIds,
            Self::DownloadAllAuctions
            | Self::CleanupAllManifests
            | Self::CleanupAllAuctions
            | Self::CleanupAllPricelistHistories => PayloadKind::None,
        }
    }

    /// Call the matching method on `state` exactly once.
    ///
    /// # Errors
    /// Returns [`StateError::PayloadMismatch`] without touching `state` if
    /// `payload` is not of [`Operation::payload`] kind, otherwise propagates
    /// the state's own error.
    pub async fn invoke(self, state: &dyn MarketState, payload: Payload) -> Result<(), StateError> {
        match (self, payload) {
            (Self::DownloadAllAuctions, Payload::None) => state.download_all_auctions().await,
            (Self::CleanupAllManifests, Payload::None) => state.cleanup_all_manifests().await,
            (Self::CleanupAllAuctions, Payload::None) => state.cleanup_all_auctions().await,
            (Self::ComputeAllLiveAuctions, Payload::Tuples(tuples)) => {
                state.compute_all_live_auctions(tuples).await
            }
            (Self::ComputeAllPricelistHistories, Payload::Tuples(tuples)) => {
                state.compute_all_pricelist_histories(tuples).await
            }
            (Self::SyncAllItems, Payload::ItemIds(ids)) => state.sync_all_items(ids).await,
            (Self::CleanupAllPricelistHistories, Payload::None) => {
                state.cleanup_all_pricelist_histories().await
            }
            (operation, payload) => Err(StateError::PayloadMismatch {
                operation: operation.name(),
                expected: operation.payload(),
                actual: payload.kind(),
            }),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation '{0}'")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperation(s.to_owned()))
    }
}
