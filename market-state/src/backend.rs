//! Market state abstraction.
//!
//! The gateway only knows the names and input shapes of these operations;
//! persistence, external APIs and any mutual exclusion live behind the trait.

use async_trait::async_trait;
use market_core::{ItemId, RegionRealmTimestampTuple};

use crate::StateError;

/// The set of commands the gateway can trigger.
///
/// Implementations must be `Send + Sync`: a single instance is shared by all
/// concurrent requests without locking at the gateway layer. Nothing is
/// returned on success.
#[async_trait]
pub trait MarketState: Send + Sync {
    /// Download fresh auction snapshots for every realm.
    ///
    /// # Errors
    /// Returns [`StateError`] if the download could not be performed.
    async fn download_all_auctions(&self) -> Result<(), StateError>;

    /// Remove expired ingestion manifests.
    ///
    /// # Errors
    /// Returns [`StateError`] if the cleanup failed.
    async fn cleanup_all_manifests(&self) -> Result<(), StateError>;

    /// Remove expired raw auction snapshots.
    ///
    /// # Errors
    /// Returns [`StateError`] if the cleanup failed.
    async fn cleanup_all_auctions(&self) -> Result<(), StateError>;

    /// Recompute live auctions for the given snapshots.
    ///
    /// # Errors
    /// Returns [`StateError`] if the computation failed.
    async fn compute_all_live_auctions(
        &self,
        tuples: Vec<RegionRealmTimestampTuple>,
    ) -> Result<(), StateError>;

    /// Recompute pricelist histories for the given snapshots.
    ///
    /// # Errors
    /// Returns [`StateError`] if the computation failed.
    async fn compute_all_pricelist_histories(
        &self,
        tuples: Vec<RegionRealmTimestampTuple>,
    ) -> Result<(), StateError>;

    /// Reconcile the item catalogue against the given ids.
    ///
    /// # Errors
    /// Returns [`StateError`] if the sync failed.
    async fn sync_all_items(&self, ids: Vec<ItemId>) -> Result<(), StateError>;

    /// Remove expired pricelist histories.
    ///
    /// # Errors
    /// Returns [`StateError`] if the cleanup failed.
    async fn cleanup_all_pricelist_histories(&self) -> Result<(), StateError>;
}
