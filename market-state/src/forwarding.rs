//! [`MarketState`] implementation that forwards each command to a
//! downstream worker over HTTP.
//!
//! Every operation becomes one `POST <base_url>/<operation-name>`; payloads
//! travel as the same JSON text the gateway accepts. Any 2xx answer is
//! success.

use std::time::Instant;

use async_trait::async_trait;
use market_core::{encode_item_ids, encode_tuples, ItemId, RegionRealmTimestampTuple};

use crate::client::{http_client, post, HttpClient};
use crate::{ForwardingConfig, MarketState, Operation, StateError};

/// Forwards commands to downstream workers.
///
/// Cheap to share: the inner client pools connections and is safe to use
/// from concurrent requests.
#[derive(Clone)]
pub struct ForwardingState {
    config: ForwardingConfig,
    client: HttpClient,
}

impl std::fmt::Debug for ForwardingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwardingState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ForwardingState {
    /// Create a forwarder for the given downstream configuration.
    #[must_use]
    pub fn new(config: ForwardingConfig) -> Self {
        Self {
            config,
            client: http_client(),
        }
    }

    async fn forward(&self, operation: Operation, body: Option<String>) -> Result<(), StateError> {
        let uri = self.config.endpoint(operation)?;
        let started = Instant::now();

        tracing::debug!(operation = operation.name(), %uri, "forwarding command");

        let request = post(&self.client, uri, body);
        let (status, text) = tokio::time::timeout(self.config.timeout, request)
            .await
            .map_err(|_| StateError::Timeout {
                operation: operation.name(),
                timeout: self.config.timeout,
            })??;

        let elapsed_ms = started.elapsed().as_millis();
        if !status.is_success() {
            tracing::warn!(
                operation = operation.name(),
                status = status.as_u16(),
                elapsed_ms,
                "downstream rejected command"
            );
            return Err(StateError::Rejected {
                operation: operation.name(),
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::info!(
            operation = operation.name(),
            status = status.as_u16(),
            elapsed_ms,
            "forwarded command"
        );
        Ok(())
    }
}

#[async_trait]
impl MarketState for ForwardingState {
    async fn download_all_auctions(&self) -> Result<(), StateError> {
        self.forward(Operation::DownloadAllAuctions, None).await
    }

    async fn cleanup_all_manifests(&self) -> Result<(), StateError> {
        self.forward(Operation::CleanupAllManifests, None).await
    }

    async fn cleanup_all_auctions(&self) -> Result<(), StateError> {
        self.forward(Operation::CleanupAllAuctions, None).await
    }

    async fn compute_all_live_auctions(
        &self,
        tuples: Vec<RegionRealmTimestampTuple>,
    ) -> Result<(), StateError> {
        let body = encode_tuples(&tuples)?;
        self.forward(Operation::ComputeAllLiveAuctions, Some(body)).await
    }

    async fn compute_all_pricelist_histories(
        &self,
        tuples: Vec<RegionRealmTimestampTuple>,
    ) -> Result<(), StateError> {
        let body = encode_tuples(&tuples)?;
        self.forward(Operation::ComputeAllPricelistHistories, Some(body)).await
    }

    async fn sync_all_items(&self, ids: Vec<ItemId>) -> Result<(), StateError> {
        let body = encode_item_ids(&ids)?;
        self.forward(Operation::SyncAllItems, Some(body)).await
    }

    async fn cleanup_all_pricelist_histories(&self) -> Result<(), StateError> {
        self.forward(Operation::CleanupAllPricelistHistories, None).await
    }
}
