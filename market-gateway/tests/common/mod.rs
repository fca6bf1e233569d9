//! Shared fixtures for gateway integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use market_core::{ItemId, RegionRealmTimestampTuple};
use market_gateway::{create_router, ErrorBody, Gateway, OperationRegistry, ResponsePolicy};
use market_state::{MarketState, Operation, StateError};
use tower::ServiceExt;

/// One recorded state call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DownloadAllAuctions,
    CleanupAllManifests,
    CleanupAllAuctions,
    ComputeAllLiveAuctions(Vec<RegionRealmTimestampTuple>),
    ComputeAllPricelistHistories(Vec<RegionRealmTimestampTuple>),
    SyncAllItems(Vec<ItemId>),
    CleanupAllPricelistHistories,
}

impl Call {
    pub fn operation(&self) -> Operation {
        match self {
            Self::DownloadAllAuctions => Operation::DownloadAllAuctions,
            Self::CleanupAllManifests => Operation::CleanupAllManifests,
            Self::CleanupAllAuctions => Operation::CleanupAllAuctions,
            Self::ComputeAllLiveAuctions(_) => Operation::ComputeAllLiveAuctions,
            Self::ComputeAllPricelistHistories(_) => Operation::ComputeAllPricelistHistories,
            Self::SyncAllItems(_) => Operation::SyncAllItems,
            Self::CleanupAllPricelistHistories => Operation::CleanupAllPricelistHistories,
        }
    }
}

/// Records every call; operations listed in `failures` fail with the given text.
#[derive(Default)]
pub struct RecordingState {
    calls: Mutex<Vec<Call>>,
    failures: HashMap<Operation, String>,
}

impl RecordingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(operation: Operation, message: &str) -> Self {
        let mut state = Self::default();
        state.failures.insert(operation, message.to_owned());
        state
    }

    pub fn calls(&self) -> Vec<Call> {
        match self.calls.lock() {
            Ok(c) => c.clone(),
            Err(e) => panic!("poisoned: {e}"),
        }
    }

    fn record(&self, call: Call) -> Result<(), StateError> {
        let operation = call.operation();
        match self.calls.lock() {
            Ok(mut c) => c.push(call),
            Err(e) => panic!("poisoned: {e}"),
        }
        match self.failures.get(&operation) {
            Some(message) => Err(StateError::Failed(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MarketState for RecordingState {
    async fn download_all_auctions(&self) -> Result<(), StateError> {
        self.record(Call::DownloadAllAuctions)
    }

    async fn cleanup_all_manifests(&self) -> Result<(), StateError> {
        self.record(Call::CleanupAllManifests)
    }

    async fn cleanup_all_auctions(&self) -> Result<(), StateError> {
        self.record(Call::CleanupAllAuctions)
    }

    async fn compute_all_live_auctions(
        &self,
        tuples: Vec<RegionRealmTimestampTuple>,
    ) -> Result<(), StateError> {
        self.record(Call::ComputeAllLiveAuctions(tuples))
    }

    async fn compute_all_pricelist_histories(
        &self,
        tuples: Vec<RegionRealmTimestampTuple>,
    ) -> Result<(), StateError> {
        self.record(Call::ComputeAllPricelistHistories(tuples))
    }

    async fn sync_all_items(&self, ids: Vec<ItemId>) -> Result<(), StateError> {
        self.record(Call::SyncAllItems(ids))
    }

    async fn cleanup_all_pricelist_histories(&self) -> Result<(), StateError> {
        self.record(Call::CleanupAllPricelistHistories)
    }
}

pub fn router(state: Arc<RecordingState>, policy: ResponsePolicy) -> Router {
    create_router(Gateway::new(state, Arc::new(OperationRegistry::standard()), policy))
}

/// Status and raw body of one response.
pub struct Answer {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Answer {
    pub fn error_body(&self) -> ErrorBody {
        match serde_json::from_slice(&self.body) {
            Ok(b) => b,
            Err(e) => panic!(
                "expected error body, got {:?}: {e}",
                String::from_utf8_lossy(&self.body)
            ),
        }
    }
}

pub async fn send(app: Router, method: Method, path: &str, body: impl Into<Body>) -> Answer {
    let req = match Request::builder().method(method).uri(path).body(body.into()) {
        Ok(r) => r,
        Err(e) => panic!("failed to build request: {e}"),
    };
    let resp = match app.oneshot(req).await {
        Ok(r) => r,
        Err(e) => panic!("handler error: {e}"),
    };
    let status = resp.status();
    let body = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
        Ok(b) => b.to_vec(),
        Err(e) => panic!("failed to read body: {e}"),
    };
    Answer { status, body }
}
