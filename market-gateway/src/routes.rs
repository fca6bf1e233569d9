//! Request dispatcher for the market gateway.
//!
//! Every request goes through one handler: method check, registry lookup,
//! optional payload decode, one state call, then a response.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use market_core::{Payload, PayloadKind};
use market_state::MarketState;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::ResponsePolicy,
    error::GatewayError,
    registry::{OperationRegistry, REQUIRED_METHOD},
};

// ── Shared state ─────────────────────────────────────────────────────────────

/// The handler's dependencies, built once at startup.
///
/// Cloning is cheap; the state and registry are shared read-only.
#[derive(Clone)]
pub struct Gateway {
    state: Arc<dyn MarketState>,
    registry: Arc<OperationRegistry>,
    policy: ResponsePolicy,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("operations", &self.registry.len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    #[must_use]
    pub fn new(
        state: Arc<dyn MarketState>,
        registry: Arc<OperationRegistry>,
        policy: ResponsePolicy,
    ) -> Self {
        Self {
            state,
            registry,
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &ResponsePolicy {
        &self.policy
    }

    #[must_use]
    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Run one request through the pipeline and return its success status.
    ///
    /// The body is only read for operations that take a payload, and at
    /// most once. Processing stops at the first failure.
    ///
    /// # Errors
    /// Returns [`GatewayError::MethodNotAllowed`] before looking at the path,
    /// [`GatewayError::UnmatchedPath`] if nothing is registered for it, and
    /// the read, decode or call failure otherwise.
    pub async fn handle(&self, request: Request) -> Result<StatusCode, GatewayError> {
        let (parts, body) = request.into_parts();
        if parts.method != REQUIRED_METHOD {
            return Err(GatewayError::MethodNotAllowed(parts.method));
        }

        let path = parts.uri.path();
        let descriptor = self
            .registry
            .lookup(path)
            .ok_or_else(|| GatewayError::UnmatchedPath(path.to_owned()))?;

        let payload = self.read_payload(descriptor.payload(), body).await?;
        let operation = descriptor.operation();

        tracing::debug!(%operation, items = payload.len(), "calling operation");
        operation
            .invoke(self.state.as_ref(), payload)
            .await
            .map_err(|source| GatewayError::Operation { operation, source })?;

        Ok(descriptor.success_status())
    }

    async fn read_payload(
        &self,
        kind: PayloadKind,
        body: Body,
    ) -> Result<Payload, GatewayError> {
        if !kind.has_body() {
            return Ok(Payload::None);
        }
        let bytes = axum::body::to_bytes(body, self.policy.body_limit)
            .await
            .map_err(GatewayError::BodyRead)?;
        kind.decode(&bytes)
            .map_err(|source| GatewayError::Decode { payload: kind, source })
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router around `gateway`.
///
/// There are no per-path routes: the dispatcher owns method and path
/// matching so that a wrong method is rejected before the path is looked at.
pub fn create_router(gateway: Gateway) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(gateway)
        .layer(TraceLayer::new_for_http())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// Dispatch any request to its registered operation.
///
/// Logs `received request` on entry and `sent response` once the response
/// is built, inside a span carrying a fresh request id.
pub async fn dispatch(State(gateway): State<Gateway>, request: Request) -> Response {
    let span = tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        tracing::info!("received request");
        let response = match gateway.handle(request).await {
            Ok(status) => status.into_response(),
            Err(err) => err.into_response_with(gateway.policy()),
        };
        tracing::info!(status = response.status().as_u16(), "sent response");
        response
    }
    .instrument(span)
    .await
}
