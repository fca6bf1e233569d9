//! Server bootstrap: wire the state, registry and router, then serve.

use std::future::Future;
use std::sync::Arc;

use market_state::{ForwardingState, MarketState};
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::GatewayConfig,
    error::BootstrapError,
    registry::{OperationDescriptor, OperationRegistry},
    routes::{create_router, Gateway},
};

/// Build the gateway from `config`, bind, and serve until ctrl-c.
///
/// # Errors
/// Returns [`BootstrapError::Bind`] if the listen address is unavailable and
/// [`BootstrapError::Serve`] if the server stops with an I/O error.
pub async fn run(config: GatewayConfig) -> Result<(), BootstrapError> {
    info!(
        project = %config.project_id,
        service = %config.service_name,
        port = config.listen_addr.port(),
        downstream = config.forwarding.base_url(),
        "initializing service"
    );

    let state: Arc<dyn MarketState> = Arc::new(ForwardingState::new(config.forwarding.clone()));
    let registry = Arc::new(OperationRegistry::standard());
    let gateway = Gateway::new(state, registry, config.policy);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .map_err(|source| BootstrapError::Bind {
            addr: config.listen_addr,
            source,
        })?;

    serve(listener, gateway, shutdown_signal()).await
}

/// Serve `gateway` on an already bound listener until `shutdown` resolves.
///
/// # Errors
/// Returns [`BootstrapError::Serve`] if the server stops with an I/O error.
pub async fn serve<F>(
    listener: TcpListener,
    gateway: Gateway,
    shutdown: F,
) -> Result<(), BootstrapError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().map_err(BootstrapError::Serve)?;
    {
        let paths: Vec<&str> = gateway.registry().iter().map(OperationDescriptor::path).collect();
        info!(%addr, operations = ?paths, "market-gateway listening");
    }

    axum::serve(listener, create_router(gateway))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(BootstrapError::Serve)?;

    info!("market-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
