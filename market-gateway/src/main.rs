//! Entry point for the `market-gateway` HTTP server.

use std::process::ExitCode;

use clap::Parser;
use market_gateway::{server, telemetry, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("market-gateway: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init(&config.log) {
        eprintln!("market-gateway: {e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = server::run(config).await {
        tracing::error!(error = %e, "market-gateway failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
