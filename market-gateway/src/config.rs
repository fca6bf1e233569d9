//! Gateway configuration: command-line/environment parsing and the
//! validated values the server is built from.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use axum::http::StatusCode;
use clap::{Parser, ValueEnum};
use market_state::ForwardingConfig;

use crate::error::BootstrapError;

/// Default cap on a request body, in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// What an unregistered path answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UnmatchedPathPolicy {
    /// `200 OK`, empty body. No status is written, so callers see the
    /// server's default.
    #[default]
    Fallthrough,
    /// `404 Not Found`, empty body.
    NotFound,
}

/// Status used when a body reads fine but does not decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BadPayloadStatus {
    /// `500 Internal Server Error`, like every other failure.
    #[default]
    ServerError,
    /// `400 Bad Request`.
    ClientError,
}

impl BadPayloadStatus {
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ClientError => StatusCode::BAD_REQUEST,
        }
    }
}

/// How the dispatcher maps edge cases onto responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsePolicy {
    pub unmatched_path: UnmatchedPathPolicy,
    pub bad_payload: BadPayloadStatus,
    /// Maximum body size read for payload operations.
    pub body_limit: usize,
}

impl Default for ResponsePolicy {
    fn default() -> Self {
        Self {
            unmatched_path: UnmatchedPathPolicy::default(),
            bad_payload: BadPayloadStatus::default(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// An `EnvFilter` directive, e.g. `info` or `market_gateway=debug,info`.
    pub level: String,
    pub format: LogFormat,
}

/// Command-line arguments, each with an environment fallback.
#[derive(Debug, Parser)]
#[command(
    name = "market-gateway",
    version,
    about = "HTTP command gateway for market operations"
)]
pub struct Cli {
    /// Deployment project identity.
    #[arg(long, env = "PROJECT_ID")]
    pub project_id: String,

    /// Service name reported in logs.
    #[arg(long, env = "K_SERVICE", default_value = "market-gateway")]
    pub service_name: String,

    /// Address to bind.
    #[arg(long, env = "LISTEN_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT")]
    pub port: u16,

    /// Log filter directive.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Maximum request body size in bytes.
    #[arg(long, env = "BODY_LIMIT", default_value_t = DEFAULT_BODY_LIMIT)]
    pub body_limit: usize,

    /// Answer for paths with no registered operation.
    #[arg(
        long,
        env = "UNMATCHED_PATH",
        value_enum,
        default_value_t = UnmatchedPathPolicy::Fallthrough
    )]
    pub unmatched_path: UnmatchedPathPolicy,

    #[arg(
        long,
        env = "BAD_PAYLOAD_STATUS",
        value_enum,
        default_value_t = BadPayloadStatus::ServerError
    )]
    pub bad_payload_status: BadPayloadStatus,

    /// Base URL commands are forwarded to.
    #[arg(long, env = "DOWNSTREAM_URL")]
    pub downstream_url: String,

    /// Seconds a downstream worker gets to answer one command.
    #[arg(long, env = "DOWNSTREAM_TIMEOUT_SECS", default_value_t = 300)]
    pub downstream_timeout_secs: u64,
}

/// Validated configuration, resolved once before serving.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GatewayConfig {
    pub project_id: String,
    pub service_name: String,
    pub listen_addr: SocketAddr,
    pub log: LogConfig,
    pub policy: ResponsePolicy,
    pub forwarding: ForwardingConfig,
}

impl Cli {
    /// Validate the arguments into a [`GatewayConfig`].
    ///
    /// # Errors
    /// Returns [`BootstrapError::Config`] for blank identities, a zero body
    /// limit or a zero timeout, and [`BootstrapError::Downstream`] for an
    /// unusable downstream URL.
    pub fn into_config(self) -> Result<GatewayConfig, BootstrapError> {
        if self.project_id.trim().is_empty() {
            return Err(BootstrapError::Config("project id must not be empty".to_owned()));
        }
        if self.service_name.trim().is_empty() {
            return Err(BootstrapError::Config("service name must not be empty".to_owned()));
        }
        if self.body_limit == 0 {
            return Err(BootstrapError::Config("body limit must be positive".to_owned()));
        }
        if self.downstream_timeout_secs == 0 {
            return Err(BootstrapError::Config(
                "downstream timeout must be positive".to_owned(),
            ));
        }

        let forwarding = ForwardingConfig::new(&self.downstream_url)?
            .with_timeout(Duration::from_secs(self.downstream_timeout_secs));

        Ok(GatewayConfig {
            project_id: self.project_id,
            service_name: self.service_name,
            listen_addr: SocketAddr::new(self.host, self.port),
            log: LogConfig {
                level: self.log_level,
                format: self.log_format,
            },
            policy: ResponsePolicy {
                unmatched_path: self.unmatched_path,
                bad_payload: self.bad_payload_status,
                body_limit: self.body_limit,
            },
            forwarding,
        })
    }
}
