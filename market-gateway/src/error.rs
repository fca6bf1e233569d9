//! Error types for the gateway crate, and the responder that turns a
//! request failure into an HTTP response.

use std::net::SocketAddr;

use axum::{
    http::{header::ALLOW, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use market_core::{PayloadError, PayloadKind};
use market_state::{Operation, StateError};
use serde::{Deserialize, Serialize};

use crate::config::{ResponsePolicy, UnmatchedPathPolicy};

/// Errors that can end the handling of one request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The request used a method other than `POST`.
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    /// No operation is registered for the request path.
    #[error("no operation registered for path {0}")]
    UnmatchedPath(String),

    /// The request body could not be read in full.
    #[error("could not read request body")]
    BodyRead(#[source] axum::Error),

    /// The body was read but does not decode into the expected payload.
    #[error("could not decode {payload} from request body")]
    Decode {
        payload: PayloadKind,
        #[source]
        source: PayloadError,
    },

    /// The state operation failed.
    #[error("could not call {operation}")]
    Operation {
        operation: Operation,
        #[source]
        source: StateError,
    },
}

/// JSON body written for failed requests.
///
/// Field names are part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Static description of the phase that failed.
    pub error: String,
    /// Text of the underlying failure.
    pub details: String,
}

impl GatewayError {
    /// Status this error answers with under `policy`.
    #[must_use]
    pub fn status(&self, policy: &ResponsePolicy) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnmatchedPath(_) => match policy.unmatched_path {
                UnmatchedPathPolicy::NotFound => StatusCode::NOT_FOUND,
                UnmatchedPathPolicy::Fallthrough => StatusCode::OK,
            },
            Self::Decode { .. } => policy.bad_payload.status(),
            Self::BodyRead(_) | Self::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text of the underlying failure, empty when there is none.
    #[must_use]
    pub fn details(&self) -> String {
        match self {
            Self::MethodNotAllowed(_) | Self::UnmatchedPath(_) => String::new(),
            Self::BodyRead(e) => e.to_string(),
            Self::Decode { source, .. } => source.to_string(),
            Self::Operation { source, .. } => source.to_string(),
        }
    }

    /// Write this error as a response under `policy`.
    ///
    /// Method and path mismatches answer with an empty body; every other
    /// failure writes an [`ErrorBody`] and is logged at error level with the
    /// same message and details.
    #[must_use]
    pub fn into_response_with(self, policy: &ResponsePolicy) -> Response {
        let status = self.status(policy);
        match self {
            Self::MethodNotAllowed(_) => (status, [(ALLOW, "POST")]).into_response(),
            Self::UnmatchedPath(path) => {
                tracing::warn!(%path, status = status.as_u16(), "no operation registered for path");
                status.into_response()
            }
            err => {
                let body = ErrorBody {
                    error: err.to_string(),
                    details: err.details(),
                };
                tracing::error!(
                    details = %body.details,
                    status = status.as_u16(),
                    "{}",
                    body.error
                );
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Errors that stop the gateway from starting or keep it from serving.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BootstrapError {
    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The downstream forwarding target is unusable.
    #[error("invalid downstream configuration: {0}")]
    Downstream(#[from] StateError),

    /// The log filter directive does not parse.
    #[error("invalid log level '{level}': {reason}")]
    LogLevel { level: String, reason: String },

    /// A global tracing subscriber could not be installed.
    #[error("could not install tracing subscriber: {0}")]
    Telemetry(String),

    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
