//! HTTP command gateway for the market backend.
//!
//! Accepts `POST` requests, picks the operation registered for the request
//! path, decodes its payload, calls the market state once, and answers with
//! the operation's success status or a `{error, details}` body.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod registry;
pub mod routes;
pub mod server;
pub mod telemetry;

pub use config::{BadPayloadStatus, Cli, GatewayConfig, ResponsePolicy, UnmatchedPathPolicy};
pub use error::{BootstrapError, ErrorBody, GatewayError};
pub use registry::{OperationDescriptor, OperationRegistry};
pub use routes::{create_router, Gateway};
