//! Market state collaborator for the command gateway.
//!
//! Defines the [`MarketState`] trait the gateway dispatches into, the
//! [`Operation`] catalogue, and [`ForwardingState`], which relays each
//! command to a downstream worker over HTTP.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod backend;
mod client;
pub mod config;
pub mod error;
pub mod forwarding;
pub mod operation;

pub use backend::MarketState;
pub use config::ForwardingConfig;
pub use error::StateError;
pub use forwarding::ForwardingState;
pub use operation::{Operation, UnknownOperation};
