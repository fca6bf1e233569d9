//! Downstream forwarding configuration.

use std::time::Duration;

use hyper::Uri;

use crate::{Operation, StateError};

/// Default time a downstream worker gets to answer one command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Where and how commands are forwarded.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ForwardingConfig {
    /// Base URL; each command is posted to `<base_url>/<operation-name>`.
    base_url: String,

    /// Upper bound on one downstream exchange, body included.
    pub timeout: Duration,
}

impl ForwardingConfig {
    /// Validate `base_url` and build a config with the default timeout.
    ///
    /// Only plain `http` is supported.
    ///
    /// # Errors
    /// Returns [`StateError::InvalidUrl`] if the URL does not parse, has no
    /// host, uses another scheme, or carries a query string.
    pub fn new(base_url: &str) -> Result<Self, StateError> {
        let invalid = |reason: String| StateError::InvalidUrl {
            url: base_url.to_owned(),
            reason,
        };

        let uri: Uri = base_url.parse().map_err(|e| invalid(format!("{e}")))?;
        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => return Err(invalid(format!("unsupported scheme '{other}'"))),
            None => return Err(invalid("missing scheme".to_owned())),
        }
        if uri.host().is_none() {
            return Err(invalid("missing host".to_owned()));
        }
        if uri.query().is_some() {
            return Err(invalid("query strings are not supported".to_owned()));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replace the downstream timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The normalised base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The URL a given operation is posted to.
    ///
    /// # Errors
    /// Returns [`StateError::InvalidUrl`] if the joined URL does not parse.
    pub fn endpoint(&self, operation: Operation) -> Result<Uri, StateError> {
        let url = format!("{}/{}", self.base_url, operation.name());
        url.parse().map_err(|e| StateError::InvalidUrl {
            url,
            reason: format!("{e}"),
        })
    }
}
