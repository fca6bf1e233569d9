//! Minimal HTTP client for posting commands to downstream workers.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Method, Request, StatusCode, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::StateError;

pub(crate) type HttpClient = Client<HttpConnector, Full<Bytes>>;

/// A pooled HTTP/1 client over plain TCP.
pub(crate) fn http_client() -> HttpClient {
    Client::builder(TokioExecutor::new()).build_http()
}

/// POST `body` to `uri` and return the response status with its body text.
///
/// A JSON content type is only set when a body is present.
///
/// # Errors
/// Returns [`StateError::Transport`] on connection, HTTP or body read errors.
pub(crate) async fn post(
    client: &HttpClient,
    uri: Uri,
    body: Option<String>,
) -> Result<(StatusCode, String), StateError> {
    let body_bytes = body.map(Bytes::from).unwrap_or_default();

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_LENGTH, body_bytes.len().to_string());
    if !body_bytes.is_empty() {
        builder = builder.header(CONTENT_TYPE, "application/json");
    }

    let req = builder
        .body(Full::new(body_bytes))
        .map_err(|e| StateError::Transport(format!("build request: {e}")))?;

    let resp = client
        .request(req)
        .await
        .map_err(|e| StateError::Transport(format!("send request: {e}")))?;

    let status = resp.status();
    let body_bytes = resp
        .into_body()
        .collect()
        .await
        .map_err(|e| StateError::Transport(format!("read response body: {e}")))?
        .to_bytes();

    Ok((status, String::from_utf8_lossy(&body_bytes).into_owned()))
}
