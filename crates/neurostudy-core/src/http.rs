//! HTTP plumbing shared by the tutor and notes clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use crate::error::GatewayError;
use crate::notes::is_token_limit_error;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub(crate) fn build_client() -> Result<Client, GatewayError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(|e| GatewayError::NotConfigured(format!("HTTP client: {e}")))
}

pub(crate) fn authorize(request: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
    match api_key {
        Some(key) => request.bearer_auth(key),
        None => request,
    }
}

/// Pass a success response through; turn anything else into a typed error
/// carrying the server's `{ "error": ... }` text when present.
pub(crate) async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());

    tracing::debug!(status = status.as_u16(), body = %body, "gateway returned an error");

    if is_token_limit_error(status.as_u16(), &body) {
        return Err(GatewayError::PayloadTooLarge { message });
    }
    Err(GatewayError::from_status(status.as_u16(), message))
}
