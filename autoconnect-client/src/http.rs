//! Shared request plumbing: status checking and error mapping.

use autoconnect_core::ApiError;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

/// Error body some services send with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub(crate) fn transport_error(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Turns a non-success response into [`ApiError::Status`], keeping the body's `message`.
pub(crate) async fn check_status(response: Response, endpoint: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&error_text)
        .ok()
        .and_then(|b| b.message);
    warn!(
        endpoint = %endpoint,
        status = status.as_u16(),
        body_len = error_text.len(),
        "step: backend returned non-success status"
    );
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Reads a success body as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
