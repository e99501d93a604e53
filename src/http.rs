use std::time::Duration;

use backoff::{Error as BackoffError, ExponentialBackoff, future::retry};
use reqwest::{
    Client, RequestBuilder, StatusCode,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

const USER_AGENT_VALUE: &str = concat!("islami-group-bot/", env!("CARGO_PKG_VERSION"));

/// Errors from outgoing HTTP calls.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server answered 404.
    #[error("Resource not found")]
    NotFound,
    /// The server answered with another non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// The response status.
        status: StatusCode,
        /// The response body, empty when unreadable.
        body: String,
    },
    /// The request could not be sent or its body parsed.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Builds the HTTP client shared by all outgoing API calls.
pub fn build_client(timeout_secs: u64) -> Result<Client, HttpError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    let client =
        Client::builder().timeout(Duration::from_secs(timeout_secs)).default_headers(headers).build()?;
    tracing::debug!("HTTP client built successfully.");
    Ok(client)
}

/// Re-usable configuration for exponential backoff.
fn backoff_config() -> ExponentialBackoff {
    ExponentialBackoff {
        initial_interval: Duration::from_millis(500),
        max_interval: Duration::from_secs(5),
        max_elapsed_time: Some(Duration::from_secs(20)),
        multiplier: 2.0,
        ..Default::default()
    }
}

/// Whether a failed response is worth retrying.
fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Send the request built by `build`, retrying transient failures, and parse
/// the JSON body.
pub async fn send_json<T, F>(build: F) -> Result<T, HttpError>
where
    T: DeserializeOwned,
    F: Fn() -> RequestBuilder,
{
    let operation = || async {
        let resp = build().send().await.map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                tracing::warn!("Network error sending request: {e}. Retrying...");
                BackoffError::transient(HttpError::Request(e))
            } else {
                BackoffError::permanent(HttpError::Request(e))
            }
        })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackoffError::permanent(HttpError::NotFound));
        }

        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Failed to read response text: {e}. Using empty fallback.");
                    String::new()
                }
            };
            let err = HttpError::Status { status, body };
            return if is_transient_status(status) {
                tracing::warn!("Transient HTTP error: {err}. Retrying...");
                Err(BackoffError::transient(err))
            } else {
                Err(BackoffError::permanent(err))
            };
        }

        resp.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse JSON response: {e}");
            BackoffError::permanent(HttpError::Request(e))
        })
    };

    retry(backoff_config(), operation).await
}
