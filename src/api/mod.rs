//! Remote REST clients for Quran content and prayer-time schedules.
//!
//! Responses cross a strict parse boundary: JSON is deserialized into typed
//! structs and any shape mismatch surfaces as [`ApiError::Parse`] instead of
//! being trusted implicitly. There are no retries and no timeout policy
//! beyond the HTTP client's defaults; a failed fetch is reported once.

pub mod prayer;
pub mod quran;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Response envelope shared by the equran.id v2 endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub code: u16,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

pub(crate) async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = reqwest::get(url).await.map_err(|source| ApiError::Http {
        url: url.to_string(),
        source,
    })?;
    decode(url, response).await
}

pub(crate) async fn post_json<T: DeserializeOwned>(
    url: &str,
    body: &serde_json::Value,
) -> Result<T, ApiError> {
    let response = reqwest::Client::new()
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|source| ApiError::Http {
            url: url.to_string(),
            source,
        })?;
    decode(url, response).await
}

async fn decode<T: DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.text().await.map_err(|source| ApiError::Http {
        url: url.to_string(),
        source,
    })?;
    debug!(url, bytes = body.len(), "Fetched API response");
    parse_payload(url, &body)
}

/// Unwrap the `{code, message, data}` envelope, mapping a non-200 payload
/// code to a status error even when HTTP itself succeeded.
pub(crate) fn parse_payload<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|source| ApiError::Parse {
            url: url.to_string(),
            source,
        })?;
    if envelope.code != 200 {
        debug!(
            url,
            code = envelope.code,
            message = envelope.message.as_deref().unwrap_or(""),
            "API payload reported failure"
        );
        return Err(ApiError::Status {
            url: url.to_string(),
            status: envelope.code,
        });
    }
    envelope.data.ok_or_else(|| ApiError::Parse {
        url: url.to_string(),
        source: serde_json::Error::io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "envelope missing data field",
        )),
    })
}
