//! Client for the shot classification service.
//!
//! The service accepts a POST of raw preview-image bytes and answers with
//! the category it assigned, if any. Anything other than HTTP 200 means
//! "no tag"; transport failures surface as [`TagError`] for the caller to
//! classify as recoverable or fatal.

use serde::Deserialize;
use tracing::{debug, warn};

/// Result type for classification calls.
pub type TagResult<T> = Result<T, TagError>;

/// Errors from the classification transport.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("classification request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Classification service response body.
///
/// The service also sends a raw `response` text field, which is ignored.
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    /// Assigned category, null when the model abstains
    tag: Option<String>,
    /// Server-side inference time in seconds
    #[serde(default)]
    time_taken: f64,
}

/// Client for the classification endpoint.
#[derive(Debug, Clone)]
pub struct TagClient {
    endpoint: String,
    client: reqwest::Client,
}

impl TagClient {
    /// Create a client for an endpoint URL such as `http://10.0.0.5:8080`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Submit preview-image bytes and return the assigned category.
    ///
    /// `Ok(None)` covers both a non-200 status and a 200 whose `tag` is
    /// null; only transport-level failures are errors.
    pub async fn classify(&self, image: Vec<u8>) -> TagResult<Option<String>> {
        let response = self.client.post(&self.endpoint).body(image).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!(%status, "Classification service returned non-200, shot left untagged");
            return Ok(None);
        }

        let body: ClassifyResponse = response.json().await?;
        debug!(
            tag = body.tag.as_deref().unwrap_or(""),
            time_taken = body.time_taken,
            "Classification response"
        );

        Ok(body.tag)
    }

    /// The endpoint URL this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
