//! QnaClient - REST client for the question-answering service.
//!
//! Speaks the service's two endpoints directly over HTTP. Requests
//! carry a 30-second timeout. There is no retry policy: a failed
//! operation is terminal and the user resubmits manually.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use voya_core::backend::QnaBackend;
use voya_core::error::{Result, VoyaError};
use voya_core::history::{HistoryResponse, QueryRequest, QueryResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fallback banner message when a rejected query carries no readable
/// `detail` field.
pub const QUERY_FAILED_FALLBACK: &str = "An unknown error occurred.";

/// HTTP client for the remote Q&A service.
#[derive(Clone)]
pub struct QnaClient {
    client: Client,
    base_url: String,
}

impl QnaClient {
    /// Creates a client for the service at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn history_url(&self, user_id: &str) -> String {
        format!("{}/api/v1/history/{}", self.base_url, user_id)
    }

    fn query_url(&self) -> String {
        format!("{}/api/v1/query", self.base_url)
    }
}

#[async_trait]
impl QnaBackend for QnaClient {
    async fn fetch_history(&self, user_id: &str) -> Result<HistoryResponse> {
        let url = self.history_url(user_id);
        tracing::debug!("Fetching history from {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|err| VoyaError::transport(format!("History request failed: {err}")))?;

        if !response.status().is_success() {
            // Failed history responses are not interpreted further.
            let status = response.status().as_u16();
            return Err(VoyaError::api(
                status,
                format!("History request returned status {status}"),
            ));
        }

        response
            .json::<HistoryResponse>()
            .await
            .map_err(|err| VoyaError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to parse history response: {err}"),
            })
    }

    async fn submit_query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        tracing::debug!(
            "Submitting query for user {} (session: {:?})",
            request.user_id,
            request.session_id
        );

        let response = self
            .client
            .post(self.query_url())
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(|err| VoyaError::transport(format!("Query request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_query_error(status, &body));
        }

        response
            .json::<QueryResponse>()
            .await
            .map_err(|err| VoyaError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to parse query response: {err}"),
            })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Maps a non-success query response to an API error, preferring the
/// server's `detail` message when the body carries one.
fn map_query_error(status: StatusCode, body: &str) -> VoyaError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|wrapper| wrapper.detail)
        .unwrap_or_else(|_| QUERY_FAILED_FALLBACK.to_string());
    VoyaError::api(status.as_u16(), message)
}
