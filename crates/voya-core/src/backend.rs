//! Backend trait for the remote question-answering service.

use crate::error::Result;
use crate::history::{HistoryResponse, QueryRequest, QueryResponse};
use async_trait::async_trait;

/// An abstract client for the remote Q&A service.
///
/// This trait defines the two remote operations the client performs,
/// decoupling the application's flows from the HTTP implementation so
/// they can be exercised against in-memory fakes.
#[async_trait]
pub trait QnaBackend: Send + Sync {
    /// Retrieves the flat history of a user's past exchanges.
    ///
    /// # Errors
    ///
    /// Any transport failure or non-success status is an error; the
    /// response body of failed requests is not interpreted.
    async fn fetch_history(&self, user_id: &str) -> Result<HistoryResponse>;

    /// Submits a query and awaits the structured answer.
    ///
    /// # Errors
    ///
    /// Non-success statuses carry the server's `detail` message where
    /// one was provided; transport failures carry a generic message.
    async fn submit_query(&self, request: &QueryRequest) -> Result<QueryResponse>;
}
