//! Wire types for the question-answering API.
//!
//! These mirror the JSON payloads exchanged with the remote service.
//! Timestamps are carried as ISO 8601 strings exactly as the server
//! produces them; within one deployment they sort lexicographically.

use crate::error::{Result, VoyaError};
use serde::{Deserialize, Serialize};

/// Minimum number of characters the service accepts for a query.
pub const QUERY_MIN_CHARS: usize = 5;

/// Maximum number of characters the service accepts for a query.
pub const QUERY_MAX_CHARS: usize = 500;

/// A single query/response pair as returned by the history endpoint.
///
/// Items carry no stable identifier across reloads; within a session
/// they are identified by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// The original query text.
    pub query: String,
    /// The AI-generated response (Markdown).
    pub ai_response: String,
    /// Server-assigned session identifier grouping related exchanges.
    pub session_id: String,
    /// The user this exchange belongs to.
    pub user_id: String,
    /// Timestamp of the exchange (ISO 8601 format).
    pub timestamp: String,
}

/// Structured extraction fields the service may attach to a response.
///
/// All fields are optional; the service folds them into `ai_response`
/// as Markdown as well, so clients can ignore them for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StructuredAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_visa_documentation: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_necessary_documents: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_travel_advisories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_response: Option<String>,
}

/// Request body for the query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to be answered.
    pub query: String,
    /// Identifier of the submitting user.
    pub user_id: String,
    /// Session to continue; `None` starts a new conversation and lets
    /// the server assign one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl QueryRequest {
    /// Builds a request for the given (already trimmed) query text.
    pub fn new(
        query: impl Into<String>,
        user_id: impl Into<String>,
        session_id: Option<String>,
    ) -> Self {
        Self {
            query: query.into(),
            user_id: user_id.into(),
            session_id,
        }
    }
}

/// Validates query text against the service's length constraints.
///
/// The bounds match the server-side schema; checking here avoids a
/// round trip for input the server would reject anyway.
pub fn validate_query_length(query: &str) -> Result<()> {
    let len = query.chars().count();
    if len < QUERY_MIN_CHARS {
        return Err(VoyaError::invalid_query(format!(
            "Query must be at least {QUERY_MIN_CHARS} characters long."
        )));
    }
    if len > QUERY_MAX_CHARS {
        return Err(VoyaError::invalid_query(format!(
            "Query must be at most {QUERY_MAX_CHARS} characters long."
        )));
    }
    Ok(())
}

/// Response body of the query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The AI-generated response (Markdown).
    pub ai_response: String,
    /// Optional structured extraction of the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<StructuredAnswer>,
    /// Session id assigned by the server on the first message of a
    /// conversation; echoed back on subsequent messages.
    pub session_id: String,
    /// The user this response belongs to.
    pub user_id: String,
    /// Timestamp of the exchange (ISO 8601 format).
    pub timestamp: String,
}

/// Response body of the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// All stored exchanges for the user, flat (ungrouped).
    pub history: Vec<HistoryItem>,
    /// The user the history was retrieved for.
    pub user_id: String,
}
