//! In-memory exchange types for the active conversation.

use crate::history::HistoryItem;

/// Outcome of a single submitted query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeStatus {
    /// Submitted; the answer has not arrived yet.
    Pending,
    /// The server answered with the given response text.
    Answered(String),
    /// The submission failed with the given message.
    Failed(String),
}

/// A single query/answer exchange in the active conversation.
///
/// Unlike [`HistoryItem`] this is a purely local view: the optimistic
/// entry exists before the server has seen the query, and a failed
/// entry never reaches the server's history at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    /// The submitted query text.
    pub query: String,
    /// Current status of the exchange.
    pub status: ExchangeStatus,
    /// Session the exchange belongs to, once known.
    pub session_id: Option<String>,
    /// Timestamp of submission or of the stored item (ISO 8601).
    pub timestamp: String,
}

impl ChatExchange {
    /// Whether this exchange is still awaiting its answer.
    pub fn is_pending(&self) -> bool {
        matches!(self.status, ExchangeStatus::Pending)
    }

    /// The answer text, if the exchange completed successfully.
    pub fn answered_text(&self) -> Option<&str> {
        match &self.status {
            ExchangeStatus::Answered(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&HistoryItem> for ChatExchange {
    fn from(item: &HistoryItem) -> Self {
        Self {
            query: item.query.clone(),
            status: ExchangeStatus::Answered(item.ai_response.clone()),
            session_id: Some(item.session_id.clone()),
            timestamp: item.timestamp.clone(),
        }
    }
}
