//! Active-conversation state container.
//!
//! `ChatState` holds the ordered exchanges of the active session plus
//! the loading flag, error banner, and active session id. All
//! transitions are pure update functions; no I/O happens here.
//!
//! A request-generation counter guards reconciliation: starting a new
//! chat or loading a stored conversation bumps the generation, so a
//! completion arriving for an earlier generation is dropped instead of
//! mutating a list it no longer belongs to.

use super::exchange::{ChatExchange, ExchangeStatus};
use crate::conversation::Conversation;
use crate::history::QueryResponse;

/// Ticket returned by [`ChatState::begin_submit`], identifying the
/// optimistic entry a later completion should reconcile against.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    query: String,
    generation: u64,
}

impl SubmitTicket {
    /// The query text the ticket was issued for.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// In-memory state of the active conversation.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    exchanges: Vec<ChatExchange>,
    session_id: Option<String>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl ChatState {
    /// Creates an empty state with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The exchanges of the active conversation, oldest first.
    pub fn exchanges(&self) -> &[ChatExchange] {
        &self.exchanges
    }

    /// The active session id, once the server has assigned one.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Whether a submission is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The current error banner, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Appends exactly one optimistic entry for the query and marks the
    /// state loading. Clears any previous error banner.
    ///
    /// Returns the ticket a later [`complete_submit`](Self::complete_submit)
    /// or [`fail_submit`](Self::fail_submit) must present.
    pub fn begin_submit(&mut self, query: &str, timestamp: impl Into<String>) -> SubmitTicket {
        self.exchanges.push(ChatExchange {
            query: query.to_string(),
            status: ExchangeStatus::Pending,
            session_id: self.session_id.clone(),
            timestamp: timestamp.into(),
        });
        self.loading = true;
        self.error = None;
        SubmitTicket {
            query: query.to_string(),
            generation: self.generation,
        }
    }

    /// Reconciles a successful response against the optimistic entry.
    ///
    /// The first pending exchange with matching query text is marked
    /// answered, exactly once. If no session was active, the
    /// server-assigned session id is adopted. Stale tickets (issued
    /// before a new chat or a conversation load) are dropped without
    /// touching the list.
    ///
    /// Returns `true` if an entry was reconciled.
    pub fn complete_submit(&mut self, ticket: &SubmitTicket, response: &QueryResponse) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.loading = false;

        let Some(entry) = self
            .exchanges
            .iter_mut()
            .find(|ex| ex.is_pending() && ex.query == ticket.query)
        else {
            return false;
        };

        entry.status = ExchangeStatus::Answered(response.ai_response.clone());
        entry.session_id = Some(response.session_id.clone());
        if self.session_id.is_none() {
            self.session_id = Some(response.session_id.clone());
        }
        true
    }

    /// Marks the optimistic entry failed and raises the error banner.
    ///
    /// Stale tickets are dropped, like in
    /// [`complete_submit`](Self::complete_submit).
    pub fn fail_submit(&mut self, ticket: &SubmitTicket, message: impl Into<String>) {
        if ticket.generation != self.generation {
            return;
        }
        self.loading = false;
        let message = message.into();

        if let Some(entry) = self
            .exchanges
            .iter_mut()
            .find(|ex| ex.is_pending() && ex.query == ticket.query)
        {
            entry.status = ExchangeStatus::Failed(message.clone());
        }
        self.error = Some(message);
    }

    /// Clears the active conversation, its session id, and the error
    /// banner, independent of prior state. In-flight completions for
    /// the cleared conversation become stale.
    pub fn start_new_chat(&mut self) {
        self.exchanges.clear();
        self.session_id = None;
        self.loading = false;
        self.error = None;
        self.generation += 1;
    }

    /// Replaces the active conversation with a stored one.
    ///
    /// All items load as answered exchanges and the conversation's
    /// session id becomes active, so the next submission continues it.
    pub fn load_conversation(&mut self, conversation: &Conversation) {
        self.exchanges = conversation.items.iter().map(ChatExchange::from).collect();
        self.session_id = Some(conversation.id.clone());
        self.loading = false;
        self.error = None;
        self.generation += 1;
    }

    /// Raises the error banner without touching the exchanges.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Dismisses the error banner.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
