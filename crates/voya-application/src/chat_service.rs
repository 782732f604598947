//! Chat orchestration over the backend trait.
//!
//! `ChatService` owns the active-conversation state and the grouped
//! history listing, and drives the two remote flows: submitting a
//! query and refreshing history. All state transitions go through the
//! pure `ChatState` update functions; this layer only sequences them
//! around the network calls.

use std::sync::Arc;

use chrono::Utc;

use voya_core::VoyaError;
use voya_core::backend::QnaBackend;
use voya_core::chat::ChatState;
use voya_core::conversation::{Conversation, group_into_conversations};
use voya_core::history::{QueryRequest, validate_query_length};
use voya_core::user::UserId;

/// Banner shown when the history listing cannot be loaded. The failed
/// response body is never interpreted.
pub const HISTORY_LOAD_FAILED: &str = "Failed to load query history.";

/// Banner shown when a submission fails without a server-provided
/// detail message.
pub const QUERY_FAILED_FALLBACK: &str = "Failed to get a response from the AI.";

/// Drives the conversation and history flows for one user.
pub struct ChatService {
    backend: Arc<dyn QnaBackend>,
    user_id: UserId,
    state: ChatState,
    conversations: Vec<Conversation>,
}

impl ChatService {
    /// Creates a service for the given user over the given backend.
    pub fn new(backend: Arc<dyn QnaBackend>, user_id: UserId) -> Self {
        Self {
            backend,
            user_id,
            state: ChatState::new(),
            conversations: Vec::new(),
        }
    }

    /// The identity all requests are scoped to.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The active-conversation state.
    pub fn state(&self) -> &ChatState {
        &self.state
    }

    /// The grouped history listing, newest activity first.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Submits a query and reconciles the response.
    ///
    /// Sequence: append the optimistic entry, POST, then either mark
    /// the entry answered (adopting a fresh session id when this was
    /// the first message) and refresh history, or mark it failed with
    /// the server's detail message. Whitespace-only input is a no-op;
    /// input outside the service's length bounds fails the entry
    /// locally without a network call.
    pub async fn submit(&mut self, raw_query: &str) {
        let query = raw_query.trim();
        if query.is_empty() {
            return;
        }

        let ticket = self.state.begin_submit(query, Utc::now().to_rfc3339());

        if let Err(err) = validate_query_length(query) {
            self.state.fail_submit(&ticket, user_facing_message(&err));
            return;
        }

        let request = QueryRequest::new(
            query,
            self.user_id.as_str(),
            self.state.session_id().map(String::from),
        );

        match self.backend.submit_query(&request).await {
            Ok(response) => {
                tracing::debug!("Query answered in session {}", response.session_id);
                self.state.complete_submit(&ticket, &response);
                // Best effort: a failed refresh raises its own banner
                // but does not disturb the answered exchange.
                self.refresh_history().await;
            }
            Err(err) => {
                tracing::warn!("Query submission failed: {}", err);
                self.state.fail_submit(&ticket, user_facing_message(&err));
            }
        }
    }

    /// Replaces the conversation listing wholesale from the server.
    ///
    /// On failure the listing degrades to empty and the generic
    /// history banner is raised; the active conversation is untouched.
    pub async fn refresh_history(&mut self) {
        match self.backend.fetch_history(self.user_id.as_str()).await {
            Ok(response) => {
                self.conversations = group_into_conversations(response.history);
            }
            Err(err) => {
                tracing::warn!("History fetch failed: {}", err);
                self.conversations = Vec::new();
                self.state.set_error(HISTORY_LOAD_FAILED);
            }
        }
    }

    /// Clears the active conversation and session id.
    pub fn start_new_chat(&mut self) {
        self.state.start_new_chat();
    }

    /// Loads the conversation at `index` (0-based, listing order) into
    /// the active view. Returns its title, or `None` for an
    /// out-of-range index.
    pub fn load_conversation(&mut self, index: usize) -> Option<String> {
        let conversation = self.conversations.get(index)?;
        self.state.load_conversation(conversation);
        Some(conversation.title.clone())
    }
}

/// Maps an error to the banner text the user sees.
fn user_facing_message(err: &VoyaError) -> String {
    match err {
        VoyaError::Api { message, .. } => message.clone(),
        VoyaError::InvalidQuery(message) => message.clone(),
        _ => QUERY_FAILED_FALLBACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use voya_core::chat::ExchangeStatus;
    use voya_core::error::Result;
    use voya_core::history::{HistoryItem, HistoryResponse, QueryResponse};

    /// In-memory backend returning queued results and recording the
    /// requests it saw.
    #[derive(Default)]
    struct MockBackend {
        query_results: Mutex<VecDeque<Result<QueryResponse>>>,
        history_results: Mutex<VecDeque<Result<HistoryResponse>>>,
        seen_requests: Mutex<Vec<QueryRequest>>,
    }

    impl MockBackend {
        fn push_query(&self, result: Result<QueryResponse>) {
            self.query_results.lock().unwrap().push_back(result);
        }

        fn push_history(&self, result: Result<HistoryResponse>) {
            self.history_results.lock().unwrap().push_back(result);
        }

        fn seen_requests(&self) -> Vec<QueryRequest> {
            self.seen_requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl QnaBackend for MockBackend {
        async fn fetch_history(&self, user_id: &str) -> Result<HistoryResponse> {
            self.history_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Ok(HistoryResponse {
                        history: Vec::new(),
                        user_id: user_id.to_string(),
                    })
                })
        }

        async fn submit_query(&self, request: &QueryRequest) -> Result<QueryResponse> {
            self.seen_requests.lock().unwrap().push(request.clone());
            self.query_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected query submission")
        }
    }

    fn response(ai_response: &str, session_id: &str) -> QueryResponse {
        QueryResponse {
            ai_response: ai_response.to_string(),
            structured_data: None,
            session_id: session_id.to_string(),
            user_id: "user_test".to_string(),
            timestamp: "2025-06-01T10:00:00".to_string(),
        }
    }

    fn history_item(session_id: &str, query: &str, timestamp: &str) -> HistoryItem {
        HistoryItem {
            query: query.to_string(),
            ai_response: "stored answer".to_string(),
            session_id: session_id.to_string(),
            user_id: "user_test".to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    fn service(backend: Arc<MockBackend>) -> ChatService {
        ChatService::new(backend, UserId::from_stored("user_test"))
    }

    #[tokio::test]
    async fn test_first_message_adopts_server_session() {
        let backend = Arc::new(MockBackend::default());
        backend.push_query(Ok(response("Yes...", "s1")));
        backend.push_history(Ok(HistoryResponse {
            history: vec![history_item("s1", "Do I need a visa for Japan?", "T")],
            user_id: "user_test".to_string(),
        }));

        let mut service = service(backend.clone());
        service.submit("Do I need a visa for Japan?").await;

        let state = service.state();
        assert_eq!(state.exchanges().len(), 1);
        assert_eq!(state.exchanges()[0].answered_text(), Some("Yes..."));
        assert_eq!(state.session_id(), Some("s1"));
        assert!(!state.is_loading());
        assert!(state.error().is_none());

        assert_eq!(service.conversations().len(), 1);
        assert_eq!(service.conversations()[0].id, "s1");
        assert_eq!(service.conversations()[0].items.len(), 1);

        // The first request carried no session id.
        assert_eq!(backend.seen_requests()[0].session_id, None);
    }

    #[tokio::test]
    async fn test_followup_message_echoes_session_id() {
        let backend = Arc::new(MockBackend::default());
        backend.push_query(Ok(response("first answer", "s1")));
        backend.push_query(Ok(response("second answer", "s1")));

        let mut service = service(backend.clone());
        service.submit("what about a work permit?").await;
        service.submit("and for my spouse too?").await;

        let requests = backend.seen_requests();
        assert_eq!(requests[0].session_id, None);
        assert_eq!(requests[1].session_id, Some("s1".to_string()));
    }

    #[tokio::test]
    async fn test_rejected_query_shows_server_detail() {
        let backend = Arc::new(MockBackend::default());
        backend.push_query(Err(VoyaError::api(503, "LLM service is not configured.")));

        let mut service = service(backend);
        service.submit("Do I need a visa for Japan?").await;

        let state = service.state();
        assert_eq!(
            state.exchanges()[0].status,
            ExchangeStatus::Failed("LLM service is not configured.".to_string())
        );
        assert_eq!(state.error(), Some("LLM service is not configured."));
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_transport_failure_uses_generic_message() {
        let backend = Arc::new(MockBackend::default());
        backend.push_query(Err(VoyaError::transport("connection refused")));

        let mut service = service(backend);
        service.submit("Do I need a visa for Japan?").await;

        assert_eq!(service.state().error(), Some(QUERY_FAILED_FALLBACK));
    }

    #[tokio::test]
    async fn test_short_query_fails_locally_without_network() {
        let backend = Arc::new(MockBackend::default());

        let mut service = service(backend.clone());
        service.submit("hi").await;

        // Exactly one optimistic entry, failed locally; no request sent.
        let state = service.state();
        assert_eq!(state.exchanges().len(), 1);
        assert!(matches!(
            state.exchanges()[0].status,
            ExchangeStatus::Failed(_)
        ));
        assert!(state.error().is_some());
        assert!(backend.seen_requests().is_empty());
    }

    #[tokio::test]
    async fn test_blank_input_is_a_noop() {
        let backend = Arc::new(MockBackend::default());

        let mut service = service(backend.clone());
        service.submit("   ").await;

        assert!(service.state().exchanges().is_empty());
        assert!(backend.seen_requests().is_empty());
    }

    #[tokio::test]
    async fn test_history_failure_degrades_to_empty_listing_plus_banner() {
        let backend = Arc::new(MockBackend::default());
        backend.push_history(Err(VoyaError::transport("connection refused")));

        let mut service = service(backend);
        service.refresh_history().await;

        assert!(service.conversations().is_empty());
        assert_eq!(service.state().error(), Some(HISTORY_LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_history_refresh_replaces_listing_wholesale() {
        let backend = Arc::new(MockBackend::default());
        backend.push_history(Ok(HistoryResponse {
            history: vec![
                history_item("s1", "older chat", "2025-06-01T09:00:00"),
                history_item("s2", "newer chat", "2025-06-01T10:00:00"),
            ],
            user_id: "user_test".to_string(),
        }));
        backend.push_history(Ok(HistoryResponse {
            history: vec![history_item("s3", "only chat", "2025-06-01T11:00:00")],
            user_id: "user_test".to_string(),
        }));

        let mut service = service(backend);
        service.refresh_history().await;
        assert_eq!(service.conversations().len(), 2);
        assert_eq!(service.conversations()[0].id, "s2");

        service.refresh_history().await;
        assert_eq!(service.conversations().len(), 1);
        assert_eq!(service.conversations()[0].id, "s3");
    }

    #[tokio::test]
    async fn test_new_chat_clears_active_conversation() {
        let backend = Arc::new(MockBackend::default());
        backend.push_query(Ok(response("answer", "s1")));

        let mut service = service(backend);
        service.submit("Do I need a visa for Japan?").await;
        service.start_new_chat();

        assert!(service.state().exchanges().is_empty());
        assert!(service.state().session_id().is_none());
    }

    #[tokio::test]
    async fn test_load_conversation_activates_its_session() {
        let backend = Arc::new(MockBackend::default());
        backend.push_history(Ok(HistoryResponse {
            history: vec![
                history_item("s1", "first question of the chat", "2025-06-01T09:00:00"),
                history_item("s1", "second question", "2025-06-01T10:00:00"),
            ],
            user_id: "user_test".to_string(),
        }));

        let mut service = service(backend);
        service.refresh_history().await;

        let title = service.load_conversation(0).unwrap();
        assert_eq!(title, "first question of the chat");
        assert_eq!(service.state().exchanges().len(), 2);
        assert_eq!(service.state().session_id(), Some("s1"));

        assert!(service.load_conversation(5).is_none());
    }
}
