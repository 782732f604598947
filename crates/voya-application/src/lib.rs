//! Application layer: chat and history orchestration.

mod chat_service;

pub use chat_service::{ChatService, HISTORY_LOAD_FAILED, QUERY_FAILED_FALLBACK};
