//! Interaction layer: the HTTP implementation of the Q&A backend.

mod qna_client;

pub use qna_client::{QUERY_FAILED_FALLBACK, QnaClient};
