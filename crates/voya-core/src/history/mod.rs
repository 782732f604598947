//! History domain module.
//!
//! Wire types for the remote question-answering API: individual history
//! items, query requests/responses, and the flat history listing.

mod model;

pub use model::{
    HistoryItem, HistoryResponse, QUERY_MAX_CHARS, QUERY_MIN_CHARS, QueryRequest, QueryResponse,
    StructuredAnswer, validate_query_length,
};
