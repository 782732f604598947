//! Conversation domain module.
//!
//! - `model`: the derived `Conversation` view and title rules
//! - `grouping`: order-preserving grouping of flat history items

mod grouping;
mod model;

pub use grouping::group_into_conversations;
pub use model::{Conversation, TITLE_MAX_CHARS};
