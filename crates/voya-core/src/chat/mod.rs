//! Active-conversation state module.
//!
//! - `exchange`: local exchange entries (`ChatExchange`, `ExchangeStatus`)
//! - `state`: the pure state container (`ChatState`, `SubmitTicket`)

mod exchange;
mod state;

pub use exchange::{ChatExchange, ExchangeStatus};
pub use state::{ChatState, SubmitTicket};
