//! User identity model.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of every generated identity token.
pub const USER_ID_PREFIX: &str = "user_";

/// Number of random characters after the prefix.
const TOKEN_LEN: usize = 13;

const TOKEN_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// An opaque per-client user identifier.
///
/// Not an authenticated identity: it exists only to scope history on
/// the server. Generated once per client and kept for the lifetime of
/// the identity file. Collisions are accepted as negligible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generates a fresh pseudo-random identifier
    /// (`user_` followed by 13 base-36 characters).
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let token: String = (0..TOKEN_LEN)
            .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
            .collect();
        Self(format!("{USER_ID_PREFIX}{token}"))
    }

    /// Wraps a previously persisted identifier.
    ///
    /// No validation: whatever was stored is the identity, including
    /// tokens written by older client versions.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
