//! Identity store trait.

use super::model::UserId;
use crate::error::Result;

/// An abstract store for the client's persistent identity.
///
/// Decouples the application from the concrete storage mechanism
/// (a config-directory file in production, an in-memory value in
/// tests). The contract is load-or-create: the same token is returned
/// on every run once one has been persisted.
pub trait IdentityStore: Send + Sync {
    /// Returns the persisted identity, creating and persisting a fresh
    /// one on first run.
    fn load_or_create(&self) -> Result<UserId>;
}
