//! File-backed identity store.
//!
//! Persists the pseudo-random user identifier at
//! `~/.config/voya/identity.toml`. Created once on first run, read on
//! every subsequent load. No expiry, no validation, no collision
//! detection.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::paths::VoyaPaths;
use crate::storage::{load_toml, store_toml};
use voya_core::error::{Result, VoyaError};
use voya_core::user::{IdentityStore, UserId};

/// On-disk shape of the identity file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IdentityRecord {
    user_id: String,
    created_at: String,
}

/// Identity store backed by a TOML file in the config directory.
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    /// Creates a store at the default path (`~/.config/voya/identity.toml`).
    pub fn new() -> Result<Self> {
        let path = VoyaPaths::identity_file().map_err(|e| VoyaError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path of the identity file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl IdentityStore for FileIdentityStore {
    fn load_or_create(&self) -> Result<UserId> {
        if let Some(record) = load_toml::<IdentityRecord>(&self.path)? {
            return Ok(UserId::from_stored(record.user_id));
        }

        let user_id = UserId::generate();
        let record = IdentityRecord {
            user_id: user_id.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        store_toml(&self.path, &record)?;
        tracing::info!("Created new user identity: {}", user_id);

        Ok(user_id)
    }
}
