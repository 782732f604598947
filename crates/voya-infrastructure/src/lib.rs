//! Infrastructure layer: file-backed implementations of the core
//! storage traits plus path and configuration services.

pub mod config_service;
pub mod identity_store;
pub mod paths;
pub mod storage;

pub use config_service::{API_URL_ENV, ConfigService};
pub use identity_store::FileIdentityStore;
pub use paths::VoyaPaths;
