//! Configuration loading.
//!
//! Resolves the API base URL from, in priority order:
//! 1. `~/.config/voya/config.toml`
//! 2. The `VOYA_API_URL` environment variable
//! 3. The compiled-in default

use std::path::PathBuf;

use crate::paths::VoyaPaths;
use crate::storage::load_toml;
use voya_core::config::{ConfigRoot, DEFAULT_API_URL};

/// Environment variable consulted when no config file is present.
pub const API_URL_ENV: &str = "VOYA_API_URL";

/// Service for loading client configuration.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service reading the default config path.
    ///
    /// Falls back to a path that simply does not exist when the config
    /// directory cannot be determined; resolution then continues with
    /// the environment and the default URL.
    pub fn new() -> Self {
        let path = VoyaPaths::config_file().unwrap_or_else(|_| PathBuf::from("config.toml"));
        Self { path }
    }

    /// Creates a service reading a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolves the API base URL.
    ///
    /// A malformed config file is treated like a missing one, with a
    /// warning; a broken config should not keep the client from
    /// starting against the default endpoint.
    pub fn base_url(&self) -> String {
        let from_file = match load_toml::<ConfigRoot>(&self.path) {
            Ok(config) => config.map(|root| root.api.base_url),
            Err(err) => {
                tracing::warn!("Ignoring unreadable config file {:?}: {}", self.path, err);
                None
            }
        };
        let from_env = std::env::var(API_URL_ENV).ok();
        resolve_base_url(from_file, from_env)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure resolution of the base URL from its two optional sources.
///
/// Blank values are skipped; the winning URL loses any trailing slash
/// so endpoint paths can be appended directly.
fn resolve_base_url(from_file: Option<String>, from_env: Option<String>) -> String {
    let chosen = from_file
        .filter(|url| !url.trim().is_empty())
        .or_else(|| from_env.filter(|url| !url.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    chosen.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_value_wins_over_env() {
        let url = resolve_base_url(
            Some("https://file.example.com".into()),
            Some("https://env.example.com".into()),
        );
        assert_eq!(url, "https://file.example.com");
    }

    #[test]
    fn test_env_used_when_no_file() {
        let url = resolve_base_url(None, Some("https://env.example.com".into()));
        assert_eq!(url, "https://env.example.com");
    }

    #[test]
    fn test_default_when_nothing_configured() {
        assert_eq!(resolve_base_url(None, None), DEFAULT_API_URL);
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let url = resolve_base_url(Some("  ".into()), Some(String::new()));
        assert_eq!(url, DEFAULT_API_URL);
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let url = resolve_base_url(Some("https://qna.example.com/".into()), None);
        assert_eq!(url, "https://qna.example.com");
    }

    #[test]
    fn test_base_url_read_from_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"https://qna.example.com\"\n").unwrap();

        let service = ConfigService::with_path(path);
        assert_eq!(service.base_url(), "https://qna.example.com");
    }

    #[test]
    fn test_malformed_config_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "api = [broken").unwrap();

        let service = ConfigService::with_path(path);
        assert_eq!(service.base_url(), DEFAULT_API_URL);
    }
}
