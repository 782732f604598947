//! Configuration model.

use serde::{Deserialize, Serialize};

/// Base URL used when neither a config file nor the environment
/// provides one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Root of the `config.toml` document.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigRoot {
    #[serde(default)]
    pub api: ApiSettings,
}

/// Settings for reaching the remote Q&A service.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiSettings {
    /// Base URL of the service, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}
