//! Unified path management for voya's client-side files.
//!
//! The client owns three small pieces of local state: the identity
//! file, the optional configuration file, and the log directory. All
//! of them live under the platform config directory.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/voya/              # Config directory (platform-dependent)
//! ├── config.toml              # API base URL (optional)
//! ├── identity.toml            # Persistent user identity
//! └── logs/                    # Application logs
//!     └── voya.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for voya.
pub struct VoyaPaths;

impl VoyaPaths {
    /// Returns the voya configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/voya/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("voya"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the persistent identity file.
    pub fn identity_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("identity.toml"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = VoyaPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("voya"));
    }

    #[test]
    fn test_identity_file() {
        let identity_file = VoyaPaths::identity_file().unwrap();
        assert!(identity_file.ends_with("identity.toml"));
        let config_dir = VoyaPaths::config_dir().unwrap();
        assert!(identity_file.starts_with(&config_dir));
    }

    #[test]
    fn test_config_file() {
        let config_file = VoyaPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
    }

    #[test]
    fn test_logs_dir() {
        let logs_dir = VoyaPaths::logs_dir().unwrap();
        assert!(logs_dir.ends_with("logs"));
        let config_dir = VoyaPaths::config_dir().unwrap();
        assert!(logs_dir.starts_with(&config_dir));
    }
}
