use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub paging: PagingConfig,
}

/// Connection settings for the demo REST backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the API (e.g., "https://dummyjson.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connection timeout in seconds (default: 10).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Where and how the session credential is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Override for the token file. Defaults to the platform data dir.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
    /// Lifetime requested for access tokens on sign-in (default: 60).
    #[serde(default = "default_expires_in_mins")]
    pub expires_in_mins: u32,
}

/// Listing defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Records per page when the caller does not say (default: 10).
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_base_url() -> String {
    "https://dummyjson.com".to_string()
}

fn default_connect_timeout() -> u32 {
    10
}

fn default_expires_in_mins() -> u32 {
    60
}

fn default_per_page() -> u32 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_path: None,
            expires_in_mins: default_expires_in_mins(),
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

impl SessionConfig {
    /// Resolve the token file location.
    ///
    /// Uses `token_path` when set, otherwise `<data dir>/playground/session.toml`,
    /// falling back to the current directory if no data dir is available.
    pub fn resolved_token_path(&self) -> PathBuf {
        if let Some(path) = &self.token_path {
            return path.clone();
        }
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("playground").join("session.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "https://dummyjson.com");
        assert_eq!(config.api.connect_timeout_seconds, 10);
        assert_eq!(config.session.expires_in_mins, 60);
        assert_eq!(config.paging.per_page, 10);
        assert!(config.session.token_path.is_none());
    }

    #[test]
    fn explicit_token_path_wins() {
        let session = SessionConfig {
            token_path: Some(PathBuf::from("/tmp/token.toml")),
            expires_in_mins: 5,
        };
        assert_eq!(
            session.resolved_token_path(),
            PathBuf::from("/tmp/token.toml")
        );
    }

    #[test]
    fn default_token_path_ends_with_session_file() {
        let path = SessionConfig::default().resolved_token_path();
        assert!(path.ends_with("playground/session.toml"));
    }
}
