//! Backend client configuration.
//!
//! Fields with defaults can be omitted when loading from environment
//! variables; see the web crate's `ServerConfig` for the loader.

use serde::{Deserialize, Serialize};
use timetable_admin_platform_access::DEFAULT_STORAGE_KEY;

/// Settings for reaching the backend API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every API path is appended to, e.g. "http://localhost:5000/api".
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds. Browsers apply their own limits, so
    /// this only takes effect in native builds.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Browser storage key for the bearer token.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
            storage_key: default_storage_key(),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at a different backend.
    #[must_use]
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_has_correct_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.storage_key, "auth_token");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_base_url": "https://tt.example.edu/api"}"#)
                .expect("deserialize");
        assert_eq!(config.api_base_url, "https://tt.example.edu/api");
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.storage_key, "auth_token");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::with_base_url("http://backend:5000/api/");
        assert_eq!(config.normalized_base_url(), "http://backend:5000/api");
    }
}
