//! Server configuration, loaded via the `config` crate from environment
//! variables.
//!
//! Nested fields use `__` as separator, e.g. `API__API_BASE_URL`.

use serde::Deserialize;
use timetable_admin_gateway::ClientConfig;

/// Backend base URL as published to the browser, provided to the render
/// context.
#[derive(Debug, Clone)]
pub struct PublishedApiBaseUrl(pub String);

/// Server configuration composed from library configs.
#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    /// Backend API settings, published to the browser at render time.
    #[serde(default)]
    pub api: ClientConfig,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_defaults_apply_when_unset() {
        let config: ServerConfig = config::Config::builder()
            .build()
            .expect("build")
            .try_deserialize()
            .expect("deserialize");
        assert_eq!(config.api.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.api.storage_key, "auth_token");
    }

    #[test]
    fn nested_override() {
        let config: ServerConfig = config::Config::builder()
            .set_override("api.api_base_url", "https://timetable.example.edu/api")
            .expect("override")
            .build()
            .expect("build")
            .try_deserialize()
            .expect("deserialize");
        assert_eq!(config.api.api_base_url, "https://timetable.example.edu/api");
        assert_eq!(config.api.request_timeout_seconds, 30);
    }
}
