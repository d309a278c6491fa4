//! Mock server configuration

use crate::error::ConfigError;

/// Token accepted when `MOCK_TOKEN` is not set
pub const DEFAULT_TOKEN: &str = "mock-token";

/// Mock server configuration
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// HTTP port (env: MOCK_PORT, 0 picks a free port)
    pub port: u16,
    /// Serve `GET /pieces/filter` (env: MOCK_DISABLE_FILTER_ROUTE turns it off)
    pub filter_route: bool,
    /// Bearer token issued on login and required by every other route
    pub token: String,
    pub username: String,
    pub password: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            port: 3333,
            filter_route: true,
            token: DEFAULT_TOKEN.to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl MockConfig {
    /// Read the configuration from the environment, after loading `.env`
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("MOCK_PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "MOCK_PORT",
                value: v,
            })?,
            None => defaults.port,
        };
        let filter_route = !lookup("MOCK_DISABLE_FILTER_ROUTE")
            .is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes"));

        Ok(Self {
            port,
            filter_route,
            token: lookup("MOCK_TOKEN").unwrap_or(defaults.token),
            username: lookup("MOCK_USERNAME").unwrap_or(defaults.username),
            password: lookup("MOCK_PASSWORD").unwrap_or(defaults.password),
        })
    }

    /// Same backend without `/pieces/filter`
    pub fn without_filter_route(mut self) -> Self {
        self.filter_route = false;
        self
    }
}
