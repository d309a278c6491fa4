//! Client configuration

use crate::{ClientError, ClientResult};
use std::time::Duration;

/// Debounce applied to free-text search before querying the API
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the inventory API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:3333")
    pub base_url: String,

    /// Bearer token restored from a previous login
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Quiet period after the last keystroke before a search is sent
    pub search_debounce_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `BRECHO_API_URL` (required)
    /// - `BRECHO_API_TOKEN`
    /// - `BRECHO_TIMEOUT_SECS`
    /// - `BRECHO_SEARCH_DEBOUNCE_MS`
    pub fn from_env() -> ClientResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable lookup
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let base_url = lookup("BRECHO_API_URL")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ClientError::Config("BRECHO_API_URL must be set".into()))?;

        let mut config = Self::new(base_url);
        config.token = lookup("BRECHO_API_TOKEN").filter(|s| !s.is_empty());

        if let Some(raw) = lookup("BRECHO_TIMEOUT_SECS") {
            config.timeout = parse_number("BRECHO_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = lookup("BRECHO_SEARCH_DEBOUNCE_MS") {
            config.search_debounce_ms = parse_number("BRECHO_SEARCH_DEBOUNCE_MS", &raw)?;
        }

        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the search debounce
    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce_ms = debounce.as_millis() as u64;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Create an API client from this configuration
    pub fn build_api_client(&self) -> ClientResult<super::ApiClient> {
        super::ApiClient::from_config(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3333")
    }
}

fn parse_number(name: &str, raw: &str) -> ClientResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("{name} must be a number, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = ClientConfig::from_vars(vars(&[("BRECHO_API_URL", "http://api")])).unwrap();
        assert_eq!(config.base_url, "http://api");
        assert!(config.token.is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_from_vars_overrides() {
        let config = ClientConfig::from_vars(vars(&[
            ("BRECHO_API_URL", "http://api"),
            ("BRECHO_API_TOKEN", "abc"),
            ("BRECHO_TIMEOUT_SECS", "5"),
            ("BRECHO_SEARCH_DEBOUNCE_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.search_debounce_ms, 250);
    }

    #[test]
    fn test_from_vars_errors() {
        assert!(matches!(
            ClientConfig::from_vars(vars(&[])),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_vars(vars(&[
                ("BRECHO_API_URL", "http://api"),
                ("BRECHO_TIMEOUT_SECS", "soon"),
            ])),
            Err(ClientError::Config(_))
        ));
    }
}
