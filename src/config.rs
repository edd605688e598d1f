//! Configuration for the upstream API client and the web UI server

use std::time::Duration;

use crate::error::{ClassifierError, Result};

/// Default upstream prediction service (the Flask app listens on :5000)
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/";

/// Upstream prediction API configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are resolved against
    pub api_url: String,
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: std::env::var("CLASSIFIER_API_URL")
                .ok()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout_secs: std::env::var("CLASSIFIER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout_secs: None,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Parse the base URL, forcing a trailing slash so endpoint paths are
    /// appended rather than replacing the last segment.
    pub fn base_url(&self) -> Result<url::Url> {
        let mut raw = self.api_url.trim().to_string();
        if raw.is_empty() {
            return Err(ClassifierError::Config("API URL is empty".to_string()));
        }
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = url::Url::parse(&raw)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ClassifierError::Config(format!(
                "Unsupported URL scheme: '{}'. Only http and https are allowed.",
                scheme
            ))),
        }
    }
}

/// Web UI server configuration
#[derive(Debug, Clone)]
pub struct UiServerConfig {
    pub host: String,
    pub port: u16,
    pub client: ClientConfig,
}

impl Default for UiServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("UI_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("UI_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            client: ClientConfig::default(),
        }
    }
}
