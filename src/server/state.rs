//! Shared state of the web UI server

use tokio::sync::RwLock;

use crate::api::{HttpPredictionClient, ModelInfo};
use crate::config::UiServerConfig;
use crate::error::Result;

/// Application state shared across handlers
pub struct UiState {
    pub api: HttpPredictionClient,
    /// Metadata fetched at startup; `None` if the service was unreachable
    pub model_info: RwLock<Option<ModelInfo>>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl UiState {
    pub fn new(config: &UiServerConfig) -> Result<Self> {
        let api = HttpPredictionClient::new(&config.client)?;
        Ok(Self {
            api,
            model_info: RwLock::new(None),
            started_at: chrono::Utc::now(),
        })
    }

    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now().signed_duration_since(self.started_at).num_seconds()
    }
}
