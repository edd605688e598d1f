//! HTTP client for the upstream prediction service

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::features::FeatureVector;

use super::types::{decode_reply, BatchRequest, BatchResult, ModelInfo, PredictionResult, Reply};

pub const MODEL_INFO_PATH: &str = "model_info";
pub const PREDICT_PATH: &str = "predict";
pub const BATCH_PREDICT_PATH: &str = "batch_predict";

/// The three endpoints the form controller talks to
#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn model_info(&self) -> Result<ModelInfo>;

    async fn predict(&self, features: &FeatureVector) -> Result<PredictionResult>;

    async fn batch_predict(&self, instances: &[FeatureVector]) -> Result<BatchResult>;
}

/// `reqwest` implementation of [`PredictionApi`]
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: reqwest::Client,
    base_url: url::Url,
}

impl HttpPredictionClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url()?,
        })
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<url::Url> {
        Ok(self.base_url.join(path)?)
    }

    /// The status code is not inspected: the service reports failures in the
    /// body, and the body decides.
    async fn read_reply<T: Reply>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body: Value = response.json().await?;
        debug!(status = %status, "Received prediction service reply");
        decode_reply(body)
    }

    async fn get<T: Reply>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?;
        Self::read_reply(response).await
    }

    async fn post<B: Serialize + ?Sized + Sync, T: Reply>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        Self::read_reply(response).await
    }
}

#[async_trait]
impl PredictionApi for HttpPredictionClient {
    async fn model_info(&self) -> Result<ModelInfo> {
        self.get(MODEL_INFO_PATH).await
    }

    async fn predict(&self, features: &FeatureVector) -> Result<PredictionResult> {
        self.post(PREDICT_PATH, features).await
    }

    async fn batch_predict(&self, instances: &[FeatureVector]) -> Result<BatchResult> {
        self.post(BATCH_PREDICT_PATH, &BatchRequest { instances }).await
    }
}
