//! Prediction service API: wire types and the HTTP client

mod client;
mod types;

pub use client::{HttpPredictionClient, PredictionApi, BATCH_PREDICT_PATH, MODEL_INFO_PATH, PREDICT_PATH};
pub use types::{
    decode_reply, BatchPrediction, BeanClass, BatchRequest, BatchResult, ClassProbability, ModelInfo,
    PredictionResult, Probabilities, Reply,
};
