//! Shared fixtures: a scripted in-process API and a mock upstream service
#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{http::StatusCode, routing::{get, post}, Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use bean_classifier::api::{
    BatchPrediction, BatchResult, ModelInfo, PredictionApi, PredictionResult, Probabilities,
};
use bean_classifier::error::{ClassifierError, Result};
use bean_classifier::features::FeatureVector;

pub fn dermason() -> PredictionResult {
    PredictionResult {
        label: "DERMASON".to_string(),
        confidence: 91.25,
        scientific_name: "Phaseolus vulgaris".to_string(),
        description: "White kidney bean".to_string(),
        color: "#FFFFFF".to_string(),
        probabilities: Some(Probabilities::from([("SIRA", 5.0), ("DERMASON", 91.25), ("CALI", 3.75)])),
        prediction: Some(3),
    }
}

pub fn seker() -> PredictionResult {
    PredictionResult {
        label: "SEKER".to_string(),
        confidence: 80.0,
        scientific_name: "Phaseolus vulgaris".to_string(),
        description: "Sugar bean".to_string(),
        color: "#FFD700".to_string(),
        probabilities: None,
        prediction: Some(5),
    }
}

pub fn batch_row(instance: u32) -> BatchPrediction {
    BatchPrediction {
        instance,
        label: "SIRA".to_string(),
        scientific_name: "Vigna radiata".to_string(),
        description: "Mung bean".to_string(),
        color: "#90EE90".to_string(),
        confidence: Some(70.0),
    }
}

/// A scripted reply, optionally delayed
pub struct Scripted<T> {
    pub delay: Duration,
    pub reply: Result<T>,
}

impl<T> Scripted<T> {
    pub fn now(reply: Result<T>) -> Self {
        Self { delay: Duration::ZERO, reply }
    }

    pub fn after(millis: u64, reply: Result<T>) -> Self {
        Self { delay: Duration::from_millis(millis), reply }
    }
}

/// In-process [`PredictionApi`] that records every call
#[derive(Default)]
pub struct ScriptedApi {
    pub info: Mutex<Option<Result<ModelInfo>>>,
    pub predictions: Mutex<VecDeque<Scripted<PredictionResult>>>,
    pub batches: Mutex<VecDeque<Scripted<BatchResult>>>,
    pub predict_calls: Mutex<Vec<FeatureVector>>,
    pub batch_calls: Mutex<Vec<Vec<FeatureVector>>>,
    pub info_calls: Mutex<usize>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prediction(self, scripted: Scripted<PredictionResult>) -> Self {
        self.predictions.lock().push_back(scripted);
        self
    }

    pub fn with_batch(self, scripted: Scripted<BatchResult>) -> Self {
        self.batches.lock().push_back(scripted);
        self
    }

    pub fn with_info(self, reply: Result<ModelInfo>) -> Self {
        *self.info.lock() = Some(reply);
        self
    }

    pub fn network_calls(&self) -> usize {
        self.predict_calls.lock().len() + self.batch_calls.lock().len()
    }
}

#[async_trait]
impl PredictionApi for ScriptedApi {
    async fn model_info(&self) -> Result<ModelInfo> {
        *self.info_calls.lock() += 1;
        self.info
            .lock()
            .take()
            .unwrap_or_else(|| Err(ClassifierError::Decode("no model info scripted".to_string())))
    }

    async fn predict(&self, features: &FeatureVector) -> Result<PredictionResult> {
        self.predict_calls.lock().push(features.clone());
        let scripted = self.predictions.lock().pop_front();
        match scripted {
            Some(Scripted { delay, reply }) => {
                tokio::time::sleep(delay).await;
                reply
            }
            None => Err(ClassifierError::Decode("no prediction scripted".to_string())),
        }
    }

    async fn batch_predict(&self, instances: &[FeatureVector]) -> Result<BatchResult> {
        self.batch_calls.lock().push(instances.to_vec());
        let scripted = self.batches.lock().pop_front();
        match scripted {
            Some(Scripted { delay, reply }) => {
                tokio::time::sleep(delay).await;
                reply
            }
            None => Err(ClassifierError::Decode("no batch scripted".to_string())),
        }
    }
}

/// Mock of the upstream prediction service on an ephemeral port
pub struct MockUpstream {
    pub addr: SocketAddr,
    pub bodies: Arc<Mutex<Vec<Value>>>,
}

impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

pub async fn spawn_upstream() -> MockUpstream {
    let bodies: Arc<Mutex<Vec<Value>>> = Arc::default();

    let predict_bodies = Arc::clone(&bodies);
    let batch_bodies = Arc::clone(&bodies);

    let app = Router::new()
        .route(
            "/model_info",
            get(|| async {
                Json(json!({
                    "model_type": "StackingClassifier",
                    "architecture": "LogisticRegression + SVC → LogisticRegression",
                    "features_expected": 16,
                    "accuracy": 92.68,
                    "preprocessing": ["log1p transformation", "standard scaling"],
                    "bean_classes": {
                        "0": {"name": "BARBUNYA", "scientific": "Phaseolus vulgaris",
                              "description": "Turkish kidney bean", "color": "#8B4513"},
                        "6": {"name": "SIRA", "scientific": "Vigna radiata",
                              "description": "Mung bean", "color": "#90EE90"}
                    }
                }))
            }),
        )
        .route(
            "/predict",
            post(move |Json(body): Json<Value>| {
                let bodies = Arc::clone(&predict_bodies);
                async move {
                    bodies.lock().push(body.clone());
                    let count = body.as_array().map(Vec::len).unwrap_or(0);
                    if count != 16 {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(json!({"error": format!("Expected 16 features, got {}", count)})),
                        );
                    }
                    (
                        StatusCode::OK,
                        Json(json!({
                            "prediction": 3,
                            "bean_type": "DERMASON",
                            "scientific_name": "Phaseolus vulgaris",
                            "description": "White kidney bean",
                            "color": "#FFFFFF",
                            "confidence": 91.25,
                            "probabilities": {
                                "BARBUNYA": 0.5, "BOMBAY": 0.0, "CALI": 1.25, "DERMASON": 91.25,
                                "HOROZ": 0.5, "SEKER": 4.0, "SIRA": 2.5
                            }
                        })),
                    )
                }
            }),
        )
        .route(
            "/batch_predict",
            post(move |Json(body): Json<Value>| {
                let bodies = Arc::clone(&batch_bodies);
                async move {
                    bodies.lock().push(body.clone());
                    let Some(instances) = body.get("instances").and_then(Value::as_array) else {
                        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "'instances'"})));
                    };
                    let predictions: Vec<Value> = (1..=instances.len())
                        .map(|i| {
                            json!({
                                "instance": i,
                                "bean_type": "SEKER",
                                "scientific_name": "Phaseolus vulgaris",
                                "description": "Sugar bean",
                                "color": "#FFD700",
                                "confidence": 88.0
                            })
                        })
                        .collect();
                    (StatusCode::OK, Json(json!({"predictions": predictions})))
                }
            }),
        )
        .route("/broken/predict", post(|| async { "<html>Internal Server Error</html>" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream { addr, bodies }
}
