//! Typed request and response bodies for the prediction service
//!
//! Every endpoint answers either with its payload or with `{"error": ...}`.
//! [`decode_reply`] settles which one it is before any field is trusted.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ClassifierError, Result};
use crate::features::FeatureVector;

/// Slack for percentages computed as `p * 100` on the server
const PERCENT_EPSILON: f64 = 1e-6;

/// Metadata reported by `GET /model_info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub features_expected: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocessing: Option<Vec<String>>,
    /// Class palette keyed by the model's class index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bean_classes: Option<BTreeMap<u32, BeanClass>>,
}

/// One entry of the class palette in `GET /model_info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeanClass {
    pub name: String,
    #[serde(rename = "scientific")]
    pub scientific_name: String,
    pub description: String,
    pub color: String,
}

/// One class and its share of the prediction, in percent
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbability {
    pub label: String,
    pub percent: f64,
}

/// Per-class probabilities in the order the server listed them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Probabilities(Vec<ClassProbability>);

impl Probabilities {
    pub fn new(entries: Vec<ClassProbability>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassProbability> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest first. The sort is stable, so equal values keep server order.
    pub fn ranked(&self) -> Vec<&ClassProbability> {
        let mut ranked: Vec<&ClassProbability> = self.0.iter().collect();
        ranked.sort_by(|a, b| b.percent.total_cmp(&a.percent));
        ranked
    }
}

impl<const N: usize> From<[(&str, f64); N]> for Probabilities {
    fn from(entries: [(&str, f64); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(label, percent)| ClassProbability { label: label.to_string(), percent })
                .collect(),
        )
    }
}

impl Serialize for Probabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.label, &entry.percent)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Probabilities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = Probabilities;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of class label to percentage")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, percent)) = access.next_entry::<String, f64>()? {
                    entries.push(ClassProbability { label, percent });
                }
                Ok(Probabilities(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Answer of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "bean_type")]
    pub label: String,
    pub confidence: f64,
    pub scientific_name: String,
    pub description: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Probabilities>,
    /// Class index as encoded by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<u32>,
}

impl PredictionResult {
    fn validate(&self) -> Result<()> {
        check_percent("confidence", self.confidence)?;
        if let Some(ref probabilities) = self.probabilities {
            for entry in probabilities.iter() {
                check_percent(&format!("probability of {}", entry.label), entry.percent)?;
            }
        }
        Ok(())
    }
}

/// One row of `POST /batch_predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPrediction {
    /// Instance number as reported by the server (1-based)
    pub instance: u32,
    #[serde(rename = "bean_type")]
    pub label: String,
    pub scientific_name: String,
    pub description: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Answer of `POST /batch_predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BatchResult {
    pub predictions: Vec<BatchPrediction>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    fn validate(&self) -> Result<()> {
        for row in &self.predictions {
            if let Some(confidence) = row.confidence {
                check_percent(&format!("confidence of instance {}", row.instance), confidence)?;
            }
        }
        Ok(())
    }
}

/// Body of `POST /batch_predict`
#[derive(Debug, Clone, Serialize)]
pub struct BatchRequest<'a> {
    pub instances: &'a [FeatureVector],
}

/// Payload types that carry their own range checks
pub trait Reply: DeserializeOwned {
    fn check(&self) -> Result<()> {
        Ok(())
    }
}

impl Reply for ModelInfo {}

impl Reply for PredictionResult {
    fn check(&self) -> Result<()> {
        self.validate()
    }
}

impl Reply for BatchResult {
    fn check(&self) -> Result<()> {
        self.validate()
    }
}

/// Split a raw response body into the service's error message or a checked
/// payload. A truthy `error` field wins regardless of what else is present.
pub fn decode_reply<T: Reply>(body: Value) -> Result<T> {
    if let Some(message) = body.get("error").and_then(error_message) {
        return Err(ClassifierError::Server(message));
    }
    let reply: T = serde_json::from_value(body)?;
    reply.check()?;
    Ok(reply)
}

fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn check_percent(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && (-PERCENT_EPSILON..=100.0 + PERCENT_EPSILON).contains(&value) {
        Ok(())
    } else {
        Err(ClassifierError::Decode(format!(
            "{} must be a percentage between 0 and 100 (got {})",
            field, value
        )))
    }
}
