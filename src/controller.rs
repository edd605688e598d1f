//! Form controller: read the page, call the service, render the outcome
//!
//! Every action is an independent request/response/render transaction. The
//! controller keeps no state of its own beyond its two collaborators; actions
//! take `&self` and may overlap, in which case the last one to finish owns
//! the results container.

use tracing::{error, info, warn};

use crate::api::{BatchResult, ModelInfo, PredictionApi, PredictionResult};
use crate::error::{ClassifierError, ErrorKind, Result};
use crate::features::{format_field_value, parse_batch_input, parse_feature_values, SAMPLE_VALUES};
use crate::page::Page;
use crate::render::{render_batch, render_error, render_prediction, render_success, SAMPLE_LOADED_MESSAGE};
use crate::shortcuts::{KeyEvent, Shortcut};

pub const PREDICT_ERROR_PREFIX: &str = "Error making prediction";
pub const BATCH_ERROR_PREFIX: &str = "Error in batch prediction";

/// Result of an action triggered by a shortcut
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Prediction(PredictionResult),
    SampleLoaded { filled: usize },
}

pub struct FormController<A, P> {
    api: A,
    page: P,
}

impl<A: PredictionApi, P: Page> FormController<A, P> {
    pub fn new(api: A, page: P) -> Self {
        Self { api, page }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Fetch model metadata for the log. Failure is logged and swallowed.
    pub async fn initialize(&self) -> Option<ModelInfo> {
        match self.api.model_info().await {
            Ok(info) => {
                info!(
                    model_type = %info.model_type,
                    features_expected = info.features_expected,
                    "Model loaded"
                );
                if info.features_expected != self.page.feature_count() {
                    warn!(
                        features_expected = info.features_expected,
                        feature_inputs = self.page.feature_count(),
                        "Model expects a different number of features than the form provides"
                    );
                }
                Some(info)
            }
            Err(e) => {
                error!(error = %e, "Error loading model info");
                None
            }
        }
    }

    /// Form submission. Same path as the Classify button.
    pub async fn submit(&self) -> Result<PredictionResult> {
        self.predict().await
    }

    pub async fn predict(&self) -> Result<PredictionResult> {
        let features = match parse_feature_values(&self.page.feature_values()) {
            Ok(features) => features,
            Err(e) => return Err(self.show_error(e, PREDICT_ERROR_PREFIX)),
        };

        match self.api.predict(&features).await {
            Ok(result) => {
                info!(label = %result.label, confidence = result.confidence, "Prediction rendered");
                self.page.set_results(render_prediction(&result));
                Ok(result)
            }
            Err(e) => Err(self.show_error(e, PREDICT_ERROR_PREFIX)),
        }
    }

    pub async fn batch_predict(&self) -> Result<BatchResult> {
        let instances = match parse_batch_input(&self.page.batch_input()) {
            Ok(instances) => instances,
            Err(e) => return Err(self.show_error(e, BATCH_ERROR_PREFIX)),
        };

        match self.api.batch_predict(&instances).await {
            Ok(result) => {
                info!(instances = instances.len(), predictions = result.len(), "Batch prediction rendered");
                self.page.set_results(render_batch(&result));
                Ok(result)
            }
            Err(e) => Err(self.show_error(e, BATCH_ERROR_PREFIX)),
        }
    }

    /// Fill the inputs from [`SAMPLE_VALUES`]; inputs past its end are left
    /// alone. Returns how many were written.
    pub fn load_sample_data(&self) -> usize {
        let filled = self.page.feature_count().min(SAMPLE_VALUES.len());
        for (index, value) in SAMPLE_VALUES.iter().take(filled).enumerate() {
            self.page.set_feature_value(index, format_field_value(*value));
        }
        self.page.set_results(render_success(SAMPLE_LOADED_MESSAGE));
        filled
    }

    /// Dispatch a key press. Returns the shortcut that fired, if any.
    pub async fn handle_key(&self, event: &KeyEvent) -> Option<(Shortcut, Result<ActionOutcome>)> {
        let shortcut = Shortcut::resolve(event)?;
        Some((shortcut, self.run(shortcut).await))
    }

    /// Run the action bound to a shortcut
    pub async fn run(&self, shortcut: Shortcut) -> Result<ActionOutcome> {
        match shortcut {
            Shortcut::Predict => self.predict().await.map(ActionOutcome::Prediction),
            Shortcut::LoadSample => Ok(ActionOutcome::SampleLoaded { filled: self.load_sample_data() }),
        }
    }

    /// Render an error banner and hand the error back
    fn show_error(&self, err: ClassifierError, prefix: &str) -> ClassifierError {
        match err.kind() {
            ErrorKind::Validation => warn!(error = %err, "Rejected form input"),
            ErrorKind::Server => warn!(error = %err, "Prediction service reported an error"),
            ErrorKind::Transport => error!(error = %err, "{}", prefix),
        }
        self.page.set_results(render_error(&describe_error(&err, prefix)));
        err
    }
}

/// User-facing text for a failed action. Transport failures get the action's
/// prefix; validation and server messages are shown as is.
pub fn describe_error(err: &ClassifierError, prefix: &str) -> String {
    match err.kind() {
        ErrorKind::Validation | ErrorKind::Server => err.to_string(),
        ErrorKind::Transport => format!("{}: {}", prefix, err),
    }
}
