//! The page the controller reads from and renders into
//!
//! [`Page`] is the element contract of the demo form: an ordered set of
//! feature inputs, the batch text area and the results container.
//! Implementations use interior mutability so that overlapping controller
//! actions can all write; the last write is what the user sees.

mod index;

pub use index::{render_feature_inputs, render_index_page};

use parking_lot::RwLock;

pub const PREDICTION_FORM_ID: &str = "prediction-form";
pub const FEATURE_INPUTS_ID: &str = "feature-inputs";
pub const BATCH_INPUT_ID: &str = "batch-input";
pub const RESULTS_CONTAINER_ID: &str = "results-container";

pub trait Page: Send + Sync {
    /// Raw text of every feature input, in page order
    fn feature_values(&self) -> Vec<String>;

    /// Overwrite one feature input. Out-of-range indices are ignored.
    fn set_feature_value(&self, index: usize, value: String);

    fn feature_count(&self) -> usize {
        self.feature_values().len()
    }

    /// Raw text of the batch text area
    fn batch_input(&self) -> String;

    /// Replace the whole results container
    fn set_results(&self, markup: String);
}

/// Page state held in memory
#[derive(Debug, Default)]
pub struct MemoryPage {
    features: RwLock<Vec<String>>,
    batch: RwLock<String>,
    results: RwLock<String>,
}

impl MemoryPage {
    /// A page with `count` empty feature inputs
    pub fn with_fields(count: usize) -> Self {
        Self::with_values(vec![String::new(); count])
    }

    pub fn with_values<S: Into<String>>(values: Vec<S>) -> Self {
        Self {
            features: RwLock::new(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn with_batch(self, text: impl Into<String>) -> Self {
        *self.batch.write() = text.into();
        self
    }

    pub fn set_batch_input(&self, text: impl Into<String>) {
        *self.batch.write() = text.into();
    }

    /// Current markup of the results container
    pub fn results(&self) -> String {
        self.results.read().clone()
    }
}

impl Page for MemoryPage {
    fn feature_values(&self) -> Vec<String> {
        self.features.read().clone()
    }

    fn set_feature_value(&self, index: usize, value: String) {
        if let Some(slot) = self.features.write().get_mut(index) {
            *slot = value;
        }
    }

    fn feature_count(&self) -> usize {
        self.features.read().len()
    }

    fn batch_input(&self) -> String {
        self.batch.read().clone()
    }

    fn set_results(&self, markup: String) {
        *self.results.write() = markup;
    }
}
