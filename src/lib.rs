//! Bean Classifier - front end for the Dry Bean prediction service
//!
//! This crate provides the form controller of the classification demo and
//! the surfaces that drive it:
//! - Reading feature inputs and validating them before any request
//! - Typed clients for `/model_info`, `/predict` and `/batch_predict`
//! - Rendering predictions, batch results and errors into the results container
//! - Keyboard shortcuts and the sample data loader
//!
//! # Modules
//!
//! ## Core
//! - [`controller`] - The form controller and its actions
//! - [`features`] - Feature catalog, sample values and input parsing
//! - [`render`] - Results container markup
//! - [`shortcuts`] - Keyboard shortcut resolution
//! - [`page`] - Page element contract and the demo page markup
//!
//! ## Service
//! - [`api`] - Wire types and the HTTP client
//!
//! ## Front ends
//! - [`server`] - Web UI server (htmx)
//! - [`cli`] - Command-line and interactive interface

// Core error handling
pub mod error;
pub mod config;

// Core
pub mod features;
pub mod page;
pub mod render;
pub mod shortcuts;
pub mod controller;

// Service
pub mod api;

// Front ends
pub mod server;
pub mod cli;

pub use error::{ClassifierError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ClassifierError, ErrorKind, Result};
    pub use crate::config::{ClientConfig, UiServerConfig};
    pub use crate::api::{
        BatchPrediction, BatchResult, HttpPredictionClient, ModelInfo, PredictionApi, PredictionResult,
        Probabilities,
    };
    pub use crate::controller::{ActionOutcome, FormController};
    pub use crate::features::{FeatureSpec, FeatureVector, BEAN_FEATURES, SAMPLE_VALUES};
    pub use crate::page::{MemoryPage, Page};
    pub use crate::shortcuts::{KeyEvent, Shortcut};
}
