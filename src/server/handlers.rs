//! HTTP request handlers
//!
//! Each UI handler rebuilds the page from the submitted form, runs one
//! controller action against the upstream service and returns whatever the
//! action left in the results container.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{RawForm, State},
    response::Html,
    Json,
};
use tracing::debug;

use crate::api::HttpPredictionClient;
use crate::controller::FormController;
use crate::features::BEAN_FEATURES;
use crate::page::{render_feature_inputs, render_index_page, MemoryPage, Page};

use super::state::UiState;

/// Fields of a submitted demo form, in document order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SubmittedForm {
    pub features: Vec<String>,
    pub batch: String,
}

impl SubmittedForm {
    pub fn parse(body: &[u8]) -> Self {
        let mut form = SubmittedForm::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "feature" => form.features.push(value.into_owned()),
                "batch" => form.batch = value.into_owned(),
                other => debug!(field = %other, "Ignoring unknown form field"),
            }
        }
        form
    }

    fn into_page(self) -> MemoryPage {
        MemoryPage::with_values(self.features).with_batch(self.batch)
    }
}

fn controller(state: &UiState, body: &Bytes) -> FormController<HttpPredictionClient, MemoryPage> {
    FormController::new(state.api.clone(), SubmittedForm::parse(body).into_page())
}

// ============================================================================
// UI Handlers
// ============================================================================

pub async fn serve_index() -> Html<String> {
    Html(render_index_page(&BEAN_FEATURES, &[]))
}

pub async fn ui_predict(State(state): State<Arc<UiState>>, RawForm(body): RawForm) -> Html<String> {
    let controller = controller(&state, &body);
    controller.predict().await.ok();
    Html(controller.page().results())
}

pub async fn ui_batch_predict(State(state): State<Arc<UiState>>, RawForm(body): RawForm) -> Html<String> {
    let controller = controller(&state, &body);
    controller.batch_predict().await.ok();
    Html(controller.page().results())
}

/// Returns the confirmation for the results container plus the refilled
/// inputs as an out-of-band swap.
pub async fn ui_sample(State(state): State<Arc<UiState>>, RawForm(body): RawForm) -> Html<String> {
    let mut form = SubmittedForm::parse(&body);
    if form.features.is_empty() {
        form.features = vec![String::new(); BEAN_FEATURES.len()];
    }
    let controller = FormController::new(state.api.clone(), form.into_page());
    controller.load_sample_data();

    let page = controller.page();
    Html(format!(
        "{}\n{}",
        page.results(),
        render_feature_inputs(&BEAN_FEATURES, &page.feature_values(), true)
    ))
}

// ============================================================================
// System Handlers
// ============================================================================

pub async fn health_check(State(state): State<Arc<UiState>>) -> Json<serde_json::Value> {
    let model_info = state.model_info.read().await;
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "upstream": state.api.base_url().as_str(),
        "model_type": model_info.as_ref().map(|info| info.model_type.clone()),
        "uptime_secs": state.uptime_secs(),
    }))
}
