//! Route definitions

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use super::{handlers, state::UiState};

async fn handle_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": true,
            "message": "Not found. Visit / for the classifier form or /health to check status.",
        })),
    )
}

async fn handle_405() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "error": true,
            "message": "Method not allowed.",
        })),
    )
}

/// Create the web UI router
pub fn create_router(state: Arc<UiState>) -> Router {
    let ui_routes = Router::new()
        .route("/predict", post(handlers::ui_predict))
        .route("/batch_predict", post(handlers::ui_batch_predict))
        .route("/sample", post(handlers::ui_sample));

    Router::new()
        .route("/", get(handlers::serve_index))
        .route("/health", get(handlers::health_check))
        .nest("/ui", ui_routes)
        .fallback(handle_404)
        .method_not_allowed_fallback(handle_405)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
