//! Web UI server
//!
//! Hosts the classifier form and runs the form controller for each htmx
//! submission against the upstream prediction service.

mod api;
mod handlers;
mod state;

pub use api::create_router;
pub use handlers::SubmittedForm;
pub use state::UiState;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::UiServerConfig;
use crate::controller::FormController;
use crate::features::BEAN_FEATURES;
use crate::page::MemoryPage;

/// Start the server with the given configuration
pub async fn run_server(config: UiServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(UiState::new(&config)?);
    info!(
        upstream = %state.api.base_url(),
        started_at = %state.started_at.to_rfc3339(),
        "Initializing web UI"
    );

    // Page-ready step: fetch model metadata once. A dead upstream is not fatal.
    let controller = FormController::new(state.api.clone(), MemoryPage::with_fields(BEAN_FEATURES.len()));
    *state.model_info.write().await = controller.initialize().await;

    let app = create_router(Arc::clone(&state));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, pid = std::process::id(), "Server listening and ready to accept connections");
    info!(url = %format!("http://{}", addr), "Classifier form available");

    let shutdown_state = Arc::clone(&state);
    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install ctrl+c handler");
            std::future::pending::<()>().await;
        }
        info!(uptime_secs = shutdown_state.uptime_secs(), "Shutdown signal received, stopping server gracefully");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
