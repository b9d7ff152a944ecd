//! # hydrocast-server
//!
//! REST API for uploading groundwater readings, analysing them, forecasting
//! levels with a loaded model, and producing LLM-written reports and chat
//! answers.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the router with middleware applied.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(routes::liveness))
        .route("/health/ready", get(routes::readiness))
        .route("/health", get(routes::liveness))
        // Datasets
        .route("/api/v1/upload", post(routes::upload))
        .route("/api/v1/datasets/:id", delete(routes::delete_dataset))
        .route("/api/v1/datasets/:id/analysis", get(routes::analysis))
        .route("/api/v1/datasets/:id/forecast", get(routes::last_forecast))
        // Forecast and narrative
        .route("/api/v1/forecast", post(routes::forecast))
        .route("/api/v1/report", post(routes::report))
        .route("/api/v1/chat", post(routes::chat))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
