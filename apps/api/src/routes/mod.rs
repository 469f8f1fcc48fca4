pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::engine::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/metadata", get(handlers::handle_metadata))
        .route("/api/v1/analysis", post(handlers::handle_analysis))
        .with_state(state)
}
