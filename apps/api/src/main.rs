mod config;
mod engine;
mod errors;
mod metadata;
mod model;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::metadata::AppMetadata;
use crate::model::LinearModel;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Paygrade API v{}", env!("CARGO_PKG_VERSION"));

    // Both artifacts are required before the listener binds: a service that
    // cannot score must never accept an analysis request.
    let metadata = AppMetadata::load(&config.metadata_path).with_context(|| {
        format!("Failed to load metadata artifact '{}'", config.metadata_path)
    })?;
    info!(
        locations = metadata.locations.len(),
        skill_columns = metadata.skill_columns.len(),
        "Metadata loaded"
    );

    let model = LinearModel::load(&config.model_path)
        .with_context(|| format!("Failed to load model artifact '{}'", config.model_path))?;
    info!("Salary model loaded");

    let state = AppState {
        metadata: Arc::new(metadata),
        model: Arc::new(model),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
