mod config;
mod cover_letter;
mod enhancement;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod trades;

use anyhow::Result;
use axum::{body::Body, http::Request};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::Config;
use crate::enhancement::ai_manager::AiServiceManager;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values only; every key is optional)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Enhancer API v{}", env!("CARGO_PKG_VERSION"));

    // Discover AI backends once; the manager is read-only afterwards
    let ai = Arc::new(AiServiceManager::new(config.clone()));
    let backends = ai.backend_names();
    if backends.is_empty() {
        info!("Enhancement mode: rule-based only");
    } else {
        info!("Enhancement mode: AI ({})", backends.join(" → "));
    }

    let state = AppState { ai };

    // Build router
    let app = build_router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive()); // TODO: tighten CORS once the editor origin is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
