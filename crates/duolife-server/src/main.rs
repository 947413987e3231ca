//! Seed endpoint service.
//!
//! Serves the initial-grid payload the viewer fetches once on startup.

use anyhow::Result;
use axum::{extract::State, routing::get, Json, Router};
use duolife_core::ServerConfig;
use serde::Serialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const FIXTURE: &str = include_str!("../../../fixtures/seed.json");

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// The seed payload: `{ "data": { "state": [[0|1|2, ...], ...] } }`
async fn seed(State(payload): State<Value>) -> Json<Value> {
    Json(payload)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,duolife_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = ServerConfig::from_env();
    let payload: Value = serde_json::from_str(FIXTURE)?;

    let app = Router::new()
        .route("/health", get(health))
        .route("/seed", get(seed))
        .with_state(payload)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("seed server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
