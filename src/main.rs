//! Startup Predictor backend server
//!
//! Collects startup attributes over HTTP, scores them with a heuristic
//! success-probability model, asks an OpenAI-compatible chat API for
//! sentiment and improvement suggestions, and keeps every prediction in an
//! in-memory store.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    STARTUP PREDICTOR                       │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌─────────────┐  ┌──────────────────────┐  │
//! │  │  API      │  │  Scoring    │  │  Advisor Client      │  │
//! │  │  (Axum)   │  │  Engine     │  │  (Chat API, with     │  │
//! │  │           │  │  (pure)     │  │   fixed fallbacks)   │  │
//! │  └─────┬─────┘  └──────┬──────┘  └──────────┬───────────┘  │
//! │        └───────────────┼────────────────────┘              │
//! │                        ▼                                   │
//! │                ┌──────────────┐                            │
//! │                │ MemoryStore  │                            │
//! │                └──────────────┘                            │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod llm;
mod models;
mod scoring;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "startup_predictor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Startup Predictor server starting...");
    if config.openai_api_key.is_none() {
        if config.is_production() {
            tracing::warn!("No OPENAI_API_KEY set; sentiment and suggestions will use fallbacks");
        } else {
            tracing::info!("No OPENAI_API_KEY configured, advisor fallbacks active");
        }
    }

    // Build application state
    let state = AppState {
        store: storage::MemoryStore::new(),
        advisor: Arc::new(llm::AdvisorClient::new(&config)),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: storage::MemoryStore,
    pub advisor: Arc<llm::AdvisorClient>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route(
            "/api/predictions",
            post(handlers::predictions::create).get(handlers::predictions::list),
        )
        .route("/api/predictions/:id", get(handlers::predictions::get))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
