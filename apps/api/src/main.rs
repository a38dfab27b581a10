mod auth;
mod config;
mod errors;
mod export;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::HostedLoginGate;
use crate::config::Config;
use crate::export::PdfRenderer;
use crate::generation::session::SessionStore;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Copilot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client from explicit config
    let llm = OpenAiClient::new(&config).context("Failed to build completion HTTP client")?;
    info!(
        "Completion client initialized (model: {}, timeout: {}s)",
        config.model, config.llm_timeout_secs
    );

    let identity = HostedLoginGate::new(&config);
    info!(
        "Identity gate initialized ({} provider tokens)",
        config.auth_tokens.len()
    );
    info!("Render mode: {:?}", config.render_mode);

    let state = AppState {
        config: Arc::new(config.clone()),
        llm: Arc::new(llm),
        identity: Arc::new(identity),
        renderer: Arc::new(PdfRenderer::default()),
        sessions: Arc::new(SessionStore::new()),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the page origin once it is configurable

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
