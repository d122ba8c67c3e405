//! HTTP surface of the front end.
//!
//! Every request passes through [`middleware::intercept`] (binary proxy and
//! language redirects) before reaching a handler. Any path that is not an
//! internal route is a content page.

mod language;
mod middleware;
mod page;

use crate::api::PloneClient;
use crate::blocks::{BlockRegistry, VariationRegistry};
use crate::config::Config;
use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Paths served by the front end itself; never redirected.
pub const INTERNAL_PREFIXES: [&str; 2] = ["/_health", "/_language/"];

/// Shared, read-only state of all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: PloneClient,
    pub blocks: Arc<BlockRegistry>,
    pub variations: Arc<VariationRegistry>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = PloneClient::new(&config.api_url).context("Failed to build API client")?;

        Ok(Self {
            config: Arc::new(config),
            client,
            blocks: Arc::new(BlockRegistry::standard()),
            variations: Arc::new(VariationRegistry::standard()),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/_health", get(health))
        .route("/_language/:lang", get(language::switch_language))
        .fallback(page::render_page)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::intercept,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `0.0.0.0:{port}` and serve until the process is stopped.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Serving {} on http://{}", state.config.api_url, addr);
    axum::serve(listener, router(state))
        .await
        .context("Server error")?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}
