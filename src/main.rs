use anyhow::Result;
use plone_front::config::Config;
use plone_front::server::{self, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the environment is already set)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("plone_front=info".parse()?),
        )
        .init();

    info!("Starting plone-front");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!("Content API: {}", config.api_url);
    info!("Public URL: {}", config.public_url);

    let state = AppState::new(config)?;
    server::serve(state).await
}
