//! Local development server for the site's API proxies.
//!
//! Serves the same proxies as the Lambda functions on
//! `http://localhost:3001` so the widgets can be exercised from a local
//! static server.

mod routes;

use anyhow::Context;
use shared::{Config, CorsPolicy};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env(CorsPolicy::development())?;
    let port = match std::env::var("PORT") {
        Ok(value) => value
            .trim()
            .parse::<u16>()
            .with_context(|| format!("Invalid PORT: {}", value))?,
        Err(_) => DEFAULT_PORT,
    };

    info!(
        "Eventbrite API token configured: {}",
        config.eventbrite_api_token.is_some()
    );
    info!("Brevo API key configured: {}", config.brevo_api_key.is_some());
    info!("CORS policy: {:?}", config.cors);

    let router = routes::router(&config, reqwest::Client::new());

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Proxy server running on http://localhost:{}", port);

    axum::serve(listener, router).await?;
    Ok(())
}
