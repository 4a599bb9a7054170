//! Eventbrite Lambda - Handles the events proxy endpoint.
//!
//! Lists an organizer's live events for the events widget while keeping the
//! API token on the server. Deployed behind API Gateway or as a Netlify
//! function; both invoke it the same way.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::{lambda_response, proxy_request, Config, CorsPolicy, EventsProxy};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn handler(proxy: Arc<EventsProxy>, event: Request) -> Result<Response<Body>, Error> {
    let request = proxy_request(&event);
    Ok(lambda_response(proxy.handle(&request).await))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env(CorsPolicy::Any)?;
    info!(
        "Eventbrite proxy starting (token configured: {})",
        config.eventbrite_api_token.is_some()
    );

    let proxy = Arc::new(EventsProxy::new(&config, reqwest::Client::new()));

    run(service_fn(move |event| {
        let proxy = Arc::clone(&proxy);
        async move { handler(proxy, event).await }
    }))
    .await
}
