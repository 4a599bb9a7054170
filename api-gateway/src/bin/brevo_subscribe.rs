//! Brevo Subscribe Lambda - Handles the newsletter subscription endpoint.
//!
//! Creates or updates a contact on the requested mailing lists. Repeated
//! subscriptions of the same address answer with success.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::{lambda_response, proxy_request, Config, CorsPolicy, SubscriptionProxy};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn handler(proxy: Arc<SubscriptionProxy>, event: Request) -> Result<Response<Body>, Error> {
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
        "Brevo subscription proxy starting (key configured: {})",
        config.brevo_api_key.is_some()
    );

    let proxy = Arc::new(SubscriptionProxy::new(&config, reqwest::Client::new()));

    run(service_fn(move |event| {
        let proxy = Arc::clone(&proxy);
        async move { handler(proxy, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http::{Method, StatusCode};

    fn proxy() -> Arc<SubscriptionProxy> {
        let config = Config::from_lookup(|_| None, CorsPolicy::Any).unwrap();
        Arc::new(SubscriptionProxy::new(&config, reqwest::Client::new()))
    }

    fn event(method: Method, body: &str) -> Request {
        lambda_http::http::Request::builder()
            .method(method)
            .uri("/.netlify/functions/brevo-subscribe")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn body_json(response: &Response<Body>) -> serde_json::Value {
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    #[tokio::test]
    async fn test_get_is_not_allowed() {
        let response = handler(proxy(), event(Method::GET, "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(body_json(&response)["error"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let response = handler(proxy(), event(Method::POST, "email=a@b.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(&response)["error"], "Invalid JSON in request body");
    }

    #[tokio::test]
    async fn test_missing_email() {
        let response = handler(proxy(), event(Method::POST, r#"{"listIds":[2]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(&response)["error"], "Email address is required");
    }

    #[tokio::test]
    async fn test_unconfigured_key() {
        let response = handler(proxy(), event(Method::POST, r#"{"email":"a@b.com"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(&response)["error"], "Brevo API key not configured");
    }

    #[tokio::test]
    async fn test_preflight() {
        let response = handler(proxy(), event(Method::OPTIONS, "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()["access-control-allow-methods"],
            "POST, OPTIONS"
        );
    }
}
