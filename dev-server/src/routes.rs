//! Route table: thin adapters from axum onto the shared proxies.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::{Query, State};
use axum::http::header::ORIGIN;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use shared::{Config, EventsProxy, ProxyRequest, ProxyResponse, SubscriptionProxy};

pub const EVENTS_PATH: &str = "/api/eventbrite";
pub const SUBSCRIBE_PATH: &str = "/api/brevo/subscribe";

#[derive(Clone)]
struct AppState {
    events: Arc<EventsProxy>,
    subscription: Arc<SubscriptionProxy>,
}

pub fn router(config: &Config, http_client: reqwest::Client) -> Router {
    let state = AppState {
        events: Arc::new(EventsProxy::new(config, http_client.clone())),
        subscription: Arc::new(SubscriptionProxy::new(config, http_client)),
    };

    Router::new()
        .route("/", get(health))
        .route(EVENTS_PATH, any(events))
        .route(SUBSCRIBE_PATH, any(subscribe))
        .fallback(not_found)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "message": "Marketing site proxy running",
        "status": "healthy",
        "endpoints": [EVENTS_PATH, SUBSCRIBE_PATH],
    }))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response()
}

async fn events(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = proxy_request(method, query, &headers, body);
    into_response(state.events.handle(&request).await)
}

async fn subscribe(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = proxy_request(method, query, &headers, body);
    into_response(state.subscription.handle(&request).await)
}

fn proxy_request(
    method: Method,
    query: HashMap<String, String>,
    headers: &HeaderMap,
    body: Bytes,
) -> ProxyRequest {
    ProxyRequest {
        method,
        query,
        origin: headers
            .get(ORIGIN)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    }
}

fn into_response(response: ProxyResponse) -> Response {
    response.into_http().map(Body::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use shared::CorsPolicy;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Config::from_lookup(|_| None, CorsPolicy::development()).unwrap();
        router(&config, reqwest::Client::new())
    }

    async fn send(request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = send(Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["endpoints"], json!([EVENTS_PATH, SUBSCRIBE_PATH]));
    }

    #[tokio::test]
    async fn test_events_requires_organizer() {
        let request = Request::get(EVENTS_PATH)
            .header(ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let (status, headers, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Organizer ID required"}));
        assert_eq!(headers["access-control-allow-origin"], "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_events_without_token() {
        let request = Request::get(format!("{}?organizerId=412451CDS", EVENTS_PATH))
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "API token not configured");
    }

    #[tokio::test]
    async fn test_subscribe_rejects_get() {
        let (status, _, body) =
            send(Request::get(SUBSCRIBE_PATH).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"error": "Method Not Allowed"}));
    }

    #[tokio::test]
    async fn test_subscribe_missing_email() {
        let request = Request::post(SUBSCRIBE_PATH)
            .header("content-type", "application/json")
            .body(Body::from(r#"{"attributes":{}}"#))
            .unwrap();
        let (status, _, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Email address is required"}));
    }

    #[tokio::test]
    async fn test_preflight_from_listed_origin() {
        let request = Request::options(SUBSCRIBE_PATH)
            .header(ORIGIN, "http://127.0.0.1:5500")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = send(request).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(headers["access-control-allow-origin"], "http://127.0.0.1:5500");
        assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_allow_origin() {
        let request = Request::get(EVENTS_PATH)
            .header(ORIGIN, "https://elsewhere.example")
            .body(Body::empty())
            .unwrap();
        let (_, headers, _) = send(request).await;
        assert!(headers.get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _, body) =
            send(Request::get("/api/unknown").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }
}
