//! Runtime-neutral request/response contract and the Lambda adapters.
//!
//! Every deployment shell turns its native request into a [`ProxyRequest`],
//! hands it to a proxy, and turns the [`ProxyResponse`] back into its native
//! response type.

use std::collections::HashMap;

use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, ORIGIN};
use http::{Method, StatusCode};
use lambda_http::{Body, Request, RequestExt, Response};
use serde::Serialize;
use tracing::error;

use crate::Error;

const FALLBACK_ERROR_BODY: &str = r#"{"error":"Internal error"}"#;

/// Inbound request reduced to what the proxies look at.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    pub query: HashMap<String, String>,
    pub origin: Option<String>,
    pub body: Vec<u8>,
}

impl ProxyRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            query: HashMap::new(),
            origin: None,
            body: Vec::new(),
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

/// Outbound response produced by a proxy.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ProxyResponse {
    /// Response whose body is already-serialized JSON; an empty body is sent as none.
    pub fn raw_json(status: StatusCode, body: Vec<u8>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with the given status code and data.
    pub fn json<T: Serialize>(status: StatusCode, data: &T) -> Self {
        match serde_json::to_vec(data) {
            Ok(body) => Self::raw_json(status, body),
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                Self::raw_json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    FALLBACK_ERROR_BODY.as_bytes().to_vec(),
                )
            }
        }
    }

    /// Create an error response from the error taxonomy.
    pub fn from_error(err: &Error) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::json(status, &err.body())
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Parse the body back into JSON.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }

    /// Convert into a plain `http` response; shells map the body type.
    pub fn into_http(self) -> http::Response<Vec<u8>> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Build a [`ProxyRequest`] from a Lambda HTTP event.
///
/// Repeated query parameters keep their first value.
pub fn proxy_request(event: &Request) -> ProxyRequest {
    let mut query = HashMap::new();
    for (name, value) in event.query_string_parameters_ref().into_iter().flat_map(|q| q.iter()) {
        query
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }

    ProxyRequest {
        method: event.method().clone(),
        query,
        origin: event
            .headers()
            .get(ORIGIN)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: event.body().as_ref().to_vec(),
    }
}

/// Convert a [`ProxyResponse`] into a Lambda HTTP response.
pub fn lambda_response(response: ProxyResponse) -> Response<Body> {
    response.into_http().map(|body| match String::from_utf8(body) {
        Ok(text) if text.is_empty() => Body::Empty,
        Ok(text) => Body::from(text),
        Err(e) => Body::from(e.into_bytes()),
    })
}
