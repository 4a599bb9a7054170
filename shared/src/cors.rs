//! Cross-origin headers applied to every proxy response.

use http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, VARY,
};

/// Origins the local development server accepts when nothing else is configured.
pub const DEV_ORIGINS: [&str; 3] = [
    "http://127.0.0.1:5500",
    "http://localhost:5500",
    "http://localhost:3000",
];

/// Seconds a browser may cache a preflight answer.
const PREFLIGHT_MAX_AGE: &str = "86400";

/// Which origins may read proxy responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsPolicy {
    /// `Access-Control-Allow-Origin: *`
    #[default]
    Any,
    /// Echo the request origin only when it is listed.
    AllowList(Vec<String>),
}

impl CorsPolicy {
    /// Parse a comma-separated origin list. `*` or an empty list selects [`CorsPolicy::Any`].
    pub fn parse(value: &str) -> Self {
        let origins: Vec<String> = value
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/'))
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            CorsPolicy::Any
        } else {
            CorsPolicy::AllowList(origins)
        }
    }

    /// The allow-list used by the local development server.
    pub fn development() -> Self {
        CorsPolicy::AllowList(DEV_ORIGINS.iter().map(|origin| origin.to_string()).collect())
    }

    /// Value of `Access-Control-Allow-Origin` for a request from `origin`, if any.
    pub fn allowed_origin(&self, origin: Option<&str>) -> Option<String> {
        match self {
            CorsPolicy::Any => Some("*".to_string()),
            CorsPolicy::AllowList(origins) => origin
                .filter(|origin| origins.iter().any(|allowed| allowed == origin))
                .map(str::to_string),
        }
    }

    /// Add the origin headers for a request from `origin`.
    pub fn apply(&self, origin: Option<&str>, headers: &mut HeaderMap) {
        if let CorsPolicy::AllowList(_) = self {
            headers.insert(VARY, HeaderValue::from_static("Origin"));
        }

        let allowed = self
            .allowed_origin(origin)
            .and_then(|value| HeaderValue::from_str(&value).ok());
        if let Some(value) = allowed {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
    }

    /// Add the extra headers a preflight answer carries.
    pub fn apply_preflight(&self, origin: Option<&str>, methods: &'static str, headers: &mut HeaderMap) {
        self.apply(origin, headers);
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(methods));
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        headers.insert(
            ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(PREFLIGHT_MAX_AGE),
        );
    }
}
