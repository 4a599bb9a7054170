//! Error types for the proxy handlers.

use serde::Serialize;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Which key carries the upstream failure text in the error body.
///
/// The events proxy reports `details`, the subscription proxy `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamDetail {
    Details(String),
    Message(String),
}

impl std::fmt::Display for UpstreamDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamDetail::Details(text) | UpstreamDetail::Message(text) => f.write_str(text),
        }
    }
}

/// Errors that can occur while handling a proxied request.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Wrong HTTP verb for the endpoint
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// A server-side secret is not configured
    #[error("Configuration error: {message}")]
    Config { message: String, hint: String },

    /// Non-2xx status, transport failure or unreadable body from a third-party API
    #[error("Upstream error: {summary} ({detail})")]
    Upstream {
        summary: String,
        detail: UpstreamDetail,
    },
}

/// JSON body returned to the browser for every failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
            hint: None,
        }
    }
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn config(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Upstream failure reported under the `details` key.
    pub fn upstream_details(summary: impl Into<String>, details: impl Into<String>) -> Self {
        Error::Upstream {
            summary: summary.into(),
            detail: UpstreamDetail::Details(details.into()),
        }
    }

    /// Upstream failure reported under the `message` key.
    pub fn upstream_message(summary: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Upstream {
            summary: summary.into(),
            detail: UpstreamDetail::Message(message.into()),
        }
    }

    /// Get HTTP status code for this error.
    ///
    /// Upstream statuses are never forwarded: any upstream failure is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::MethodNotAllowed => 405,
            _ => 500,
        }
    }

    /// Render the user-visible JSON body.
    pub fn body(&self) -> ErrorBody {
        match self {
            Error::Validation(message) => ErrorBody::new(message.clone()),
            Error::MethodNotAllowed => ErrorBody::new("Method Not Allowed"),
            Error::Config { message, hint } => ErrorBody {
                hint: Some(hint.clone()),
                ..ErrorBody::new(message.clone())
            },
            Error::Upstream { summary, detail } => match detail {
                UpstreamDetail::Details(details) => ErrorBody {
                    details: Some(details.clone()),
                    ..ErrorBody::new(summary.clone())
                },
                UpstreamDetail::Message(message) => ErrorBody {
                    message: Some(message.clone()),
                    ..ErrorBody::new(summary.clone())
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::validation("Organizer ID required").status_code(), 400);
        assert_eq!(Error::MethodNotAllowed.status_code(), 405);
        assert_eq!(Error::config("API token not configured", "set it").status_code(), 500);
        assert_eq!(
            Error::upstream_details("Failed to fetch events", "Eventbrite API error: 404").status_code(),
            500
        );
    }

    #[test]
    fn test_body_omits_absent_keys() {
        let body = serde_json::to_value(Error::validation("Email address is required").body()).unwrap();
        assert_eq!(body, json!({"error": "Email address is required"}));

        let body = serde_json::to_value(Error::MethodNotAllowed.body()).unwrap();
        assert_eq!(body, json!({"error": "Method Not Allowed"}));
    }

    #[test]
    fn test_body_detail_keys() {
        let body = serde_json::to_value(
            Error::upstream_details("Failed to fetch events", "Eventbrite API error: 503").body(),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({"error": "Failed to fetch events", "details": "Eventbrite API error: 503"})
        );

        let body = serde_json::to_value(
            Error::upstream_message("Failed to subscribe", "Key not found").body(),
        )
        .unwrap();
        assert_eq!(body, json!({"error": "Failed to subscribe", "message": "Key not found"}));

        let body = serde_json::to_value(
            Error::config("API token not configured", "Set EVENTBRITE_API_TOKEN").body(),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({"error": "API token not configured", "hint": "Set EVENTBRITE_API_TOKEN"})
        );
    }
}
