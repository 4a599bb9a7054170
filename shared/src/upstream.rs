//! Failures of a single third-party API call.

use thiserror::Error;

/// `User-Agent` sent with every upstream request.
pub const USER_AGENT: &str = concat!("marketing-site-proxy/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The API answered with a non-2xx status.
    #[error("{api} API error: {status}")]
    Status {
        api: &'static str,
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },

    /// The request never produced a response.
    #[error("{api} request failed: {source}")]
    Transport {
        api: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response whose body is not the expected JSON.
    #[error("{api} returned an unreadable body: {source}")]
    Decode {
        api: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    /// Text shown to the caller: the API's own message when it sent one.
    pub fn message(&self) -> String {
        match self {
            UpstreamError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => self.to_string(),
        }
    }
}
