//! Configuration management for the proxy functions.

use std::env;
use std::fmt;

use reqwest::Url;

use crate::cors::CorsPolicy;
use crate::{Error, Result};

pub const DEFAULT_EVENTBRITE_API_URL: &str = "https://www.eventbriteapi.com";
pub const DEFAULT_BREVO_API_URL: &str = "https://api.brevo.com";

/// A credential that never shows up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a raw value. Blank values count as not configured.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redacted]")
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the events API
    pub eventbrite_api_token: Option<Secret>,
    /// API key for the contacts API
    pub brevo_api_key: Option<Secret>,
    /// Events API base URL
    pub eventbrite_api_url: Url,
    /// Contacts API base URL
    pub brevo_api_url: Url,
    /// Origins allowed to read responses
    pub cors: CorsPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `default_cors` applies when `CORS_ALLOWED_ORIGINS` is unset.
    pub fn from_env(default_cors: CorsPolicy) -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok(), default_cors)
    }

    /// Load configuration from any variable source.
    pub fn from_lookup<F>(lookup: F, default_cors: CorsPolicy) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let eventbrite_api_url = base_url(
            "EVENTBRITE_API_URL",
            lookup("EVENTBRITE_API_URL").as_deref(),
            DEFAULT_EVENTBRITE_API_URL,
        )?;
        let brevo_api_url = base_url(
            "BREVO_API_URL",
            lookup("BREVO_API_URL").as_deref(),
            DEFAULT_BREVO_API_URL,
        )?;

        Ok(Self {
            eventbrite_api_token: lookup("EVENTBRITE_API_TOKEN").and_then(Secret::new),
            brevo_api_key: lookup("BREVO_API_KEY").and_then(Secret::new),
            eventbrite_api_url,
            brevo_api_url,
            cors: lookup("CORS_ALLOWED_ORIGINS")
                .map(|value| CorsPolicy::parse(&value))
                .unwrap_or(default_cors),
        })
    }
}

fn base_url(name: &str, value: Option<&str>, default: &str) -> Result<Url> {
    let raw = value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default);

    let url = Url::parse(raw).map_err(|e| {
        Error::config(
            format!("Invalid {}: {}", name, e),
            format!("Set {} to an absolute http(s) URL", name),
        )
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::config(
            format!("Invalid {}: {}", name, raw),
            format!("Set {} to an absolute http(s) URL", name),
        ));
    }

    Ok(url)
}
