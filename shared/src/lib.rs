//! Shared library for the marketing site's API proxies.
//!
//! The proxies keep third-party credentials on the server: the browser calls
//! them, they validate the request, call the events or contacts API with the
//! server-held secret, and reshape the answer.

pub mod brevo;
pub mod config;
pub mod cors;
pub mod error;
pub mod eventbrite;
pub mod events;
pub mod http;
pub mod models;
pub mod subscription;
pub mod upstream;
pub mod validate;

pub use config::{Config, Secret};
pub use cors::CorsPolicy;
pub use error::{Error, ErrorBody, Result};
pub use events::EventsProxy;
pub use self::http::{lambda_response, proxy_request, ProxyRequest, ProxyResponse};
pub use models::{EventsQuery, EventsResult, SubscriptionRequest, SubscriptionResult};
pub use subscription::SubscriptionProxy;
pub use upstream::UpstreamError;
