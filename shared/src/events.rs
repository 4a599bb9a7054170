//! Events proxy: lists an organizer's live events without exposing the API token.

use http::header::{HeaderValue, CACHE_CONTROL};
use http::{Method, StatusCode};
use tracing::{error, info, warn};

use crate::cors::CorsPolicy;
use crate::eventbrite::EventbriteClient;
use crate::http::{ProxyRequest, ProxyResponse};
use crate::models::EventsResult;
use crate::{validate, Config, Error, Result};

/// Shared caches may keep an events listing for five minutes.
pub const EVENTS_CACHE_CONTROL: &str = "public, max-age=300";

const ALLOWED_METHODS: &str = "GET, OPTIONS";
const TOKEN_HINT: &str = "Set EVENTBRITE_API_TOKEN in the function's environment variables";

pub struct EventsProxy {
    client: Option<EventbriteClient>,
    cors: CorsPolicy,
}

impl EventsProxy {
    pub fn new(config: &Config, http_client: reqwest::Client) -> Self {
        Self {
            client: config.eventbrite_api_token.clone().map(|token| {
                EventbriteClient::new(http_client, config.eventbrite_api_url.clone(), token)
            }),
            cors: config.cors.clone(),
        }
    }

    pub async fn handle(&self, request: &ProxyRequest) -> ProxyResponse {
        let mut response = if request.method == Method::OPTIONS {
            let mut response = ProxyResponse::raw_json(StatusCode::NO_CONTENT, Vec::new());
            self.cors
                .apply_preflight(request.origin(), ALLOWED_METHODS, &mut response.headers);
            response
        } else {
            match self.fetch_events(request).await {
                Ok(result) => ProxyResponse::raw_json(StatusCode::OK, result.body).with_header(
                    CACHE_CONTROL,
                    HeaderValue::from_static(EVENTS_CACHE_CONTROL),
                ),
                Err(e) => {
                    if e.status_code() < 500 {
                        warn!("Rejected events request: {}", e);
                    } else {
                        error!("Error fetching from Eventbrite: {}", e);
                    }
                    ProxyResponse::from_error(&e)
                }
            }
        };

        self.cors.apply(request.origin(), &mut response.headers);
        response
    }

    async fn fetch_events(&self, request: &ProxyRequest) -> Result<EventsResult> {
        validate::method(request, &Method::GET)?;
        let query = validate::events_query(request)?;

        info!(
            "Eventbrite proxy request for organizer: {}",
            query.organizer_id
        );

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::config("API token not configured", TOKEN_HINT))?;

        let result = client
            .organizer_events(&query)
            .await
            .map_err(|e| Error::upstream_details("Failed to fetch events", e.to_string()))?;

        info!(
            "Successfully fetched {} events",
            result.event_count.unwrap_or(0)
        );
        Ok(result)
    }
}
