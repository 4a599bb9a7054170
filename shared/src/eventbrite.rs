//! Events API client.

use reqwest::header::{AUTHORIZATION, USER_AGENT as USER_AGENT_HEADER};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::Secret;
use crate::models::{EventsQuery, EventsResult};
use crate::upstream::{UpstreamError, USER_AGENT};

const API: &str = "Eventbrite";

/// Client for the organizer events endpoint.
#[derive(Debug, Clone)]
pub struct EventbriteClient {
    http_client: reqwest::Client,
    base_url: Url,
    token: Secret,
}

impl EventbriteClient {
    pub fn new(http_client: reqwest::Client, base_url: Url, token: Secret) -> Self {
        Self {
            http_client,
            base_url,
            token,
        }
    }

    /// Live events of one organizer, soonest first, with venues expanded.
    pub fn organizer_events_url(&self, organizer_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v3", "organizers", organizer_id, "events", ""]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("status", "live")
            .append_pair("order_by", "start_asc")
            .append_pair("expand", "venue");
        url
    }

    /// Fetch an organizer's events. One attempt, no retry.
    pub async fn organizer_events(&self, query: &EventsQuery) -> Result<EventsResult, UpstreamError> {
        let url = self.organizer_events_url(&query.organizer_id);
        debug!("Fetching from Eventbrite API: {}", url);

        let response = self
            .http_client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token.expose()))
            .header(USER_AGENT_HEADER, USER_AGENT)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { api: API, source })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Eventbrite API error: {} {}", status.as_u16(), error_text);
            return Err(UpstreamError::Status {
                api: API,
                status: status.as_u16(),
                code: None,
                message: None,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Transport { api: API, source })?;

        let parsed: Value = serde_json::from_slice(&body)
            .map_err(|source| UpstreamError::Decode { api: API, source })?;

        Ok(EventsResult {
            event_count: parsed
                .get("events")
                .and_then(Value::as_array)
                .map(Vec::len),
            body: body.to_vec(),
        })
    }
}
