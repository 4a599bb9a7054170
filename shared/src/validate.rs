//! Request validators. Each runs before any upstream call.

use http::Method;

use crate::http::ProxyRequest;
use crate::models::{EventsQuery, SubscriptionBody, SubscriptionRequest};
use crate::{Error, Result};

/// Reject any verb other than `allowed`.
pub fn method(request: &ProxyRequest, allowed: &Method) -> Result<()> {
    if &request.method == allowed {
        Ok(())
    } else {
        Err(Error::MethodNotAllowed)
    }
}

/// Extract the organizer id from the query string.
pub fn events_query(request: &ProxyRequest) -> Result<EventsQuery> {
    let organizer_id = request
        .query_param("organizerId")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::validation("Organizer ID required"))?;

    Ok(EventsQuery {
        organizer_id: organizer_id.to_string(),
    })
}

/// Parse and check a subscription body, filling in defaults.
pub fn subscription_request(body: &[u8]) -> Result<SubscriptionRequest> {
    let body: SubscriptionBody = serde_json::from_slice(body).map_err(|e| {
        if e.is_data() {
            Error::validation(format!("Invalid request body: {}", e))
        } else {
            Error::validation("Invalid JSON in request body")
        }
    })?;

    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| Error::validation("Email address is required"))?;

    Ok(SubscriptionRequest {
        email: email.to_string(),
        attributes: body.attributes.unwrap_or_default(),
        list_ids: body.list_ids.unwrap_or_default(),
        update_enabled: body.update_enabled.unwrap_or(true),
    })
}
