//! Shared data models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query for an organizer's live events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsQuery {
    pub organizer_id: String,
}

/// Events payload returned by the events API.
///
/// The body is forwarded byte-for-byte; only the event count is extracted
/// for logging.
#[derive(Debug, Clone)]
pub struct EventsResult {
    pub body: Vec<u8>,
    pub event_count: Option<usize>,
}

/// Subscription body as posted by the browser, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionBody {
    pub email: Option<String>,
    pub attributes: Option<Map<String, Value>>,
    pub list_ids: Option<Vec<i64>>,
    pub update_enabled: Option<bool>,
}

/// Validated subscription. Serializes to the contact-creation payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub email: String,
    pub attributes: Map<String, Value>,
    pub list_ids: Vec<i64>,
    pub update_enabled: bool,
}

/// What the subscription endpoint answers on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionResult {
    pub success: bool,
    pub message: String,
    pub id: Value,
}

impl SubscriptionResult {
    pub fn subscribed(id: Value) -> Self {
        Self {
            success: true,
            message: "Successfully subscribed".to_string(),
            id,
        }
    }

    /// The contact was already on file.
    pub fn already_subscribed() -> Self {
        Self {
            success: true,
            message: "Already subscribed".to_string(),
            id: Value::String("existing".to_string()),
        }
    }
}

/// Successful contact-creation response.
#[derive(Debug, Deserialize)]
pub struct CreatedContact {
    pub id: Option<Value>,
}

/// Error object returned by the contacts API.
#[derive(Debug, Default, Deserialize)]
pub struct ContactsApiError {
    pub code: Option<String>,
    pub message: Option<String>,
}
