//! Contacts API client.

use reqwest::header::{ACCEPT, USER_AGENT as USER_AGENT_HEADER};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::Secret;
use crate::models::{ContactsApiError, CreatedContact, SubscriptionRequest};
use crate::upstream::{UpstreamError, USER_AGENT};

const API: &str = "Brevo";

/// Error code the contacts API uses for an address it already knows.
pub const DUPLICATE_PARAMETER: &str = "duplicate_parameter";

/// Result of a successful contact upsert.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactOutcome {
    /// A new contact was created with this id.
    Created { id: Value },
    /// An existing contact was updated; the API sends no id.
    Updated,
}

/// Client for the contact-creation endpoint.
#[derive(Debug, Clone)]
pub struct BrevoClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: Secret,
}

impl BrevoClient {
    pub fn new(http_client: reqwest::Client, base_url: Url, api_key: Secret) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
        }
    }

    pub fn contacts_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v3", "contacts"]);
        }
        url
    }

    /// Create or update a contact and add it to the requested lists.
    pub async fn create_contact(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<ContactOutcome, UpstreamError> {
        debug!("Creating/updating contact in Brevo: {}", request.email);

        let response = self
            .http_client
            .post(self.contacts_url())
            .header(ACCEPT, "application/json")
            .header("api-key", self.api_key.expose())
            .header(USER_AGENT_HEADER, USER_AGENT)
            .json(request)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { api: API, source })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Transport { api: API, source })?;

        if !status.is_success() {
            let api_error: ContactsApiError = serde_json::from_slice(&body).unwrap_or_default();
            error!(
                "Brevo API error: {} {}",
                status.as_u16(),
                String::from_utf8_lossy(&body)
            );
            return Err(UpstreamError::Status {
                api: API,
                status: status.as_u16(),
                code: api_error.code,
                message: api_error.message,
            });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ContactOutcome::Updated);
        }

        let created: CreatedContact = serde_json::from_slice(&body)
            .map_err(|source| UpstreamError::Decode { api: API, source })?;

        Ok(match created.id {
            Some(id) if !id.is_null() => ContactOutcome::Created { id },
            _ => ContactOutcome::Updated,
        })
    }
}

/// Whether a failed upsert means the contact already exists.
///
/// Besides the documented `duplicate_parameter` code, a 400 whose message
/// says the contact "already exists" counts too.
pub fn is_duplicate_contact(err: &UpstreamError) -> bool {
    match err {
        UpstreamError::Status {
            status: 400,
            code,
            message,
            ..
        } => {
            code.as_deref() == Some(DUPLICATE_PARAMETER)
                || message
                    .as_deref()
                    .is_some_and(|m| m.to_ascii_lowercase().contains("already exist"))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16, code: Option<&str>, message: Option<&str>) -> UpstreamError {
        UpstreamError::Status {
            api: API,
            status,
            code: code.map(str::to_string),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_contacts_url() {
        let client = BrevoClient::new(
            reqwest::Client::new(),
            Url::parse("https://api.brevo.com").unwrap(),
            Secret::new("xkeysib-test").unwrap(),
        );
        assert_eq!(client.contacts_url().as_str(), "https://api.brevo.com/v3/contacts");
    }

    #[test]
    fn test_is_duplicate_contact() {
        assert!(is_duplicate_contact(&status_error(
            400,
            Some("duplicate_parameter"),
            Some("Contact already exist")
        )));
        assert!(is_duplicate_contact(&status_error(400, Some("duplicate_parameter"), None)));
        assert!(is_duplicate_contact(&status_error(
            400,
            Some("invalid_parameter"),
            Some("Contact already exists")
        )));
        assert!(!is_duplicate_contact(&status_error(400, Some("invalid_parameter"), None)));
        assert!(!is_duplicate_contact(&status_error(
            409,
            Some("duplicate_parameter"),
            None
        )));
        assert!(!is_duplicate_contact(&status_error(503, None, None)));
    }
}
