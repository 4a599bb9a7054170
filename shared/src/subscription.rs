//! Subscription proxy: adds a newsletter contact without exposing the API key.

use http::{Method, StatusCode};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::brevo::{self, BrevoClient, ContactOutcome};
use crate::cors::CorsPolicy;
use crate::http::{ProxyRequest, ProxyResponse};
use crate::models::SubscriptionResult;
use crate::{validate, Config, Error, Result};

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const KEY_HINT: &str = "Set BREVO_API_KEY in the function's environment variables";

pub struct SubscriptionProxy {
    client: Option<BrevoClient>,
    cors: CorsPolicy,
}

impl SubscriptionProxy {
    pub fn new(config: &Config, http_client: reqwest::Client) -> Self {
        Self {
            client: config
                .brevo_api_key
                .clone()
                .map(|key| BrevoClient::new(http_client, config.brevo_api_url.clone(), key)),
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
            match self.subscribe(request).await {
                Ok(result) => ProxyResponse::json(StatusCode::OK, &result),
                Err(e) => {
                    if e.status_code() < 500 {
                        warn!("Rejected subscription request: {}", e);
                    } else {
                        error!("Error with Brevo subscription: {}", e);
                    }
                    ProxyResponse::from_error(&e)
                }
            }
        };

        self.cors.apply(request.origin(), &mut response.headers);
        response
    }

    async fn subscribe(&self, request: &ProxyRequest) -> Result<SubscriptionResult> {
        validate::method(request, &Method::POST)?;
        let subscription = validate::subscription_request(&request.body)?;

        info!("Brevo subscription request for: {}", subscription.email);

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::config("Brevo API key not configured", KEY_HINT))?;

        match client.create_contact(&subscription).await {
            Ok(ContactOutcome::Created { id }) => {
                info!("Successfully subscribed {} (contact {})", subscription.email, id);
                Ok(SubscriptionResult::subscribed(id))
            }
            Ok(ContactOutcome::Updated) => {
                info!("Updated existing contact {}", subscription.email);
                Ok(SubscriptionResult::subscribed(Value::String(
                    "existing".to_string(),
                )))
            }
            Err(e) if brevo::is_duplicate_contact(&e) => {
                warn!("{} is already subscribed", subscription.email);
                Ok(SubscriptionResult::already_subscribed())
            }
            Err(e) => Err(Error::upstream_message("Failed to subscribe", e.message())),
        }
    }
}
