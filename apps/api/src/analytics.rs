//! Analytics webhook — fire-and-forget POST of each successful generation
//! to an external workflow endpoint. Failures are logged and swallowed:
//! they must never reach the user or touch session state.

use chrono::Utc;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::llm_client::GenerationResult;
use crate::models::profile::Profile;

#[derive(Clone)]
pub struct AnalyticsSink {
    client: Client,
    webhook_url: Option<String>,
}

impl AnalyticsSink {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
        }
    }

    /// Sends `{request, response, generated_at}` to the webhook on a spawned
    /// task and returns immediately. No retries, no delivery confirmation.
    pub fn record(&self, profile: &Profile, result: &GenerationResult) {
        let Some(url) = self.webhook_url.clone() else {
            debug!("Analytics webhook not configured, skipping event");
            return;
        };

        let payload = json!({
            "request": profile,
            "response": result,
            "generated_at": Utc::now(),
        });
        let client = self.client.clone();

        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!("Analytics event delivered");
                }
                Ok(response) => {
                    warn!("Analytics webhook returned {}", response.status());
                }
                Err(e) => {
                    warn!("Failed to send analytics event: {e}");
                }
            }
        });
    }
}
