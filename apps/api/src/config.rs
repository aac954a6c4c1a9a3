use anyhow::{Context, Result};
use tracing::warn;

/// Application configuration loaded from environment variables.
///
/// The Gemini credential, webhook, and catalog URL are all optional at
/// startup: a missing credential only fails the generate operation itself,
/// and the webhook/catalog are external collaborators the service can run
/// without.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub analytics_webhook_url: Option<String>,
    pub catalog_csv_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            analytics_webhook_url: optional_env("ANALYTICS_WEBHOOK_URL"),
            catalog_csv_url: optional_env("CATALOG_CSV_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Logs one warning per missing optional collaborator so operators see
    /// at startup what the deployment can and cannot do.
    pub fn warn_on_missing(&self) {
        if self.gemini_api_key.is_none() {
            warn!("GEMINI_API_KEY is not set — generation requests will fail");
        }
        if self.analytics_webhook_url.is_none() {
            warn!("ANALYTICS_WEBHOOK_URL is not set — analytics events will be skipped");
        }
        if self.catalog_csv_url.is_none() {
            warn!("CATALOG_CSV_URL is not set — resource catalog will be empty");
        }
    }
}

/// Treats unset AND empty-string variables as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
