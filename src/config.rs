use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub leads_api_base_url: String,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            leads_api_base_url: std::env::var("LEADS_API_BASE_URL")
                .map_err(|_| {
                    anyhow::anyhow!("LEADS_API_BASE_URL environment variable required")
                })
                .and_then(|raw| {
                    if raw.trim().is_empty() {
                        anyhow::bail!("LEADS_API_BASE_URL cannot be empty");
                    }
                    let parsed = url::Url::parse(&raw).map_err(|e| {
                        anyhow::anyhow!("LEADS_API_BASE_URL is not a valid URL: {}", e)
                    })?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!("LEADS_API_BASE_URL must start with http:// or https://");
                    }
                    Ok(raw)
                })?,
            debounce_ms: std::env::var("DEBOUNCE_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("DEBOUNCE_MS must be a whole number of milliseconds")
                })?,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be a whole number of seconds")
                })?,
        };

        // Log successful configuration load
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Leads API base URL: {}", config.leads_api_base_url);
        tracing::debug!("Search debounce: {}ms", config.debounce_ms);
        tracing::debug!("Request timeout: {}s", config.request_timeout_secs);

        Ok(config)
    }

    /// Quiet period applied after a filter edit before a read is issued.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Per-request timeout for the Leads API client.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
