use crate::errors::AppError;
use crate::models::{Lead, LeadListEnvelope, ReportStatus, StatusFilter, UpdateAckEnvelope};
use serde_json::json;
use std::time::Duration;
use tracing;

/// Client for the Leads API (`/api/users`).
///
/// The API is an external collaborator: this client only reads filtered lead
/// sets and flips individual report statuses.
#[derive(Clone)]
pub struct LeadsApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl LeadsApiClient {
    /// Creates a new `LeadsApiClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the Leads API, without the `/api/users` path.
    /// * `timeout` - Per-request timeout.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::TransportError(format!("Failed to create leads client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the query parameters for a filtered read.
    ///
    /// A parameter is omitted exactly when its filter is at the default
    /// (ALL status, empty search term).
    pub fn query_params(filter: StatusFilter, name: &str) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = filter.as_param() {
            params.push(("report_status", status.to_string()));
        }
        if !name.is_empty() {
            params.push(("name", name.to_string()));
        }
        params
    }

    /// Reads leads filtered by status and by name substring.
    ///
    /// # Arguments
    ///
    /// * `filter` - Status filter; omitted from the request when `All`.
    /// * `name` - Name substring; omitted from the request when empty.
    ///
    /// # Returns
    ///
    /// * `Result<Vec<Lead>, AppError>` - The full result set, in server order.
    pub async fn fetch_leads(
        &self,
        filter: StatusFilter,
        name: &str,
    ) -> Result<Vec<Lead>, AppError> {
        let params = Self::query_params(filter, name);
        let url = reqwest::Url::parse_with_params(
            &format!("{}/api/users", self.base_url),
            &params,
        )
        .map_err(|e| AppError::TransportError(format!("Failed to build URL: {}", e)))?;
        tracing::debug!("Fetching leads: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("Leads request failed: {}", e)))?;

        // The envelope is authoritative even on a non-2xx status; only an
        // unparseable body counts as a transport failure.
        let http_status = response.status();
        let envelope: LeadListEnvelope = response.json().await.map_err(|e| {
            AppError::TransportError(format!(
                "Failed to parse leads response ({}): {}",
                http_status, e
            ))
        })?;

        if !envelope.is_success() {
            return Err(AppError::ApiFailure(
                envelope.message.unwrap_or(envelope.status),
            ));
        }

        Ok(envelope.data)
    }

    /// Sets the report status of a single lead.
    ///
    /// # Arguments
    ///
    /// * `id` - The id of the lead to update.
    /// * `new_status` - The status to store.
    ///
    /// # Returns
    ///
    /// * `Result<(), AppError>` - Ok once the API acknowledges the update.
    pub async fn update_status(
        &self,
        id: &str,
        new_status: ReportStatus,
    ) -> Result<(), AppError> {
        let url = format!("{}/api/users", self.base_url);
        tracing::info!("Updating lead {} to {}", id, new_status);

        let body = json!({
            "id": id,
            "report_status": new_status,
        });

        let response = self
            .client
            .patch(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("Status update failed: {}", e)))?;

        let http_status = response.status();
        let envelope: UpdateAckEnvelope = response.json().await.map_err(|e| {
            AppError::TransportError(format!(
                "Failed to parse update response ({}): {}",
                http_status, e
            ))
        })?;

        if !envelope.is_success() {
            return Err(AppError::ApiFailure(
                envelope.message.unwrap_or(envelope.status),
            ));
        }

        tracing::info!("✓ Lead {} updated to {}", id, new_status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LeadsApiClient::new(
            "https://example.com".to_string(),
            Duration::from_secs(30),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn default_filters_produce_no_params() {
        assert!(LeadsApiClient::query_params(StatusFilter::All, "").is_empty());
    }

    #[test]
    fn non_default_filters_each_produce_a_param() {
        let params = LeadsApiClient::query_params(StatusFilter::Pending, "ravi");
        assert_eq!(
            params,
            vec![
                ("report_status", "PENDING".to_string()),
                ("name", "ravi".to_string()),
            ]
        );
    }
}
