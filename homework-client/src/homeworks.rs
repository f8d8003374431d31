//! Homework status endpoint

use crate::PracticumClient;
use crate::error::Result;
use serde_json::Value as JsonValue;

impl PracticumClient {
    /// Fetch submission statuses changed since `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp of the window start; `None` means now
    ///
    /// # Returns
    /// The raw JSON body. Shape checks are left to
    /// `homework_core::dto::check_response`.
    pub async fn get_homework_statuses(&self, from_date: Option<i64>) -> Result<JsonValue> {
        let from_date = from_date.unwrap_or_else(|| chrono::Utc::now().timestamp());

        tracing::debug!("GET {} from_date={}", self.endpoint, from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .query(&[("from_date", from_date)])
            .send()
            .await
            .inspect_err(|e| tracing::error!("Request to {} failed: {}", self.endpoint, e))?;

        self.handle_response(response).await.inspect_err(|e| {
            if let crate::ClientError::ApiError { status, .. } = e {
                tracing::error!("Endpoint {} unavailable: status {}", self.endpoint, status);
            }
        })
    }
}
