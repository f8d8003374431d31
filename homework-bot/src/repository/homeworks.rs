//! Homework statuses repository

use async_trait::async_trait;
use homework_client::{PracticumClient, Result};
use serde_json::Value as JsonValue;

/// Repository trait for the homework review API
#[async_trait]
pub trait HomeworkRepository: Send + Sync {
    /// Fetches the raw status body for the window starting at `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp; `None` means now
    async fn fetch_statuses(&self, from_date: Option<i64>) -> Result<JsonValue>;
}

/// HTTP implementation of HomeworkRepository
pub struct HttpHomeworkRepository {
    client: PracticumClient,
}

impl HttpHomeworkRepository {
    pub fn new(client: PracticumClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HomeworkRepository for HttpHomeworkRepository {
    async fn fetch_statuses(&self, from_date: Option<i64>) -> Result<JsonValue> {
        self.client.get_homework_statuses(from_date).await
    }
}
