//! Telegram messenger
//!
//! Delivers plain text messages to one fixed chat through the Bot API
//! `sendMessage` method.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request to Telegram failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Telegram rejected the message (status {status}): {description}")]
    Rejected { status: u16, description: String },
}

/// Messaging collaborator: delivers text to a fixed destination
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Bot API implementation of Messenger
pub struct TelegramMessenger {
    client: Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramMessenger {
    /// Creates a messenger bound to `chat_id`
    ///
    /// # Arguments
    /// * `api_url` - Bot API base URL (e.g., "https://api.telegram.org")
    /// * `token` - Bot token
    /// * `chat_id` - Destination chat
    /// * `timeout` - Bound on each request
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_message(&self, text: &str) -> Result<(), DeliveryError> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body: Option<SendMessageResponse> = response.json().await.ok();

        match body {
            Some(SendMessageResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(SendMessageResponse { description, .. }) => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: description.unwrap_or_else(|| "no description".to_string()),
            }),
            None => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: "unreadable response body".to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use serde_json::{Value as JsonValue, json};
    use std::sync::{Arc, Mutex};

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_send_message_posts_chat_and_text() {
        let received: Arc<Mutex<Vec<JsonValue>>> = Arc::default();
        let sink = Arc::clone(&received);
        let router = Router::new().route(
            "/botTOKEN/sendMessage",
            post(move |Json(body): Json<JsonValue>| {
                let sink = Arc::clone(&sink);
                async move {
                    sink.lock().unwrap().push(body);
                    Json(json!({"ok": true, "result": {"message_id": 1}}))
                }
            }),
        );
        let base = spawn_stub(router).await;
        let messenger =
            TelegramMessenger::new(format!("{}/", base), "TOKEN", "42", Duration::from_secs(5))
                .unwrap();

        messenger.send_message("hello").await.unwrap();

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0], json!({"chat_id": "42", "text": "hello"}));
    }

    #[tokio::test]
    async fn test_send_message_rejected() {
        let router = Router::new().route(
            "/botTOKEN/sendMessage",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"ok": false, "description": "Bad Request: chat not found"})),
                )
            }),
        );
        let base = spawn_stub(router).await;
        let messenger =
            TelegramMessenger::new(base, "TOKEN", "42", Duration::from_secs(5)).unwrap();

        let err = messenger.send_message("hello").await.unwrap_err();

        match err {
            DeliveryError::Rejected {
                status,
                description,
            } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
