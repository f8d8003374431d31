//! Notification delivery
//!
//! Sends prepared text through a [`Messenger`]. Delivery failures are
//! logged and swallowed: a lost notification never stops the poll loop,
//! and the same send is not retried within a cycle.

use std::sync::Arc;
use tracing::{error, info};

use crate::repository::Messenger;

pub struct Notifier {
    messenger: Arc<dyn Messenger>,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn Messenger>) -> Self {
        Self { messenger }
    }

    /// Delivers `text`, returning whether it went through
    pub async fn send_message(&self, text: &str) -> bool {
        match self.messenger.send_message(text).await {
            Ok(()) => {
                info!("Message delivered to Telegram");
                true
            }
            Err(e) => {
                error!("Failed to deliver message to Telegram: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::DeliveryError;
    use async_trait::async_trait;

    struct FailingMessenger;

    #[async_trait]
    impl Messenger for FailingMessenger {
        async fn send_message(&self, _text: &str) -> Result<(), DeliveryError> {
            Err(DeliveryError::Rejected {
                status: 403,
                description: "Forbidden: bot was blocked by the user".to_string(),
            })
        }
    }

    struct OkMessenger;

    #[async_trait]
    impl Messenger for OkMessenger {
        async fn send_message(&self, _text: &str) -> Result<(), DeliveryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let notifier = Notifier::new(Arc::new(FailingMessenger));
        assert!(!notifier.send_message("hello").await);
    }

    #[tokio::test]
    async fn test_delivery_success() {
        let notifier = Notifier::new(Arc::new(OkMessenger));
        assert!(notifier.send_message("hello").await);
    }
}
