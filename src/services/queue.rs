// src/services/queue.rs

//! Entitlement queue publishing.

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::EntitlementNotification;

/// Downstream queue for entitlement-updated notifications.
#[async_trait]
pub trait EntitlementQueue: Send + Sync {
    async fn publish(&self, notification: &EntitlementNotification) -> Result<()>;
}

/// SQS-backed entitlement queue.
pub struct SqsEntitlementQueue {
    client: Client,
    queue_url: String,
}

impl SqsEntitlementQueue {
    /// Create a publisher for the given queue URL.
    pub fn new(client: Client, queue_url: impl Into<String>) -> Result<Self> {
        let queue_url = queue_url.into();
        if queue_url.is_empty() {
            return Err(AppError::config("entitlement queue URL cannot be empty"));
        }
        Ok(Self { client, queue_url })
    }

    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }
}

#[async_trait]
impl EntitlementQueue for SqsEntitlementQueue {
    async fn publish(&self, notification: &EntitlementNotification) -> Result<()> {
        let body = serde_json::to_string(notification)?;
        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(AppError::queue)?;

        info!(
            "Published {} notification to {}",
            notification.message.action, self.queue_url
        );
        Ok(())
    }
}
