// src/storage/mod.rs

//! Subscriber record persistence.

mod dynamodb;

pub use dynamodb::DynamoSubscribers;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{EntitlementUpdate, SubscriberRecord};

/// Store of subscriber records keyed by customer identifier.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Insert or replace a subscriber record after registration.
    async fn put_subscriber(&self, record: &SubscriberRecord) -> Result<()>;

    /// Write refreshed entitlement state onto an existing record.
    async fn update_entitlement(
        &self,
        customer_identifier: &str,
        update: &EntitlementUpdate,
    ) -> Result<()>;
}
