// src/entitlement.rs

//! Entitlement update processor.
//!
//! Consumes `entitlement-updated` notifications from the entitlement queue,
//! refreshes the customer's entitlements from the AWS Marketplace
//! Entitlement Service, and writes the outcome onto the subscriber record.

use aws_lambda_events::event::sqs::SqsEvent;
use chrono::Utc;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{ACTION_ENTITLEMENT_UPDATED, EntitlementNotification, EntitlementUpdate};
use crate::services::EntitlementSource;
use crate::storage::SubscriberStore;

/// Handler for entitlement queue messages.
pub struct EntitlementProcessor<E, S> {
    source: E,
    store: S,
}

impl<E, S> EntitlementProcessor<E, S>
where
    E: EntitlementSource,
    S: SubscriberStore,
{
    pub fn new(source: E, store: S) -> Self {
        Self { source, store }
    }

    /// Process one entitlement-updated notification.
    ///
    /// The queue trigger must be configured with a batch size of one; any
    /// other record count is rejected so the batch returns to the queue
    /// intact.
    pub async fn handle(&self, event: SqsEvent) -> Result<()> {
        if event.records.len() != 1 {
            return Err(AppError::message(format!(
                "wrong number of records in the event ({}); configure the lambda trigger batch size to one",
                event.records.len()
            )));
        }
        let body = event.records[0].body.as_deref().unwrap_or_default();
        let notification: EntitlementNotification = serde_json::from_str(body)
            .map_err(|e| AppError::message(format!("malformed entitlement message {body:?}: {e}")))?;
        let message = notification.message;
        if message.action != ACTION_ENTITLEMENT_UPDATED {
            return Err(AppError::message(format!("invalid action in message {body:?}")));
        }

        let entitlements = self
            .source
            .entitlements_for(&message.customer_identifier, &message.product_code)
            .await?;
        let Some(first) = entitlements.first() else {
            return Err(AppError::message(format!(
                "no entitlements found for customer {:?}",
                message.customer_identifier
            )));
        };
        let expired = first.is_expired_at(Utc::now());

        let update = EntitlementUpdate {
            entitlement_json: serde_json::to_string(&entitlements)?,
            successfully_subscribed: true,
            subscription_expired: expired,
        };
        self.store
            .update_entitlement(&message.customer_identifier, &update)
            .await?;

        info!(
            "Recorded entitlement update for customer {} (expired: {})",
            message.customer_identifier, expired
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use aws_lambda_events::event::sqs::SqsMessage;
    use chrono::Duration;

    use super::*;
    use crate::models::{EntitlementRecord, SubscriberRecord};

    const DEFAULT_BODY: &str = r#"{
        "type": "Notification",
        "message": {
            "action": "entitlement-updated",
            "customer-identifier": "customerIdentifier",
            "product-code": "productCode"
        }
    }"#;

    fn sqs_event(bodies: &[&str]) -> SqsEvent {
        let mut event = SqsEvent::default();
        event.records = bodies
            .iter()
            .map(|body| {
                let mut message = SqsMessage::default();
                message.body = Some(body.to_string());
                message
            })
            .collect();
        event
    }

    fn entitlement_expiring_in(hours: i64) -> EntitlementRecord {
        EntitlementRecord {
            customer_identifier: Some("customerIdentifier".to_string()),
            product_code: Some("productCode".to_string()),
            dimension: None,
            value: None,
            expiration_date: Some(Utc::now() + Duration::hours(hours)),
        }
    }

    #[derive(Clone, Default)]
    struct StaticSource {
        records: Vec<EntitlementRecord>,
        seen: Arc<Mutex<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl EntitlementSource for StaticSource {
        async fn entitlements_for(
            &self,
            customer_identifier: &str,
            product_code: &str,
        ) -> Result<Vec<EntitlementRecord>> {
            self.seen
                .lock()
                .unwrap()
                .push((customer_identifier.to_string(), product_code.to_string()));
            Ok(self.records.clone())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingStore {
        updates: Arc<Mutex<Vec<(String, EntitlementUpdate)>>>,
    }

    #[async_trait]
    impl SubscriberStore for RecordingStore {
        async fn put_subscriber(&self, _record: &SubscriberRecord) -> Result<()> {
            Ok(())
        }

        async fn update_entitlement(
            &self,
            customer_identifier: &str,
            update: &EntitlementUpdate,
        ) -> Result<()> {
            self.updates
                .lock()
                .unwrap()
                .push((customer_identifier.to_string(), update.clone()));
            Ok(())
        }
    }

    fn processor_with(
        records: Vec<EntitlementRecord>,
    ) -> (
        EntitlementProcessor<StaticSource, RecordingStore>,
        StaticSource,
        RecordingStore,
    ) {
        let source = StaticSource {
            records,
            ..Default::default()
        };
        let store = RecordingStore::default();
        (
            EntitlementProcessor::new(source.clone(), store.clone()),
            source,
            store,
        )
    }

    #[tokio::test]
    async fn errors_given_no_records() {
        let (processor, _, _) = processor_with(vec![entitlement_expiring_in(1)]);
        assert!(processor.handle(sqs_event(&[])).await.is_err());
    }

    #[tokio::test]
    async fn errors_given_more_than_one_record() {
        let (processor, _, _) = processor_with(vec![entitlement_expiring_in(1)]);
        let event = sqs_event(&[DEFAULT_BODY, DEFAULT_BODY]);
        assert!(processor.handle(event).await.is_err());
    }

    #[tokio::test]
    async fn errors_given_unexpected_action() {
        let (processor, _, _) = processor_with(vec![entitlement_expiring_in(1)]);
        let body = r#"{
            "type": "Notification",
            "message": {
                "action": "bogus",
                "customer-identifier": "customerIdentifier",
                "product-code": "productCode"
            }
        }"#;
        assert!(processor.handle(sqs_event(&[body])).await.is_err());
    }

    #[tokio::test]
    async fn errors_given_malformed_body() {
        let (processor, _, _) = processor_with(vec![entitlement_expiring_in(1)]);
        assert!(processor.handle(sqs_event(&["not json"])).await.is_err());
    }

    #[tokio::test]
    async fn looks_up_entitlements_for_the_notified_customer() {
        let (processor, source, _) = processor_with(vec![entitlement_expiring_in(1)]);
        processor.handle(sqs_event(&[DEFAULT_BODY])).await.unwrap();
        let seen = source.seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            [("customerIdentifier".to_string(), "productCode".to_string())]
        );
    }

    #[tokio::test]
    async fn marks_active_subscription_as_not_expired() {
        let (processor, _, store) = processor_with(vec![entitlement_expiring_in(1)]);
        processor.handle(sqs_event(&[DEFAULT_BODY])).await.unwrap();
        let updates = store.updates.lock().unwrap();
        let (customer, update) = &updates[0];
        assert_eq!(customer, "customerIdentifier");
        assert!(update.successfully_subscribed);
        assert!(!update.subscription_expired);
    }

    #[tokio::test]
    async fn marks_lapsed_subscription_as_expired() {
        let (processor, _, store) = processor_with(vec![entitlement_expiring_in(-24)]);
        processor.handle(sqs_event(&[DEFAULT_BODY])).await.unwrap();
        let updates = store.updates.lock().unwrap();
        assert!(updates[0].1.subscription_expired);
    }

    #[tokio::test]
    async fn treats_missing_expiration_as_active() {
        let record = EntitlementRecord {
            expiration_date: None,
            ..entitlement_expiring_in(0)
        };
        let (processor, _, store) = processor_with(vec![record]);
        processor.handle(sqs_event(&[DEFAULT_BODY])).await.unwrap();
        let updates = store.updates.lock().unwrap();
        assert!(!updates[0].1.subscription_expired);
    }

    #[tokio::test]
    async fn stores_the_entitlements_as_json() {
        let (processor, _, store) = processor_with(vec![entitlement_expiring_in(1)]);
        processor.handle(sqs_event(&[DEFAULT_BODY])).await.unwrap();
        let updates = store.updates.lock().unwrap();
        let parsed: Vec<EntitlementRecord> =
            serde_json::from_str(&updates[0].1.entitlement_json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(
            parsed[0].customer_identifier.as_deref(),
            Some("customerIdentifier")
        );
    }

    #[tokio::test]
    async fn errors_when_customer_has_no_entitlements() {
        let (processor, _, store) = processor_with(Vec::new());
        assert!(processor.handle(sqs_event(&[DEFAULT_BODY])).await.is_err());
        assert!(store.updates.lock().unwrap().is_empty());
    }
}
