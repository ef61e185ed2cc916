// src/models/entitlement.rs

//! Entitlement wire shapes shared by the landing page (producer) and the
//! entitlement processor (consumer).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action string carried by entitlement notifications.
pub const ACTION_ENTITLEMENT_UPDATED: &str = "entitlement-updated";

/// Envelope published to the entitlement queue.
///
/// The consumer accepts both the capitalized keys this producer emits and
/// the lowercase spelling used by older publishers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntitlementNotification {
    #[serde(rename = "Type", alias = "type")]
    pub kind: String,

    #[serde(rename = "Message", alias = "message")]
    pub message: NotificationMessage,
}

impl EntitlementNotification {
    /// Build an entitlement-updated notification for a customer.
    pub fn entitlement_updated(customer_identifier: &str, product_code: &str) -> Self {
        Self {
            kind: "Notification".to_string(),
            message: NotificationMessage {
                action: ACTION_ENTITLEMENT_UPDATED.to_string(),
                customer_identifier: customer_identifier.to_string(),
                product_code: product_code.to_string(),
            },
        }
    }
}

/// Inner notification payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationMessage {
    pub action: String,

    #[serde(rename = "customer-identifier")]
    pub customer_identifier: String,

    #[serde(rename = "product-code")]
    pub product_code: String,
}

/// One marketplace entitlement, as persisted on the subscriber record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntitlementRecord {
    pub customer_identifier: Option<String>,
    pub product_code: Option<String>,
    pub dimension: Option<String>,
    pub value: Option<EntitlementValue>,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl EntitlementRecord {
    /// Whether this entitlement has lapsed as of `now`.
    ///
    /// A missing expiration date means a perpetual entitlement.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expiration_date, Some(expiration) if expiration < now)
    }
}

/// Entitlement dimension value union.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EntitlementValue {
    Integer(i32),
    Double(f64),
    Boolean(bool),
    Text(String),
}

/// Attribute values written back to the subscriber record after an
/// entitlement refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementUpdate {
    /// JSON array of [`EntitlementRecord`]s.
    pub entitlement_json: String,
    pub successfully_subscribed: bool,
    pub subscription_expired: bool,
}
