// src/services/entitlements.rs

//! Marketplace entitlement lookup.

use async_trait::async_trait;
use aws_sdk_marketplaceentitlement::Client;
use aws_sdk_marketplaceentitlement::types::{
    Entitlement, EntitlementValue as SdkEntitlementValue, GetEntitlementFilterName,
};
use chrono::{TimeZone, Utc};
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{EntitlementRecord, EntitlementValue};

/// Source of current entitlements for a marketplace customer.
#[async_trait]
pub trait EntitlementSource: Send + Sync {
    /// Fetch all entitlements held by a customer under a product code.
    async fn entitlements_for(
        &self,
        customer_identifier: &str,
        product_code: &str,
    ) -> Result<Vec<EntitlementRecord>>;
}

/// AWS Marketplace Entitlement Service client wrapper.
pub struct MarketplaceEntitlements {
    client: Client,
}

impl MarketplaceEntitlements {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EntitlementSource for MarketplaceEntitlements {
    async fn entitlements_for(
        &self,
        customer_identifier: &str,
        product_code: &str,
    ) -> Result<Vec<EntitlementRecord>> {
        let output = self
            .client
            .get_entitlements()
            .product_code(product_code)
            .filter(
                GetEntitlementFilterName::CustomerIdentifier,
                vec![customer_identifier.to_string()],
            )
            .send()
            .await
            .map_err(AppError::marketplace)?;

        let entitlements: Vec<EntitlementRecord> = output
            .entitlements
            .unwrap_or_default()
            .into_iter()
            .map(to_record)
            .collect();

        info!(
            "Fetched {} entitlements for customer {}",
            entitlements.len(),
            customer_identifier
        );
        Ok(entitlements)
    }
}

fn to_record(entitlement: Entitlement) -> EntitlementRecord {
    EntitlementRecord {
        customer_identifier: entitlement.customer_identifier,
        product_code: entitlement.product_code,
        dimension: entitlement.dimension,
        value: entitlement.value.and_then(to_value),
        expiration_date: entitlement
            .expiration_date
            .and_then(|ts| Utc.timestamp_opt(ts.secs(), ts.subsec_nanos()).single()),
    }
}

fn to_value(value: SdkEntitlementValue) -> Option<EntitlementValue> {
    if let Some(n) = value.integer_value {
        return Some(EntitlementValue::Integer(n));
    }
    if let Some(n) = value.double_value {
        return Some(EntitlementValue::Double(n));
    }
    if let Some(b) = value.boolean_value {
        return Some(EntitlementValue::Boolean(b));
    }
    value.string_value.map(EntitlementValue::Text)
}
