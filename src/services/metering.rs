// src/services/metering.rs

//! Registration token resolution against the Marketplace Metering Service.

use async_trait::async_trait;
use aws_sdk_marketplacemetering::Client;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::ResolvedCustomer;

/// Resolves a marketplace registration token to a customer identity.
#[async_trait]
pub trait CustomerResolver: Send + Sync {
    async fn resolve_customer(&self, registration_token: &str) -> Result<ResolvedCustomer>;
}

/// AWS Marketplace Metering Service client wrapper.
pub struct MarketplaceMetering {
    client: Client,
}

impl MarketplaceMetering {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CustomerResolver for MarketplaceMetering {
    async fn resolve_customer(&self, registration_token: &str) -> Result<ResolvedCustomer> {
        let output = self
            .client
            .resolve_customer()
            .registration_token(registration_token)
            .send()
            .await
            .map_err(AppError::marketplace)?;

        let customer = ResolvedCustomer {
            customer_identifier: output.customer_identifier.ok_or_else(|| {
                AppError::marketplace("ResolveCustomer response missing customer identifier")
            })?,
            customer_aws_account_id: output.customer_aws_account_id.ok_or_else(|| {
                AppError::marketplace("ResolveCustomer response missing customer AWS account id")
            })?,
            product_code: output.product_code.ok_or_else(|| {
                AppError::marketplace("ResolveCustomer response missing product code")
            })?,
        };

        info!(
            "Resolved registration token to customer {}",
            customer.customer_identifier
        );
        Ok(customer)
    }
}
