// src/storage/dynamodb.rs

//! DynamoDB subscriber table implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{EntitlementUpdate, SubscriberRecord};
use crate::storage::SubscriberStore;

/// Update expression applied on entitlement refresh.
const ENTITLEMENT_UPDATE_EXPRESSION: &str =
    "set entitlement = :e, successfully_subscribed = :ss, subscription_expired = :se";

/// DynamoDB-backed subscriber store.
pub struct DynamoSubscribers {
    client: Client,
    table_name: String,
}

impl DynamoSubscribers {
    /// Create a store for the given table.
    pub fn new(client: Client, table_name: impl Into<String>) -> Result<Self> {
        let table_name = table_name.into();
        if table_name.is_empty() {
            return Err(AppError::config("subscribers table name cannot be empty"));
        }
        Ok(Self { client, table_name })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl SubscriberStore for DynamoSubscribers {
    async fn put_subscriber(&self, record: &SubscriberRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("companyName", AttributeValue::S(record.company_name.clone()))
            .item(
                "contactEmail",
                AttributeValue::S(record.contact_email.clone()),
            )
            .item("contactJob", AttributeValue::S(record.contact_job.clone()))
            .item("contactName", AttributeValue::S(record.contact_name.clone()))
            .item(
                "contactPhone",
                AttributeValue::S(record.contact_phone.clone()),
            )
            .item(
                "lastUpdate",
                AttributeValue::S(record.last_update.to_rfc3339()),
            )
            .item(
                "customerAWSAccountID",
                AttributeValue::S(record.customer_aws_account_id.clone()),
            )
            .item(
                "customerIdentifier",
                AttributeValue::S(record.customer_identifier.clone()),
            )
            .item("productCode", AttributeValue::S(record.product_code.clone()))
            .send()
            .await
            .map_err(AppError::database)?;

        info!(
            "Stored subscriber record for customer {}",
            record.customer_identifier
        );
        Ok(())
    }

    async fn update_entitlement(
        &self,
        customer_identifier: &str,
        update: &EntitlementUpdate,
    ) -> Result<()> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(
                "customerIdentifier",
                AttributeValue::S(customer_identifier.to_string()),
            )
            .update_expression(ENTITLEMENT_UPDATE_EXPRESSION)
            .expression_attribute_values(
                ":e",
                AttributeValue::S(update.entitlement_json.clone()),
            )
            .expression_attribute_values(
                ":ss",
                AttributeValue::Bool(update.successfully_subscribed),
            )
            .expression_attribute_values(
                ":se",
                AttributeValue::Bool(update.subscription_expired),
            )
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(AppError::database)?;

        info!(
            "Updated entitlement state for customer {}",
            customer_identifier
        );
        Ok(())
    }
}
