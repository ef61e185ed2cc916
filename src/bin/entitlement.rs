//! AWS Lambda entry point for the entitlement processor.
//!
//! Triggered by the entitlement SQS queue (batch size one).
//! Deploy with `cargo lambda build --release`.

use std::sync::Arc;

use aws_lambda_events::event::sqs::SqsEvent;
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marketplace_saas::config::EntitlementConfig;
use marketplace_saas::entitlement::EntitlementProcessor;
use marketplace_saas::services::MarketplaceEntitlements;
use marketplace_saas::storage::DynamoSubscribers;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let settings = EntitlementConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let source = MarketplaceEntitlements::new(aws_sdk_marketplaceentitlement::Client::new(
        &aws_config,
    ));
    let store = DynamoSubscribers::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        settings.subscribers_table_name,
    )?;
    let processor = Arc::new(EntitlementProcessor::new(source, store));

    info!("Entitlement processor starting...");
    lambda_runtime::run(service_fn(move |event: LambdaEvent<SqsEvent>| {
        let processor = Arc::clone(&processor);
        async move { processor.handle(event.payload).await.map_err(LambdaError::from) }
    }))
    .await
}
