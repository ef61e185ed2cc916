//! AWS Lambda entry point for the registration landing page.
//!
//! Served behind a Lambda Function URL.
//! Deploy with `cargo lambda build --release`.

use std::sync::Arc;

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marketplace_saas::config::LandingPageConfig;
use marketplace_saas::landingpage::LandingPage;
use marketplace_saas::services::{MarketplaceMetering, SqsEntitlementQueue};
use marketplace_saas::storage::DynamoSubscribers;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let settings = LandingPageConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let resolver = MarketplaceMetering::new(aws_sdk_marketplacemetering::Client::new(&aws_config));
    let store = DynamoSubscribers::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        settings.subscribers_table_name,
    )?;
    let queue = SqsEntitlementQueue::new(
        aws_sdk_sqs::Client::new(&aws_config),
        settings.entitlement_queue_url,
    )?;
    let page = Arc::new(LandingPage::new(resolver, store, queue));

    info!("Landing page starting...");
    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<LambdaFunctionUrlRequest>| {
            let page = Arc::clone(&page);
            async move { page.handle(event.payload).await.map_err(LambdaError::from) }
        },
    ))
    .await
}
