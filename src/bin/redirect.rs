//! AWS Lambda entry point for the legacy fulfillment redirect.
//!
//! Served behind a Lambda Function URL.
//! Deploy with `cargo lambda build --release`.

use std::sync::Arc;

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marketplace_saas::config::RedirectConfig;
use marketplace_saas::redirect::Redirect;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let settings = RedirectConfig::from_env()?;
    let handler = Arc::new(Redirect::new(settings.location));

    info!("Redirect handler starting...");
    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<LambdaFunctionUrlRequest>| {
            let handler = Arc::clone(&handler);
            async move { handler.handle(&event.payload).map_err(LambdaError::from) }
        },
    ))
    .await
}
