// src/config.rs

//! Environment-driven configuration for the Lambda binaries.
//!
//! Each binary validates its required variables before the Lambda runtime
//! starts polling, so a misconfigured function fails at startup instead of
//! on the first invocation.

use std::env;

use url::Url;

use crate::error::{AppError, Result};

/// Environment variable naming the DynamoDB subscribers table.
pub const ENV_SUBSCRIBERS_TABLE: &str = "AMSI_SUBSCRIBERS_TABLE_NAME";

/// Environment variable naming the entitlement SQS queue URL.
pub const ENV_ENTITLEMENT_QUEUE: &str = "AMSI_ENTITLEMENT_QUEUE_URL";

/// Environment variable naming the landing-page URL legacy requests are
/// redirected to.
pub const ENV_REDIRECT_LOCATION: &str = "AMSI_REDIRECT_LOCATION";

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::config(format!(
            "missing required environment variable {name}"
        ))),
    }
}

/// Settings for the entitlement processor.
#[derive(Debug, Clone)]
pub struct EntitlementConfig {
    pub subscribers_table_name: String,
}

impl EntitlementConfig {
    /// Load settings from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            subscribers_table_name: required(ENV_SUBSCRIBERS_TABLE)?,
        })
    }
}

/// Settings for the landing-page handler.
#[derive(Debug, Clone)]
pub struct LandingPageConfig {
    pub subscribers_table_name: String,
    pub entitlement_queue_url: String,
}

impl LandingPageConfig {
    /// Load settings from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            subscribers_table_name: required(ENV_SUBSCRIBERS_TABLE)?,
            entitlement_queue_url: required(ENV_ENTITLEMENT_QUEUE)?,
        })
    }
}

/// Settings for the redirect handler.
#[derive(Debug, Clone)]
pub struct RedirectConfig {
    pub location: Url,
}

impl RedirectConfig {
    /// Load settings from the environment.
    pub fn from_env() -> Result<Self> {
        let raw = required(ENV_REDIRECT_LOCATION)?;
        Ok(Self {
            location: Url::parse(&raw)?,
        })
    }
}
