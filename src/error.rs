// src/error.rs

//! Unified error handling for the integration handlers.

use std::fmt;

use thiserror::Error;

/// Result type alias for handler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// AWS Marketplace API call failed
    #[error("Marketplace error: {0}")]
    Marketplace(String),

    /// DynamoDB call failed
    #[error("Database error: {0}")]
    Database(String),

    /// SQS call failed
    #[error("Queue error: {0}")]
    Queue(String),

    /// Malformed or unexpected message content
    #[error("Message error: {0}")]
    Message(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding failed
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Create a marketplace API error.
    pub fn marketplace(message: impl fmt::Display) -> Self {
        Self::Marketplace(message.to_string())
    }

    /// Create a database error.
    pub fn database(message: impl fmt::Display) -> Self {
        Self::Database(message.to_string())
    }

    /// Create a queue error.
    pub fn queue(message: impl fmt::Display) -> Self {
        Self::Queue(message.to_string())
    }

    /// Create a message error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
