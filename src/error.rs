//! Error types for the audit client.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for client operations
//! - `Result<T>`: Type alias for Results using AppError

use thiserror::Error;

/// Domain-specific errors for client operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required input field missing or blank after trimming
    #[error("Missing required field: {0}")]
    InvalidInput(&'static str),

    /// Backend responded with a non-2xx status
    #[error("API Error: {status} {reason}")]
    Api { status: u16, reason: String },

    /// Network request failed before a response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create an API error from a status code and reason phrase
    pub fn api(status: u16, reason: impl Into<String>) -> Self {
        Self::Api { status, reason: reason.into() }
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
