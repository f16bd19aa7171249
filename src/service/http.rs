use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// Factory for the shared HTTP client.
///
/// The timeout bounds a request that would otherwise leave its group stuck
/// in-flight forever; the backend has no cancellation protocol.
pub fn create_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}
