//! Environment-specific configuration.
//!
//! Resolved once at startup and passed down explicitly; nothing in the
//! deeper layers reads the environment on its own. The user identity is
//! part of the config for the same reason.

use std::env;
use std::time::Duration;

use crate::error::{AppError, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_ID: &str = "user-123";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Uat,
    Production,
}

impl Environment {
    fn from_env() -> Self {
        match env::var("GEOAUDIT_ENV").unwrap_or_default().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "uat" => Self::Uat,
            _ => Self::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Uat => "uat",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Base URL of the general API (content optimization lives here).
    pub api_base_url: String,
    /// Base URL of the audit backend.
    pub backend_url: String,
    /// Identity sent with content-optimization requests.
    pub user_id: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// `GEOAUDIT_BACKEND_URL` is required; the audit client is useless
    /// without it. `GEOAUDIT_API_BASE_URL` is only needed for content
    /// optimization and merely logs a warning when unset.
    pub fn from_env() -> Result<Self> {
        let env_kind = Environment::from_env();

        let backend_url = env::var("GEOAUDIT_BACKEND_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::config("GEOAUDIT_BACKEND_URL is not set"))?;

        let api_base_url = env::var("GEOAUDIT_API_BASE_URL").unwrap_or_default();
        if api_base_url.trim().is_empty() {
            log::warn!("[CONFIG] GEOAUDIT_API_BASE_URL is not set; content optimization is unavailable");
        }

        let user_id = env::var("GEOAUDIT_USER_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        let timeout_secs = env::var("GEOAUDIT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        log::info!("[CONFIG] environment: {}", env_kind.as_str());
        log::debug!("[CONFIG] backend url: {}", backend_url);

        Ok(Self {
            env: env_kind,
            api_base_url,
            backend_url,
            user_id,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Full URL for an audit-backend endpoint.
    pub fn backend_endpoint(&self, path: &str) -> String {
        join_url(&self.backend_url, path)
    }

    /// Full URL for a general-API endpoint.
    pub fn api_endpoint(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
