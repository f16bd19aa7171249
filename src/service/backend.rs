//! Typed JSON-over-HTTP wrapper for every backend endpoint.
//!
//! All audit endpoints are POST with the same `{url, primaryKeyword,
//! secondaryKeyword}` body; history is a bare GET. A non-2xx status maps to
//! `AppError::Api` so every caller surfaces the same
//! `API Error: <status> <reason>` message.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::domain::models::{
    AuditQuery, CompetitorRecord, EvaluatePageRequest, EvaluatePageResponse, FaqResponse,
    HistoryResponse, OptimizeContentRequest, OptimizeContentResponse, OverviewResponse,
    RawHtmlResponse, SeoIssuesResponse,
};
use crate::error::{AppError, Result};
use crate::service::http::create_client;

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    config: AppConfig,
}

impl BackendClient {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = create_client(config.request_timeout)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn seo_issues(&self, query: &AuditQuery) -> Result<SeoIssuesResponse> {
        self.post_json(self.config.backend_endpoint("/audit/seo-issues"), query)
            .await
    }

    pub async fn raw_html(&self, query: &AuditQuery) -> Result<RawHtmlResponse> {
        self.post_json(self.config.backend_endpoint("/audit/raw-html"), query)
            .await
    }

    pub async fn overview(&self, query: &AuditQuery) -> Result<OverviewResponse> {
        self.post_json(self.config.backend_endpoint("/audit/overview"), query)
            .await
    }

    pub async fn competitors(&self, query: &AuditQuery) -> Result<Vec<CompetitorRecord>> {
        self.post_json(self.config.backend_endpoint("/audit/competitors"), query)
            .await
    }

    pub async fn faqs(&self, query: &AuditQuery) -> Result<FaqResponse> {
        self.post_json(self.config.backend_endpoint("/audit/ai-recommendation/faq"), query)
            .await
    }

    pub async fn evaluate_page(&self, request: &EvaluatePageRequest) -> Result<EvaluatePageResponse> {
        self.post_json(
            self.config.backend_endpoint("/audit/ai-recommendation/evaluate-page"),
            request,
        )
        .await
    }

    pub async fn history(&self) -> Result<HistoryResponse> {
        self.get_json(self.config.backend_endpoint("/audit/seo-issues/history"))
            .await
    }

    /// Content optimization lives on the general API base, not the audit backend.
    pub async fn optimize_content(
        &self,
        request: &OptimizeContentRequest,
    ) -> Result<OptimizeContentResponse> {
        self.post_json(self.config.api_endpoint("/optimizeContent"), request)
            .await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: String, body: &B) -> Result<T> {
        log::debug!("[API] POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        log::debug!("[API] GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown Error");
            log::warn!("[API] request failed: {} {}", status.as_u16(), reason);
            return Err(AppError::api(status.as_u16(), reason));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }
}
