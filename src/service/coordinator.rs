//! Request coordination for one audit run.
//!
//! An `AuditSession` owns the request state for a single analyzed URL:
//! the primary result group (SEO issues, raw HTML, overview) joined
//! all-or-nothing, and three independent secondary groups (competitors,
//! FAQs, evaluation). Each group is an explicit state machine rather than
//! an imperative fetched-flag, so duplicate suppression and retry are data,
//! not side effects. Group failures are stored, never propagated; one
//! group failing cannot abort a sibling.

use crate::domain::models::{
    AuditQuery, Competitor, EvaluatePageRequest, EvaluatePageResponse, FaqResponse,
    OverviewResponse, PageContext, RawHtmlResponse, SeoIssuesResponse,
};
use crate::error::Result;
use crate::service::backend::BackendClient;
use crate::service::normalize::rank_competitors;

const DEFAULT_GEO_CONTEXT: &str = "India";
const DEFAULT_PAGE_TYPE: &str = "Informational";
const DEFAULT_INDUSTRY: &str = "Financial Services";

// ====== Per-group state machine ======

/// Lifecycle of one request group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupState<T> {
    NotStarted,
    InFlight,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for GroupState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// One logical backend call and its state. `Failed` clears the submission
/// guard so a later submit retries; `InFlight` and `Succeeded` suppress
/// duplicates.
#[derive(Debug, Clone)]
pub struct RequestGroup<T> {
    state: GroupState<T>,
}

impl<T> Default for RequestGroup<T> {
    fn default() -> Self {
        Self { state: GroupState::NotStarted }
    }
}

impl<T> RequestGroup<T> {
    pub fn state(&self) -> &GroupState<T> {
        &self.state
    }

    /// Whether a submit should issue a request for this group.
    pub fn should_submit(&self) -> bool {
        matches!(self.state, GroupState::NotStarted | GroupState::Failed(_))
    }

    pub fn begin(&mut self) {
        self.state = GroupState::InFlight;
    }

    pub fn finish(&mut self, result: std::result::Result<T, String>) {
        self.state = match result {
            Ok(data) => GroupState::Succeeded(data),
            Err(message) => GroupState::Failed(message),
        };
    }

    /// Payload, exposed only once the whole group succeeded.
    pub fn data(&self) -> Option<&T> {
        match &self.state {
            GroupState::Succeeded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            GroupState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, GroupState::InFlight)
    }
}

// ====== Session ======

/// Joined payload of the primary result group. Exists only when all three
/// calls succeeded; partial successes are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditBundle {
    pub seo: SeoIssuesResponse,
    pub raw_html: RawHtmlResponse,
    pub overview: OverviewResponse,
}

/// Orchestrates all backend calls for one `AuditQuery`.
pub struct AuditSession {
    client: BackendClient,
    query: AuditQuery,
    pub primary: RequestGroup<AuditBundle>,
    pub competitors: RequestGroup<Vec<Competitor>>,
    pub faqs: RequestGroup<FaqResponse>,
    pub evaluation: RequestGroup<EvaluatePageResponse>,
}

impl AuditSession {
    pub fn new(client: BackendClient, query: AuditQuery) -> Self {
        Self {
            client,
            query,
            primary: RequestGroup::default(),
            competitors: RequestGroup::default(),
            faqs: RequestGroup::default(),
            evaluation: RequestGroup::default(),
        }
    }

    pub fn query(&self) -> &AuditQuery {
        &self.query
    }

    /// Run every group that still needs a request.
    ///
    /// Validation failures return early without touching any group or the
    /// network. Group failures are recorded in the group states; `submit`
    /// itself only errs on invalid input.
    pub async fn submit(&mut self) -> Result<()> {
        self.query.validate()?;

        let client = self.client.clone();
        let query = self.query.clone();

        let run_primary = self.primary.should_submit();
        let run_competitors = self.competitors.should_submit();
        let run_faqs = self.faqs.should_submit();
        let run_evaluation = self.evaluation.should_submit();

        if run_primary {
            self.primary.begin();
        }
        if run_competitors {
            self.competitors.begin();
        }
        if run_faqs {
            self.faqs.begin();
        }
        if run_evaluation {
            self.evaluation.begin();
        }

        let primary_fut = {
            let client = client.clone();
            let query = query.clone();
            async move {
                if run_primary {
                    Some(fetch_primary(&client, &query).await)
                } else {
                    None
                }
            }
        };
        let competitors_fut = {
            let client = client.clone();
            let query = query.clone();
            async move {
                if run_competitors {
                    Some(fetch_competitors(&client, &query).await)
                } else {
                    None
                }
            }
        };
        let faqs_fut = {
            let client = client.clone();
            let query = query.clone();
            async move {
                if run_faqs {
                    Some(fetch_faqs(&client, &query).await)
                } else {
                    None
                }
            }
        };
        let evaluation_fut = async move {
            if run_evaluation {
                Some(fetch_evaluation(&client, &query).await)
            } else {
                None
            }
        };

        // Fan-out: all four groups fly concurrently; fan-in below.
        let (primary, competitors, faqs, evaluation) =
            tokio::join!(primary_fut, competitors_fut, faqs_fut, evaluation_fut);

        if let Some(result) = primary {
            self.primary.finish(result);
        }
        if let Some(result) = competitors {
            self.competitors.finish(result);
        }
        if let Some(result) = faqs {
            self.faqs.finish(result);
        }
        if let Some(result) = evaluation {
            self.evaluation.finish(result);
        }

        Ok(())
    }
}

/// Evaluation request built from the query. Page content is left empty;
/// the backend fetches the page itself.
pub fn evaluation_request(query: &AuditQuery) -> EvaluatePageRequest {
    let geo_context = if query.geo_region.is_empty() {
        DEFAULT_GEO_CONTEXT.to_string()
    } else {
        query.geo_region.clone()
    };
    EvaluatePageRequest {
        page_context: PageContext {
            url: query.url.clone(),
            page_type: DEFAULT_PAGE_TYPE.to_string(),
            primary_keyword: query.primary_keyword.clone(),
            geo_context,
            industry: DEFAULT_INDUSTRY.to_string(),
        },
        page_content: String::new(),
    }
}

async fn fetch_primary(
    client: &BackendClient,
    query: &AuditQuery,
) -> std::result::Result<AuditBundle, String> {
    log::info!("[AUDIT] fetching primary result group for {}", query.url);
    // All-or-nothing: the first failure wins and no partial data survives.
    match tokio::try_join!(
        client.seo_issues(query),
        client.raw_html(query),
        client.overview(query),
    ) {
        Ok((seo, raw_html, overview)) => {
            log::info!(
                "[AUDIT] primary group complete - {} checks, seo: {:.0}, geo: {:.0}",
                seo.total_checks,
                seo.seo_score,
                seo.geo_score
            );
            Ok(AuditBundle { seo, raw_html, overview })
        }
        Err(e) => {
            log::warn!("[AUDIT] primary group failed: {}", e);
            Err(e.to_string())
        }
    }
}

async fn fetch_competitors(
    client: &BackendClient,
    query: &AuditQuery,
) -> std::result::Result<Vec<Competitor>, String> {
    log::info!("[AUDIT] fetching competitors for {}", query.url);
    match client.competitors(query).await {
        Ok(records) => {
            let ranked = rank_competitors(&records);
            log::info!(
                "[AUDIT] competitors complete - {} of {} candidates kept",
                ranked.len(),
                records.len()
            );
            Ok(ranked)
        }
        Err(e) => {
            log::warn!("[AUDIT] competitors failed: {}", e);
            Err(e.to_string())
        }
    }
}

async fn fetch_faqs(
    client: &BackendClient,
    query: &AuditQuery,
) -> std::result::Result<FaqResponse, String> {
    log::info!("[AUDIT] fetching FAQs for {}", query.url);
    match client.faqs(query).await {
        Ok(faqs) => Ok(faqs),
        Err(e) => {
            log::warn!("[AUDIT] FAQs failed: {}", e);
            Err(e.to_string())
        }
    }
}

async fn fetch_evaluation(
    client: &BackendClient,
    query: &AuditQuery,
) -> std::result::Result<EvaluatePageResponse, String> {
    log::info!("[AUDIT] evaluating LLM visibility for {}", query.url);
    let request = evaluation_request(query);
    match client.evaluate_page(&request).await {
        Ok(report) => Ok(report),
        Err(e) => {
            log::warn!("[AUDIT] evaluation failed: {}", e);
            Err(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, Environment};
    use crate::error::AppError;
    use mockito::{Mock, Server, ServerGuard};
    use std::time::Duration;

    fn test_client(server: &ServerGuard) -> BackendClient {
        BackendClient::new(AppConfig {
            env: Environment::Development,
            api_base_url: server.url(),
            backend_url: server.url(),
            user_id: "tester".to_string(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn query() -> AuditQuery {
        AuditQuery::new("https://example.com/page", "seo tools", "geo tools", "United States")
    }

    const SEO_BODY: &str = r#"{
        "totalChecks": 1, "passedChecks": 1, "failedChecks": 0,
        "totalScore": 80, "seoScore": 85, "geoScore": 75,
        "checks": [{"order": 1, "title": "Title tag", "description": "",
                    "pass": true, "severity": "Low",
                    "seoCheck": true, "geoCheck": false, "seoSeverity": "Low"}]
    }"#;
    const HTML_BODY: &str = r#"{"html": "<html></html>"}"#;
    const OVERVIEW_BODY: &str =
        r#"{"pageTitle": "T", "metaDescription": "M", "contentWordCount": 500}"#;
    const FAQ_BODY: &str = r#"{"extractedFaqs": [], "generatedFaqs": [
        {"question": "q", "answer": "a"}], "totalExtracted": 0, "totalGenerated": 1}"#;
    const EVAL_BODY: &str = r#"{
        "llm_visibility_summary": {"overall_visibility_score": 60,
            "visibility_level": "MEDIUM", "primary_blockers": []},
        "parameter_scores": [],
        "citation_confidence": {"current_state": "LOW",
            "why_or_why_not": "", "what_would_improve_it": []},
        "recommended_next_actions": {"quick_wins": [], "structural_changes": []}
    }"#;

    async fn mock_json(server: &mut ServerGuard, method: &str, path: &str, body: &str, hits: usize) -> Mock {
        server
            .mock(method, path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    async fn mock_all_success(server: &mut ServerGuard) -> Vec<Mock> {
        vec![
            mock_json(server, "POST", "/audit/seo-issues", SEO_BODY, 1).await,
            mock_json(server, "POST", "/audit/raw-html", HTML_BODY, 1).await,
            mock_json(server, "POST", "/audit/overview", OVERVIEW_BODY, 1).await,
            mock_json(server, "POST", "/audit/competitors", "[]", 1).await,
            mock_json(server, "POST", "/audit/ai-recommendation/faq", FAQ_BODY, 1).await,
            mock_json(server, "POST", "/audit/ai-recommendation/evaluate-page", EVAL_BODY, 1).await,
        ]
    }

    #[test]
    fn group_state_machine_guards_submission() {
        let mut group: RequestGroup<u32> = RequestGroup::default();
        assert!(group.should_submit());

        group.begin();
        assert!(group.is_loading());
        assert!(!group.should_submit(), "in-flight group must not resubmit");

        group.finish(Ok(7));
        assert!(!group.should_submit(), "succeeded group must not resubmit");
        assert_eq!(group.data(), Some(&7));

        let mut failed: RequestGroup<u32> = RequestGroup::default();
        failed.begin();
        failed.finish(Err("boom".to_string()));
        assert!(failed.should_submit(), "failure clears the guard for retry");
        assert_eq!(failed.error(), Some("boom"));
        assert_eq!(failed.data(), None);
    }

    #[tokio::test]
    async fn submit_runs_every_group_exactly_once() {
        let mut server = Server::new_async().await;
        let mocks = mock_all_success(&mut server).await;

        let mut session = AuditSession::new(test_client(&server), query());
        session.submit().await.unwrap();
        // Second submit: everything succeeded, so nothing re-fires.
        session.submit().await.unwrap();

        for mock in mocks {
            mock.assert_async().await;
        }
        let bundle = session.primary.data().unwrap();
        assert_eq!(bundle.overview.page_title, "T");
        assert_eq!(session.faqs.data().unwrap().total_generated, 1);
        assert!(session.competitors.data().unwrap().is_empty());
    }

    #[tokio::test]
    async fn primary_group_is_all_or_nothing() {
        let mut server = Server::new_async().await;
        let _seo = mock_json(&mut server, "POST", "/audit/seo-issues", SEO_BODY, 1).await;
        let _overview = mock_json(&mut server, "POST", "/audit/overview", OVERVIEW_BODY, 1).await;
        let _html_err = server
            .mock("POST", "/audit/raw-html")
            .with_status(502)
            .expect(1)
            .create_async()
            .await;
        let _comp = mock_json(&mut server, "POST", "/audit/competitors", "[]", 1).await;
        let _faq = mock_json(&mut server, "POST", "/audit/ai-recommendation/faq", FAQ_BODY, 1).await;
        let _eval =
            mock_json(&mut server, "POST", "/audit/ai-recommendation/evaluate-page", EVAL_BODY, 1)
                .await;

        let mut session = AuditSession::new(test_client(&server), query());
        session.submit().await.unwrap();

        assert_eq!(session.primary.data(), None, "partial data must not surface");
        assert_eq!(session.primary.error(), Some("API Error: 502 Bad Gateway"));
        // Sibling groups are unaffected by the primary failure.
        assert!(session.competitors.data().is_some());
        assert!(session.faqs.data().is_some());
        assert!(session.evaluation.data().is_some());
    }

    #[tokio::test]
    async fn failed_group_retries_on_next_submit_without_refetching_others() {
        let mut server = Server::new_async().await;
        let _seo = mock_json(&mut server, "POST", "/audit/seo-issues", SEO_BODY, 1).await;
        let _html = mock_json(&mut server, "POST", "/audit/raw-html", HTML_BODY, 1).await;
        let _overview = mock_json(&mut server, "POST", "/audit/overview", OVERVIEW_BODY, 1).await;
        let _faq = mock_json(&mut server, "POST", "/audit/ai-recommendation/faq", FAQ_BODY, 1).await;
        let _eval =
            mock_json(&mut server, "POST", "/audit/ai-recommendation/evaluate-page", EVAL_BODY, 1)
                .await;
        let comp_err = server
            .mock("POST", "/audit/competitors")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let mut session = AuditSession::new(test_client(&server), query());
        session.submit().await.unwrap();

        assert_eq!(session.competitors.error(), Some("API Error: 500 Internal Server Error"));
        comp_err.assert_async().await;

        // Later-registered mocks win; the retry now succeeds.
        let comp_ok = mock_json(
            &mut server,
            "POST",
            "/audit/competitors",
            r#"[{"url": "https://rival.com", "seoScore": 88, "geoScore": 70,
                 "fetchResponse": true}]"#,
            1,
        )
        .await;

        session.submit().await.unwrap();
        comp_ok.assert_async().await;

        let competitors = session.competitors.data().unwrap();
        assert_eq!(competitors.len(), 1);
        assert_eq!(competitors[0].position, 1);
        assert_eq!(competitors[0].domain, "rival.com");
    }

    #[tokio::test]
    async fn invalid_input_fails_fast_with_no_network_calls() {
        let mut server = Server::new_async().await;
        let untouched = server
            .mock("POST", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let blank = AuditQuery::new("https://example.com", "", "geo", "");
        let mut session = AuditSession::new(test_client(&server), blank);
        let err = session.submit().await.unwrap_err();

        assert!(matches!(err, AppError::InvalidInput("primaryKeyword")));
        assert!(session.primary.state() == &GroupState::NotStarted);
        untouched.assert_async().await;
    }

    #[test]
    fn evaluation_request_defaults_blank_region() {
        let q = AuditQuery::new("https://example.com", "a", "b", "  ");
        let request = evaluation_request(&q);
        assert_eq!(request.page_context.geo_context, "India");
        assert_eq!(request.page_context.page_type, "Informational");
        assert_eq!(request.page_content, "");

        let q = AuditQuery::new("https://example.com", "a", "b", "Germany");
        assert_eq!(evaluation_request(&q).page_context.geo_context, "Germany");
    }
}
