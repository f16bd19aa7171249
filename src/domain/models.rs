//! Wire types for the audit backend plus the display-ready view models
//! derived from them.
//!
//! Wire structs are deserialized verbatim and never mutated; the normalizer
//! only filters and sorts local copies. Audit endpoints speak camelCase,
//! the evaluate-page endpoint speaks snake_case, and the content optimizer
//! uses display-style keys; the serde attributes mirror that exactly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

// ====== Enums ======

/// Severity of a check, as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "HIGH")]
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VisibilityLevel {
    Low,
    Medium,
    High,
}

impl VisibilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisibilityLevel::Low => "LOW",
            VisibilityLevel::Medium => "MEDIUM",
            VisibilityLevel::High => "HIGH",
        }
    }
}

// ====== Query ======

/// One orchestration run's input. Immutable once submitted.
///
/// Serializes to the audit endpoints' request body; `geo_region` is
/// consumed locally (evaluation context) and never sent in that body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    pub url: String,
    pub primary_keyword: String,
    pub secondary_keyword: String,
    #[serde(skip)]
    pub geo_region: String,
}

impl AuditQuery {
    /// Build a query, trimming every field.
    pub fn new(
        url: impl Into<String>,
        primary_keyword: impl Into<String>,
        secondary_keyword: impl Into<String>,
        geo_region: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into().trim().to_string(),
            primary_keyword: primary_keyword.into().trim().to_string(),
            secondary_keyword: secondary_keyword.into().trim().to_string(),
            geo_region: geo_region.into().trim().to_string(),
        }
    }

    /// Fail fast when any required field is blank. No network call is made
    /// for an invalid query.
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(AppError::InvalidInput("url"));
        }
        if self.primary_keyword.is_empty() {
            return Err(AppError::InvalidInput("primaryKeyword"));
        }
        if self.secondary_keyword.is_empty() {
            return Err(AppError::InvalidInput("secondaryKeyword"));
        }
        Ok(())
    }
}

// ====== Audit wire types ======

/// A single pass/fail rule evaluation for a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    pub order: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub pass: bool,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub seo_check: bool,
    #[serde(default)]
    pub geo_check: bool,
    #[serde(default)]
    pub seo_severity: Option<Severity>,
    #[serde(default)]
    pub geo_severity: Option<Severity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoIssuesResponse {
    #[serde(default)]
    pub total_checks: i64,
    #[serde(default)]
    pub passed_checks: i64,
    #[serde(default)]
    pub failed_checks: i64,
    #[serde(default)]
    pub total_score: f64,
    #[serde(default)]
    pub seo_score: f64,
    #[serde(default)]
    pub geo_score: f64,
    #[serde(default)]
    pub checks: Vec<Check>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHtmlResponse {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    #[serde(default)]
    pub page_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub content_word_count: i64,
}

/// Raw competitor candidate as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorRecord {
    pub url: String,
    #[serde(default)]
    pub seo_score: f64,
    #[serde(default)]
    pub geo_score: f64,
    /// Whether the backend managed to fetch the candidate page. Anything
    /// other than `true` (including a missing field) drops the candidate.
    #[serde(default)]
    pub fetch_response: bool,
    #[serde(default)]
    pub total_checks: i64,
    #[serde(default)]
    pub passed_checks: i64,
    #[serde(default)]
    pub failed_checks: i64,
    #[serde(default)]
    pub total_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    /// HTML fragment.
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqResponse {
    #[serde(default)]
    pub extracted_faqs: Vec<FaqItem>,
    #[serde(default)]
    pub generated_faqs: Vec<FaqItem>,
    #[serde(default)]
    pub total_extracted: i64,
    #[serde(default)]
    pub total_generated: i64,
}

/// One historical audit snapshot for a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(default)]
    pub total_checks: i64,
    #[serde(default)]
    pub passed_checks: i64,
    #[serde(default)]
    pub failed_checks: i64,
    #[serde(default)]
    pub total_score: f64,
    #[serde(default)]
    pub seo_score: f64,
    #[serde(default)]
    pub geo_score: f64,
    #[serde(default)]
    pub page_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub content_word_count: i64,
    #[serde(default)]
    pub created_at: String,
}

/// History endpoint payload: URL -> snapshots.
pub type HistoryResponse = HashMap<String, Vec<HistoryEntry>>;

// ====== Evaluate-page wire types (snake_case on the wire) ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    pub url: String,
    pub page_type: String,
    pub primary_keyword: String,
    pub geo_context: String,
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatePageRequest {
    pub page_context: PageContext,
    pub page_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmVisibilitySummary {
    pub overall_visibility_score: f64,
    pub visibility_level: VisibilityLevel,
    #[serde(default)]
    pub primary_blockers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterScore {
    pub parameter: String,
    pub score: f64,
    #[serde(default)]
    pub justification: String,
    #[serde(default)]
    pub blocking_issues: Vec<String>,
    #[serde(default)]
    pub recommended_fixes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationConfidence {
    pub current_state: VisibilityLevel,
    #[serde(default)]
    pub why_or_why_not: String,
    #[serde(default)]
    pub what_would_improve_it: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedNextActions {
    #[serde(default)]
    pub quick_wins: Vec<String>,
    #[serde(default)]
    pub structural_changes: Vec<String>,
}

/// Opaque immutable evaluation snapshot for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatePageResponse {
    pub llm_visibility_summary: LlmVisibilitySummary,
    #[serde(default)]
    pub parameter_scores: Vec<ParameterScore>,
    pub citation_confidence: CitationConfidence,
    pub recommended_next_actions: RecommendedNextActions,
}

// ====== Content-optimizer wire types ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeContentRequest {
    pub user: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeContentResponse {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Meta Description", default)]
    pub meta_description: String,
    #[serde(rename = "H1", default)]
    pub h1: String,
    #[serde(rename = "Table of Contents", default)]
    pub table_of_contents: Vec<String>,
    #[serde(rename = "H2 Headings", default)]
    pub h2_headings: Vec<String>,
    #[serde(rename = "H3 Headings", default)]
    pub h3_headings: Vec<String>,
    #[serde(rename = "Content", default)]
    pub content: String,
    #[serde(rename = "FAQs", default)]
    pub faqs: Vec<FaqItem>,
    #[serde(rename = "Schema Markup", default)]
    pub schema_markup: String,
}

// ====== View models (display-ready, derived) ======

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "passed",
            CheckStatus::Failed => "failed",
        }
    }
}

/// A check shaped for display within one applicability partition.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCheck {
    pub status: CheckStatus,
    pub title: String,
    pub description: String,
    pub severity: Option<Severity>,
}

/// Which applicability partition of the check list to work on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckScope {
    Seo,
    Geo,
}

/// Two-toggle visibility filter. Both toggles default to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckFilter {
    pub passed: bool,
    pub failed: bool,
}

impl Default for CheckFilter {
    fn default() -> Self {
        Self { passed: true, failed: true }
    }
}

/// Passed/failed totals, always computed from the unfiltered partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckCounts {
    pub passed: usize,
    pub failed: usize,
}

/// Ranked competitor, derived from `CompetitorRecord`s.
///
/// The backend also defines an up/down trend field, but no code path ever
/// populates it; it is reserved and not carried here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Competitor {
    /// 1-based rank, assigned after sorting.
    pub position: usize,
    pub domain: String,
    pub url: String,
    pub seo_score: f64,
    pub geo_score: f64,
}

/// One row of the dashboard recent-activity list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityItem {
    pub title: String,
    pub date: String,
    pub seo_score: f64,
    pub geo_score: f64,
}
