//! Stateless text rendering of the normalized view models.
//!
//! Deliberately thin: every function takes already-normalized data and
//! returns a string. No sorting, filtering, or network here.

use std::fmt::Write;

use crate::domain::models::{
    ActivityItem, CheckCounts, Competitor, DisplayCheck, EvaluatePageResponse, FaqResponse,
    OptimizeContentResponse, OverviewResponse,
};
use crate::service::normalize::{clamp_score, flatten_faqs, rank_parameter_scores};

pub fn render_summary(overview: &OverviewResponse, url: &str) -> String {
    let mut out = String::new();
    let title = non_empty(&overview.page_title);
    let meta = non_empty(&overview.meta_description);
    writeln!(out, "Page Title:        {}", title).ok();
    writeln!(out, "Meta Description:  {}", meta).ok();
    if overview.content_word_count > 0 {
        writeln!(out, "Content Word Count: {} words", overview.content_word_count).ok();
    } else {
        writeln!(out, "Content Word Count: N/A").ok();
    }
    writeln!(out, "Analyzed URL:      {}", url).ok();
    out
}

pub fn render_checks(label: &str, score: f64, checks: &[DisplayCheck], counts: CheckCounts) -> String {
    let mut out = String::new();
    writeln!(out, "{} Score: {:.0}/100", label, clamp_score(score)).ok();
    writeln!(out, "{} passed, {} failed", counts.passed, counts.failed).ok();
    if checks.is_empty() {
        writeln!(out, "(no checks to show)").ok();
        return out;
    }
    for check in checks {
        let severity = check
            .severity
            .map(|s| format!(" [{}]", s.as_str()))
            .unwrap_or_default();
        writeln!(out, "  {:>6}  {}{}", check.status.as_str(), check.title, severity).ok();
        if !check.description.is_empty() {
            writeln!(out, "          {}", check.description).ok();
        }
    }
    out
}

pub fn render_competitors(competitors: &[Competitor]) -> String {
    if competitors.is_empty() {
        return "No competitors found.\n".to_string();
    }
    let mut out = String::new();
    writeln!(out, "{:<4} {:<30} {:>9} {:>9}", "#", "Domain", "SEO", "GEO").ok();
    for competitor in competitors {
        writeln!(
            out,
            "{:<4} {:<30} {:>9.0} {:>9.0}",
            competitor.position, competitor.domain, competitor.seo_score, competitor.geo_score
        )
        .ok();
    }
    out
}

pub fn render_faqs(faqs: &FaqResponse) -> String {
    let mut out = String::new();
    writeln!(out, "Extracted FAQs ({})", faqs.total_extracted).ok();
    if faqs.extracted_faqs.is_empty() {
        writeln!(out, "(none)").ok();
    } else {
        writeln!(out, "{}", flatten_faqs(&faqs.extracted_faqs)).ok();
    }
    writeln!(out).ok();
    writeln!(out, "Generated FAQs ({})", faqs.total_generated).ok();
    if faqs.generated_faqs.is_empty() {
        writeln!(out, "(none)").ok();
    } else {
        writeln!(out, "{}", flatten_faqs(&faqs.generated_faqs)).ok();
    }
    out
}

pub fn render_evaluation(report: &EvaluatePageResponse) -> String {
    let mut out = String::new();
    let summary = &report.llm_visibility_summary;
    writeln!(
        out,
        "LLM Visibility: {:.0}/100 ({})",
        clamp_score(summary.overall_visibility_score),
        summary.visibility_level.as_str()
    )
    .ok();
    for blocker in &summary.primary_blockers {
        writeln!(out, "  blocker: {}", blocker).ok();
    }

    for param in rank_parameter_scores(&report.parameter_scores) {
        writeln!(out, "  {:<28} {:>3.0}", param.parameter, clamp_score(param.score)).ok();
        if !param.justification.is_empty() {
            writeln!(out, "      {}", param.justification).ok();
        }
        for fix in &param.recommended_fixes {
            writeln!(out, "      fix: {}", fix).ok();
        }
    }

    let citation = &report.citation_confidence;
    writeln!(out, "Citation confidence: {}", citation.current_state.as_str()).ok();
    if !citation.why_or_why_not.is_empty() {
        writeln!(out, "  {}", citation.why_or_why_not).ok();
    }
    for improvement in &citation.what_would_improve_it {
        writeln!(out, "  improve: {}", improvement).ok();
    }

    let actions = &report.recommended_next_actions;
    if !actions.quick_wins.is_empty() {
        writeln!(out, "Quick wins:").ok();
        for win in &actions.quick_wins {
            writeln!(out, "  - {}", win).ok();
        }
    }
    if !actions.structural_changes.is_empty() {
        writeln!(out, "Structural changes:").ok();
        for change in &actions.structural_changes {
            writeln!(out, "  - {}", change).ok();
        }
    }
    out
}

pub fn render_history(items: &[ActivityItem]) -> String {
    if items.is_empty() {
        return "No recent activity.\n".to_string();
    }
    let mut out = String::new();
    writeln!(out, "{:<40} {:<22} {:>6} {:>6}", "Page", "Date", "SEO", "GEO").ok();
    for item in items {
        writeln!(
            out,
            "{:<40} {:<22} {:>6.0} {:>6.0}",
            truncate(&item.title, 40),
            item.date,
            item.seo_score,
            item.geo_score
        )
        .ok();
    }
    out
}

pub fn render_optimized(content: &OptimizeContentResponse) -> String {
    let mut out = String::new();
    writeln!(out, "Title: {}", content.title).ok();
    writeln!(out, "Meta Description: {}", content.meta_description).ok();
    writeln!(out, "H1: {}", content.h1).ok();
    if !content.table_of_contents.is_empty() {
        writeln!(out, "Table of Contents:").ok();
        for entry in &content.table_of_contents {
            writeln!(out, "  - {}", entry).ok();
        }
    }
    for heading in &content.h2_headings {
        writeln!(out, "H2: {}", heading).ok();
    }
    for heading in &content.h3_headings {
        writeln!(out, "H3: {}", heading).ok();
    }
    writeln!(out).ok();
    writeln!(out, "{}", content.content).ok();
    if !content.faqs.is_empty() {
        writeln!(out).ok();
        writeln!(out, "{}", flatten_faqs(&content.faqs)).ok();
    }
    if !content.schema_markup.is_empty() {
        writeln!(out).ok();
        writeln!(out, "Schema Markup:\n{}", content.schema_markup).ok();
    }
    out
}

fn non_empty(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let prefix: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", prefix)
    }
}
