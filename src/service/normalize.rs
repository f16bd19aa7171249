//! View-model normalization - pure functions, no I/O.
//!
//! Everything here turns a successful group's raw payload into what the
//! presentation layer needs: partitioned/sorted check lists, ranked
//! competitors, clamped parameter scores, flattened FAQ text, and the
//! date-sorted recent-activity list. Recomputed whenever source data or
//! filters change; the raw payloads are never mutated.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use url::Url;

use crate::domain::models::{
    ActivityItem, Check, CheckCounts, CheckFilter, CheckScope, CheckStatus, Competitor,
    CompetitorRecord, DisplayCheck, FaqItem, HistoryResponse, ParameterScore,
};

// ====== Check partitioning ======

/// Select the checks applicable to one scope, sorted ascending by `order`
/// (stable: ties keep input order). A check may belong to one partition,
/// both, or neither.
pub fn partition_checks(checks: &[Check], scope: CheckScope) -> Vec<DisplayCheck> {
    let mut selected: Vec<&Check> = checks
        .iter()
        .filter(|check| match scope {
            CheckScope::Seo => check.seo_check,
            CheckScope::Geo => check.geo_check,
        })
        .collect();
    selected.sort_by_key(|check| check.order);

    selected
        .into_iter()
        .map(|check| {
            let scoped_severity = match scope {
                CheckScope::Seo => check.seo_severity,
                CheckScope::Geo => check.geo_severity,
            };
            DisplayCheck {
                status: if check.pass { CheckStatus::Passed } else { CheckStatus::Failed },
                title: check.title.clone(),
                description: check.description.clone(),
                // Scoped severity wins; fall back to the general field.
                severity: scoped_severity.or(check.severity),
            }
        })
        .collect()
}

/// Apply the passed/failed toggles to an already-partitioned list. Both
/// toggles off yields an empty list; counts are unaffected.
pub fn apply_filter(checks: &[DisplayCheck], filter: CheckFilter) -> Vec<DisplayCheck> {
    checks
        .iter()
        .filter(|check| match check.status {
            CheckStatus::Passed => filter.passed,
            CheckStatus::Failed => filter.failed,
        })
        .cloned()
        .collect()
}

/// Passed/failed totals for one partition, computed from the unfiltered
/// input so they stay constant while the visibility toggles change.
pub fn check_counts(checks: &[Check], scope: CheckScope) -> CheckCounts {
    let applicable = checks.iter().filter(|check| match scope {
        CheckScope::Seo => check.seo_check,
        CheckScope::Geo => check.geo_check,
    });
    let mut counts = CheckCounts::default();
    for check in applicable {
        if check.pass {
            counts.passed += 1;
        } else {
            counts.failed += 1;
        }
    }
    counts
}

// ====== Competitor ranking ======

/// Normalize raw competitor candidates: drop failed fetches, sort
/// descending by SEO score (stable: equal scores keep arrival order),
/// then assign 1-based positions.
pub fn rank_competitors(records: &[CompetitorRecord]) -> Vec<Competitor> {
    let mut competitors: Vec<Competitor> = records
        .iter()
        .filter(|record| record.fetch_response)
        .map(|record| Competitor {
            position: 0,
            domain: extract_domain(&record.url),
            url: record.url.clone(),
            seo_score: record.seo_score,
            geo_score: record.geo_score,
        })
        .collect();

    competitors.sort_by(|a, b| {
        b.seo_score.partial_cmp(&a.seo_score).unwrap_or(Ordering::Equal)
    });

    for (index, competitor) in competitors.iter_mut().enumerate() {
        competitor.position = index + 1;
    }
    competitors
}

/// Hostname without a leading `www.`; falls back to string surgery when the
/// URL does not parse.
pub fn extract_domain(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            return host.strip_prefix("www.").unwrap_or(host).to_string();
        }
    }
    let stripped = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");
    let host = stripped.split('/').next().unwrap_or(stripped);
    if host.is_empty() {
        url.to_string()
    } else {
        host.to_string()
    }
}

// ====== Evaluation report ======

/// Clamp a parameter score into [0, 100]; NaN counts as 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// Parameter scores sorted descending by clamped score for display
/// (stable: equal clamped scores keep backend order).
pub fn rank_parameter_scores(scores: &[ParameterScore]) -> Vec<ParameterScore> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| {
        clamp_score(b.score)
            .partial_cmp(&clamp_score(a.score))
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

// ====== FAQ flattening ======

/// Flatten FAQ pairs into copyable text, preserving backend order.
pub fn flatten_faqs(faqs: &[FaqItem]) -> String {
    faqs.iter()
        .map(|faq| format!("Q: {}\nA: {}", faq.question, faq.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ====== History flattening ======

/// Flatten the URL -> snapshots map into one recent-activity list, most
/// recent first.
///
/// Tie-break policy: timestamps parse via RFC 3339, then
/// `%Y-%m-%d %H:%M:%S`, then a bare `%Y-%m-%d`. Unparseable dates sort as
/// oldest, ordered among themselves by reverse lexicographic comparison of
/// the raw string; equal keys fall back to title order so the result is
/// deterministic regardless of map iteration order.
pub fn flatten_history(history: &HistoryResponse) -> Vec<ActivityItem> {
    let mut items: Vec<ActivityItem> = history
        .values()
        .flatten()
        .map(|entry| ActivityItem {
            title: entry.page_title.clone(),
            date: entry.created_at.clone(),
            seo_score: entry.seo_score,
            geo_score: entry.geo_score,
        })
        .collect();

    items.sort_by(|a, b| {
        match (parse_timestamp(&a.date), parse_timestamp(&b.date)) {
            (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.title.cmp(&b.title)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)),
        }
    });
    items
}

fn parse_timestamp(raw: &str) -> Option<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp_millis());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc().timestamp_millis());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    None
}
