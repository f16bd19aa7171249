// src/main.rs

use std::env;
use std::process::ExitCode;

use geoaudit::config::AppConfig;
use geoaudit::domain::models::{
    AuditQuery, CheckFilter, CheckScope, OptimizeContentRequest,
};
use geoaudit::report;
use geoaudit::service::coordinator::{AuditSession, GroupState, RequestGroup};
use geoaudit::service::normalize::{apply_filter, check_counts, flatten_history, partition_checks};
use geoaudit::service::BackendClient;

const DEFAULT_GEO_REGION: &str = "United States";

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  geoaudit audit <url> <primary-keyword> <secondary-keyword> [geo-region]");
    eprintln!("  geoaudit history");
    eprintln!("  geoaudit optimize <file>");
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("audit") if args.len() >= 4 => {
            let region = args.get(4).cloned().unwrap_or_else(|| DEFAULT_GEO_REGION.to_string());
            run_audit(&args[1], &args[2], &args[3], &region).await
        }
        Some("history") => run_history().await,
        Some("optimize") if args.len() >= 2 => run_optimize(&args[1]).await,
        _ => {
            print_usage();
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_audit(url: &str, primary: &str, secondary: &str, region: &str) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let client = BackendClient::new(config)?;
    let query = AuditQuery::new(url, primary, secondary, region);

    let mut session = AuditSession::new(client, query);
    session.submit().await?;

    section("Summary");
    match session.primary.state() {
        GroupState::Succeeded(bundle) => {
            print!("{}", report::render_summary(&bundle.overview, &session.query().url));

            let filter = CheckFilter::default();

            section("SEO Checks");
            let seo_checks = apply_filter(
                &partition_checks(&bundle.seo.checks, CheckScope::Seo),
                filter,
            );
            let seo_counts = check_counts(&bundle.seo.checks, CheckScope::Seo);
            print!("{}", report::render_checks("SEO", bundle.seo.seo_score, &seo_checks, seo_counts));

            section("GEO Checks");
            let geo_checks = apply_filter(
                &partition_checks(&bundle.seo.checks, CheckScope::Geo),
                filter,
            );
            let geo_counts = check_counts(&bundle.seo.checks, CheckScope::Geo);
            print!("{}", report::render_checks("GEO", bundle.seo.geo_score, &geo_checks, geo_counts));
        }
        GroupState::Failed(message) => println!("error: {}", message),
        _ => {}
    }

    section("Competitors");
    render_group(&session.competitors, |competitors| report::render_competitors(competitors));

    section("FAQs");
    render_group(&session.faqs, report::render_faqs);

    section("AI Recommendations");
    render_group(&session.evaluation, report::render_evaluation);

    Ok(())
}

async fn run_history() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let client = BackendClient::new(config)?;

    let history = client.history().await?;
    let items = flatten_history(&history);

    section("Recent Activity");
    print!("{}", report::render_history(&items));
    Ok(())
}

async fn run_optimize(path: &str) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let user = config.user_id.clone();
    let client = BackendClient::new(config)?;

    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path, e))?;

    let request = OptimizeContentRequest { user, content };
    let optimized = client.optimize_content(&request).await?;

    section("Optimized Content");
    print!("{}", report::render_optimized(&optimized));
    Ok(())
}

fn section(title: &str) {
    println!("\n== {} ==", title);
}

/// Render one request group: payload on success, inline error on failure.
fn render_group<T>(group: &RequestGroup<T>, render: impl Fn(&T) -> String) {
    match group.state() {
        GroupState::Succeeded(data) => print!("{}", render(data)),
        GroupState::Failed(message) => println!("error: {}", message),
        GroupState::InFlight => println!("(still loading)"),
        GroupState::NotStarted => println!("(not requested)"),
    }
}
