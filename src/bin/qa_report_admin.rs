//! CLI tool to prepare and inspect a project's report database.
//!
//! Usage:
//!   cargo run --bin qa-report-admin -- migrate
//!   cargo run --bin qa-report-admin -- ids

use std::env;

use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use qa_report::config::Config;
use qa_report::db::{DbPool, ReportStore};
use qa_report::error::ReportResult;
use qa_report::models::Collection;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = &args[1];
    if matches!(command.as_str(), "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    if let Err(e) = run(command).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(command: &str) -> ReportResult<()> {
    let config = Config::from_env()?;
    let pool = DbPool::connect(&config.connect.database_url()).await?;

    match command {
        "migrate" => migrate(&pool, &config.connect.project).await,
        "ids" => show_ids(&pool).await,
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}

async fn migrate(pool: &DbPool, project: &str) -> ReportResult<()> {
    pool.run_migrations().await?;
    info!("Report tables ready for project {}", project);
    Ok(())
}

async fn show_ids(pool: &DbPool) -> ReportResult<()> {
    let builds = pool.find_highest_id(Collection::Builds).await?;
    let tests = pool.find_highest_id(Collection::Tests).await?;

    let summary = serde_json::json!({
        "highest_build_id": builds,
        "highest_test_id": tests,
        "next_build_id": builds.unwrap_or(0) + 1,
        "next_test_id": tests.unwrap_or(0) + 1,
    });

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize ids: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn print_usage() {
    eprintln!(
        r#"
Usage: qa-report-admin <command>

Commands:
  migrate    Create the builds and tests tables for the configured project
  ids        Show the highest stored build/test ids and the next ones a session would use
  help       Show this help message

Configuration is read from QA_REPORT_* environment variables (or a .env file):
  QA_REPORT_PROJECT (required), QA_REPORT_HOST, QA_REPORT_PORT,
  QA_REPORT_USER, QA_REPORT_PASSWORD, QA_REPORT_DATABASE_URL
"#
    );
}
