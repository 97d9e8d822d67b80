//! Command-line workbook importer.
//!
//! Usage:
//!
//! ```text
//! importer <file.xlsx> [--source-file NAME] [--report-date YYYY-MM-DD] [--clear]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lendview_db::connect;
use lendview_ingest::{ImportRequest, ImportService, ImportStatus};
use lendview_shared::AppConfig;

struct CliArgs {
    file: PathBuf,
    source_file: Option<String>,
    report_date: Option<NaiveDate>,
    clear: bool,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut file = None;
    let mut source_file = None;
    let mut report_date = None;
    let mut clear = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--source-file" => {
                source_file = Some(args.next().ok_or("--source-file needs a value")?);
            }
            "--report-date" => {
                let value = args.next().ok_or("--report-date needs a value")?;
                let parsed = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|_| format!("invalid --report-date: {value}"))?;
                report_date = Some(parsed);
            }
            "--clear" => clear = true,
            other if file.is_none() => file = Some(PathBuf::from(other)),
            other => return Err(format!("unexpected argument: {other}")),
        }
    }

    let file = file.ok_or("usage: importer <file.xlsx> [--source-file NAME] [--report-date YYYY-MM-DD] [--clear]")?;
    Ok(CliArgs {
        file,
        source_file,
        report_date,
        clear,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lendview=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    let db = match connect(&config.database.url).await {
        Ok(db) => db,
        Err(err) => {
            eprintln!("failed to connect to database: {err}");
            return ExitCode::FAILURE;
        }
    };

    let service = ImportService::new(db);
    let outcome = service
        .import_file(&ImportRequest {
            path: args.file,
            source_file: args.source_file,
            report_date: args.report_date,
            clear_existing: args.clear,
        })
        .await;

    println!("Import summary:");
    for sheet in &outcome.summary {
        println!(
            "{} | {} | imported={} | skipped={} | {}",
            sheet.sheet,
            sheet.model,
            sheet.imported,
            sheet.skipped,
            sheet.message
        );
    }
    for issue in &outcome.errors {
        eprintln!("error [{}]: {}", issue.sheet, issue.error);
    }
    println!(
        "status={:?} report_id={:?} borrower_id={:?} imported={} skipped={}",
        outcome.status,
        outcome.report_id,
        outcome.borrower_id,
        outcome.total_imported,
        outcome.total_skipped
    );

    if outcome.status == ImportStatus::Failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
