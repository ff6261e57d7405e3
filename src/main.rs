//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `schema_audit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Wiring the on-disk cache and report history into the validator
//! - Printing reports as JSON
//!
//! All core functionality is implemented in the library crate.

use std::io::Read;
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use schema_audit::config::{Cli, Command};
use schema_audit::error_handling::print_issue_statistics;
use schema_audit::initialization::init_logger_with;
use schema_audit::{FileCache, SchemaValidator, SqliteReportStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the current directory, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("schema_audit error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let store = match &cli.db {
        Some(path) => Some(Arc::new(
            SqliteReportStore::connect(path)
                .await
                .with_context(|| format!("Failed to open report database {}", path.display()))?,
        )),
        None => None,
    };

    match &cli.command {
        Command::Url { url } => {
            let validator = build_validator(&cli, store)?;
            let report = validator.validate_url(url).await;
            print_json(&report)?;
            finish(&validator).await;
        }
        Command::Markup { file, format } => {
            let validator = build_validator(&cli, store)?;
            let raw = read_input(file)?;
            let report = validator.validate_markup(&raw, *format);
            print_json(&report)?;
            finish(&validator).await;
        }
        Command::Batch { file, budget_secs } => {
            let validator = build_validator(&cli, store)?;
            let sources: Vec<String> = read_input(file)?
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from)
                .collect();

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupt received, stopping after the current source");
                    on_interrupt.cancel();
                }
            });

            let batch = validator
                .validate_batch(&sources, &cancel, budget_secs.map(Duration::from_secs))
                .await;
            print_json(&batch)?;
            if batch.truncated {
                warn!(
                    "Processed {} of {} sources",
                    batch.processed, batch.requested
                );
            }
            finish(&validator).await;
        }
        Command::History { limit } => {
            let store = store.context("The history command requires --db")?;
            let reports = store
                .recent(*limit)
                .await
                .context("Failed to read report history")?;
            for report in &reports {
                println!(
                    "{}  {}  schemas={} score={} errors={} warnings={}",
                    report.validated_at.to_rfc3339(),
                    report.source,
                    report.schemas_found,
                    report.overall_score,
                    report.errors.len(),
                    report.warnings.len()
                );
            }
        }
    }

    Ok(())
}

fn build_validator(cli: &Cli, store: Option<Arc<SqliteReportStore>>) -> Result<SchemaValidator> {
    let mut builder = SchemaValidator::builder(cli.validator_config());
    if !cli.no_cache {
        builder = builder.cache(Arc::new(FileCache::new(&cli.cache_dir)));
    }
    if let Some(store) = store {
        builder = builder.store(store);
    }
    builder.build().context("Failed to initialize validator")
}

/// Waits for pending history writes, then logs the run statistics.
async fn finish(validator: &SchemaValidator) {
    validator.flush().await;
    print_issue_statistics(validator.stats());
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}
