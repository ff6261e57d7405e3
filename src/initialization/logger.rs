//! Logger initialization.
//!
//! Validation runs log per report and per cache or store event; the HTML
//! parser stack underneath is noisy on broken pages and is held back.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter, Record};

/// Modules whose output is capped regardless of the requested level.
const QUIET_MODULES: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("sqlx", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
];

/// Installs the global logger.
///
/// `RUST_LOG` is read first and `level` then overrides it, so
/// `RUST_LOG=debug schema_audit markup page.html --log-level info` logs at info.
/// Plain output is coloured and goes to stderr, keeping stdout free for the
/// JSON report. `LogFormat::Json` writes one object per line with `ts`,
/// `level`, `target` and `msg`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` when a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in QUIET_MODULES {
        builder.filter_module(module, (*cap).min(level));
    }
    builder.filter_module("schema_audit", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(buf, "{}", json_line(chrono::Utc::now().timestamp_millis(), record))
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| writeln!(buf, "{}", plain_line(record)));
        }
    }

    // try_init so a second call (tests, embedding apps) reports an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn json_line(ts_millis: i64, record: &Record<'_>) -> String {
    let msg = serde_json::to_string(&record.args().to_string()).unwrap_or_else(|_| "\"\"".into());
    format!(
        "{{\"ts\":{ts_millis},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{msg}}}",
        record.level(),
        record.target(),
    )
}

fn plain_line(record: &Record<'_>) -> String {
    let level = record.level();
    let label = format!("{level:<5}");
    let label = match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    };
    format!("{label} {} {}", record.target().cyan(), record.args())
}
