//! Command-line options.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_BATCH_LIMIT, DEFAULT_CACHE_DIR, DEFAULT_CACHE_TTL_SECS, DEFAULT_USER_AGENT,
    FETCH_TIMEOUT_SECS,
};
use crate::config::types::{LogFormat, LogLevel, ValidatorConfig};
use crate::models::{Encoding, ValidationMode};

/// Structured data (JSON-LD, microdata, RDFa) validator.
#[derive(Debug, Parser)]
#[command(name = "schema_audit", version, about)]
pub struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", global = true)]
    pub log_format: LogFormat,

    /// Treat missing required properties as errors (strict) or warnings (lenient)
    #[arg(long, value_enum, default_value = "strict", env = "SCHEMA_AUDIT_MODE", global = true)]
    pub mode: ValidationMode,

    /// Directory for cached reports
    #[arg(long, default_value = DEFAULT_CACHE_DIR, env = "SCHEMA_AUDIT_CACHE_DIR", global = true)]
    pub cache_dir: PathBuf,

    /// Cached report lifetime in seconds
    #[arg(long, default_value_t = DEFAULT_CACHE_TTL_SECS, global = true)]
    pub cache_ttl: u64,

    /// Disable the on-disk cache (reports are still memoized for the current process)
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// SQLite database for report history (history is not recorded when omitted)
    #[arg(long, env = "SCHEMA_AUDIT_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Maximum sources processed per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_LIMIT, global = true)]
    pub batch_limit: usize,

    /// Fetch timeout in seconds
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS, global = true)]
    pub timeout: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a page and validate its structured data
    Url {
        /// Page URL (https:// is assumed when no scheme is given)
        url: String,
    },
    /// Validate markup read from a file (`-` for stdin)
    Markup {
        /// HTML or JSON-LD file
        file: PathBuf,
        /// Only extract this encoding
        #[arg(long, value_enum)]
        format: Option<Encoding>,
    },
    /// Validate every URL listed in a file (one per line, `#` starts a comment)
    Batch {
        /// File with one URL per line (`-` for stdin)
        file: PathBuf,
        /// Stop starting new URLs after this many seconds
        #[arg(long)]
        budget_secs: Option<u64>,
    },
    /// Show recently stored reports (requires --db)
    History {
        /// Number of reports to show
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
}

impl Cli {
    /// Builds the library configuration from the parsed options.
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            mode: self.mode,
            cache_ttl: Duration::from_secs(self.cache_ttl),
            batch_limit: self.batch_limit,
            fetch_timeout: Duration::from_secs(self.timeout),
            user_agent: self.user_agent.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_command_with_defaults() {
        let cli = Cli::try_parse_from(["schema_audit", "url", "example.com"])
            .expect("url command should parse");
        assert!(matches!(cli.command, Command::Url { ref url } if url == "example.com"));
        assert_eq!(cli.mode, ValidationMode::Strict);
        assert_eq!(cli.cache_ttl, DEFAULT_CACHE_TTL_SECS);
        assert_eq!(cli.batch_limit, DEFAULT_BATCH_LIMIT);
        assert!(cli.db.is_none());
    }

    #[test]
    fn test_parse_markup_command_with_format_and_mode() {
        let cli = Cli::try_parse_from([
            "schema_audit",
            "markup",
            "page.html",
            "--format",
            "microdata",
            "--mode",
            "lenient",
        ])
        .expect("markup command should parse");
        match cli.command {
            Command::Markup { ref file, format } => {
                assert_eq!(file, &PathBuf::from("page.html"));
                assert_eq!(format, Some(Encoding::Microdata));
            }
            ref other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.validator_config().mode, ValidationMode::Lenient);
    }

    #[test]
    fn test_validator_config_carries_limits() {
        let cli = Cli::try_parse_from([
            "schema_audit",
            "batch",
            "urls.txt",
            "--batch-limit",
            "5",
            "--timeout",
            "3",
            "--cache-ttl",
            "60",
        ])
        .expect("batch command should parse");
        let config = cli.validator_config();
        assert_eq!(config.batch_limit, 5);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = Cli::try_parse_from(["schema_audit", "markup", "x.html", "--format", "xml"]);
        assert!(result.is_err());
    }
}
