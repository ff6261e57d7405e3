//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (size caps, timeouts, TTLs, thresholds)
//! - Library configuration (`ValidatorConfig`)
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command};
pub use constants::*;
pub use types::{LogFormat, LogLevel, ValidatorConfig};
