//! Report caching.
//!
//! Reports are cached under a key derived from a SHA-256 digest of the
//! canonical URL or the raw markup. A hit returns the stored report verbatim.
//!
//! Cache failures never fail a validation call: backends log and carry on as
//! if the entry were missing.

mod file;
mod memory;

use std::time::Duration;

use sha2::{Digest, Sha256};

use crate::config::CACHE_KEY_PREFIX;
use crate::models::{Encoding, ValidationMode, ValidationReport};
use crate::utils::url::canonical_url;

pub use file::FileCache;
pub use memory::MemoryCache;

/// Key/value store for finished reports.
pub trait CacheStore: Send + Sync {
    /// Returns the report stored under `key` if it has not expired.
    fn get(&self, key: &str) -> Option<ValidationReport>;

    /// Stores `report` under `key` for `ttl`.
    fn set(&self, key: &str, report: &ValidationReport, ttl: Duration);

    fn delete(&self, key: &str);
}

fn sha256_hex(input: &str) -> String {
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// Cache key for a URL validation.
///
/// Equivalent spellings of the same URL (case of scheme/host, default port,
/// fragment) share a key.
pub fn url_cache_key(url: &str, mode: ValidationMode) -> String {
    let digest = sha256_hex(&format!("{mode:?}\n{}", canonical_url(url)));
    format!("{CACHE_KEY_PREFIX}url_{digest}")
}

/// Cache key for a markup validation.
pub fn markup_cache_key(raw: &str, hint: Option<Encoding>, mode: ValidationMode) -> String {
    let hint = hint.map(|h| h.to_string()).unwrap_or_default();
    let digest = sha256_hex(&format!("{mode:?}\n{hint}\n{raw}"));
    format!("{CACHE_KEY_PREFIX}markup_{digest}")
}

/// Report source label for raw markup: `markup:` plus a short content digest.
pub fn markup_source(raw: &str) -> String {
    let digest = sha256_hex(raw);
    format!("markup:{}", &digest[..12])
}
