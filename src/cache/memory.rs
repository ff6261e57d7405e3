//! In-process report cache.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use log::warn;

use super::CacheStore;
use crate::models::ValidationReport;

struct Entry {
    report: ValidationReport,
    expires_at: Instant,
}

/// Thread-safe in-memory cache with per-entry expiry.
///
/// Expired entries are dropped on lookup and swept on every insert.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<ValidationReport> {
        let now = Instant::now();
        {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Some(entry.report.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.delete(key);
        None
    }

    fn set(&self, key: &str, report: &ValidationReport, ttl: Duration) {
        match self.entries.write() {
            Ok(mut entries) => {
                let now = Instant::now();
                entries.retain(|_, entry| entry.expires_at > now);
                entries.insert(
                    key.to_string(),
                    Entry {
                        report: report.clone(),
                        expires_at: now + ttl,
                    },
                );
            }
            Err(e) => warn!("Report cache lock poisoned, not caching {key}: {e}"),
        }
    }

    fn delete(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let cache = MemoryCache::new();
        let report = ValidationReport::failed("https://example.com/", "boom");
        cache.set("k", &report, Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(report));
        cache.delete("k");
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let cache = MemoryCache::new();
        let report = ValidationReport::failed("https://example.com/", "boom");
        cache.set("k", &report, Duration::ZERO);
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_insert_sweeps_expired_entries() {
        let cache = MemoryCache::new();
        let report = ValidationReport::failed("https://example.com/", "boom");
        cache.set("live", &report, Duration::from_secs(60));
        for i in 0..100 {
            cache.set(&format!("stale-{i}"), &report, Duration::ZERO);
        }
        // Only the live entry and the most recent insert remain
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("live"), Some(report));
    }
}
