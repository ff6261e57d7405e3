//! Validation statistics tracking.
//!
//! This module provides thread-safe counters for issues found while
//! validating, shared by every call made through one validator.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;
use strum::IntoEnumIterator;

use super::types::IssueKind;

/// Thread-safe validation statistics tracker.
///
/// Every issue kind is initialized to zero on creation, so lookups never miss.
/// Shared across concurrent calls with `Arc`.
pub struct ValidationStats {
    issues: HashMap<IssueKind, AtomicUsize>,
    items: AtomicUsize,
    reports: AtomicUsize,
    cache_hits: AtomicUsize,
}

impl Default for ValidationStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationStats {
    pub fn new() -> Self {
        let mut issues = HashMap::new();
        for kind in IssueKind::iter() {
            issues.insert(kind, AtomicUsize::new(0));
        }

        ValidationStats {
            issues,
            items: AtomicUsize::new(0),
            reports: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
        }
    }

    /// Increment an issue counter.
    pub fn increment_issue(&self, kind: IssueKind) {
        if let Some(counter) = self.issues.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment issue counter for {:?} which is not in the map. \
                 This indicates a bug in ValidationStats initialization.",
                kind
            );
        }
    }

    pub fn record_item(&self) {
        self.items.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_report(&self) {
        self.reports.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the count for an issue kind.
    pub fn get_issue_count(&self, kind: IssueKind) -> usize {
        self.issues
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total issue count across all kinds.
    pub fn total_issues(&self) -> usize {
        IssueKind::iter().map(|k| self.get_issue_count(k)).sum()
    }

    pub fn items_validated(&self) -> usize {
        self.items.load(Ordering::SeqCst)
    }

    pub fn reports_built(&self) -> usize {
        self.reports.load(Ordering::SeqCst)
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::SeqCst)
    }
}

/// Prints a summary of the run and the issue counts per kind to the log.
pub fn print_issue_statistics(stats: &ValidationStats) {
    info!(
        "✅ Validated {} item{} in {} report{} ({} cache hit{})",
        stats.items_validated(),
        if stats.items_validated() == 1 { "" } else { "s" },
        stats.reports_built(),
        if stats.reports_built() == 1 { "" } else { "s" },
        stats.cache_hits(),
        if stats.cache_hits() == 1 { "" } else { "s" },
    );

    let total = stats.total_issues();
    if total > 0 {
        info!("Issue Counts ({} total):", total);
        for kind in IssueKind::iter() {
            let count = stats.get_issue_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }
}
