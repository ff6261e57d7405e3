//! On-disk report cache, one JSON file per key.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::CacheStore;
use crate::models::ValidationReport;

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    key: String,
    cached_at: SystemTime,
    ttl_secs: u64,
    report: ValidationReport,
}

/// File-backed cache that survives across process runs.
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }

    fn load(&self, key: &str) -> Result<Option<ValidationReport>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).context("Failed to read cache file")?;
        let entry: CacheEntry =
            serde_json::from_str(&content).context("Failed to parse cache file")?;

        let age = entry.cached_at.elapsed().unwrap_or_default();
        if age.as_secs() >= entry.ttl_secs {
            debug!("Cache entry {key} expired after {}s", age.as_secs());
            self.delete(key);
            return Ok(None);
        }

        Ok(Some(entry.report))
    }

    fn save(&self, key: &str, report: &ValidationReport, ttl: Duration) -> Result<()> {
        std::fs::create_dir_all(&self.dir).context("Failed to create cache directory")?;

        let entry = CacheEntry {
            key: key.to_string(),
            cached_at: SystemTime::now(),
            ttl_secs: ttl.as_secs(),
            report: report.clone(),
        };
        let content =
            serde_json::to_string_pretty(&entry).context("Failed to serialize cache entry")?;
        std::fs::write(self.path_for(key), content).context("Failed to write cache file")?;

        Ok(())
    }
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> Option<ValidationReport> {
        match self.load(key) {
            Ok(report) => report,
            Err(e) => {
                warn!("Ignoring unreadable cache entry {key}: {e:#}");
                None
            }
        }
    }

    fn set(&self, key: &str, report: &ValidationReport, ttl: Duration) {
        if let Err(e) = self.save(key, report, ttl) {
            warn!("Failed to cache report under {key}: {e:#}");
        }
    }

    fn delete(&self, key: &str) {
        let path = self.path_for(key);
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to remove cache file {}: {e}", path.display());
            }
        }
    }
}
