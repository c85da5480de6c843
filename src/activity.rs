//! Append-only activity log (`<data_dir>/logs/activity.jsonl`)
//!
//! One JSON object per line. Readers skip lines they cannot parse rather
//! than failing the whole listing.

use crate::error::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Single logged action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub details: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "ok".to_string()
}

impl ActivityEntry {
    /// Timestamp without fractional seconds
    pub fn short_timestamp(&self) -> &str {
        self.timestamp
            .split_once('.')
            .map(|(head, _)| head)
            .unwrap_or(&self.timestamp)
    }
}

/// Handle to the activity log file
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry stamped with the current local time
    pub fn record(&self, action: &str, details: &str, status: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entry = ActivityEntry {
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            action: action.to_string(),
            details: details.to_string(),
            status: status.to_string(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(&entry)?)?;
        debug!("Recorded activity: {}", action);
        Ok(())
    }

    /// Last `limit` entries, oldest first
    pub fn read(&self, limit: usize) -> Result<Vec<ActivityEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        let mut entries: Vec<ActivityEntry> = raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping malformed activity line: {}", e);
                    None
                }
            })
            .collect();

        let skip = entries.len().saturating_sub(limit);
        Ok(entries.split_off(skip))
    }

    /// Delete the log, returning how many entries it held
    pub fn clear(&self) -> Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }

        let count = fs::read_to_string(&self.path)?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count();
        fs::remove_file(&self.path)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_and_read() {
        let dir = TempDir::new().unwrap();
        let log = ActivityLog::new(dir.path().join("logs").join("activity.jsonl"));

        log.record("dash", "interactive", "ok").unwrap();
        log.record("revenue report", "period=month", "ok").unwrap();
        log.record("system health", "", "warn").unwrap();

        let all = log.read(50).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].action, "dash");

        let last_two = log.read(2).unwrap();
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].action, "revenue report");
        assert_eq!(last_two[1].status, "warn");
    }

    #[test]
    fn test_read_skips_malformed_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("activity.jsonl");
        fs::write(
            &path,
            "{\"timestamp\":\"2026-10-18T09:00:00.123\",\"action\":\"dash\"}\nnot json\n\n",
        )
        .unwrap();

        let entries = ActivityLog::new(&path).read(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, "ok");
        assert_eq!(entries[0].short_timestamp(), "2026-10-18T09:00:00");
    }

    #[test]
    fn test_clear_reports_count() {
        let dir = TempDir::new().unwrap();
        let log = ActivityLog::new(dir.path().join("activity.jsonl"));
        assert_eq!(log.clear().unwrap(), 0);

        log.record("a", "", "ok").unwrap();
        log.record("b", "", "ok").unwrap();
        assert_eq!(log.clear().unwrap(), 2);
        assert!(!log.path().exists());
        assert!(log.read(10).unwrap().is_empty());
    }
}
