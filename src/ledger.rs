//! Read-only view of the revenue ledger
//!
//! The ledger is a JSON array of transactions stored at
//! `<data_dir>/revenue/ledger.json`. Dates are ISO-8601 strings, so period
//! filtering compares them lexicographically.

use crate::error::{MekonError, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// One recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "unknown_source")]
    pub source: String,
    #[serde(default)]
    pub note: String,
}

fn unknown_source() -> String {
    "?".to_string()
}

/// Transactions loaded from disk
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
    entries: Vec<LedgerEntry>,
}

/// Headline figures shown by the revenue panel and `revenue dashboard`
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub total: f64,
    pub month_total: f64,
    pub count: usize,
    pub recent: Vec<LedgerEntry>,
}

/// Reporting window for `revenue report`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    /// Start of the window containing `now`
    pub fn cutoff(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date();
        let start = match self {
            Period::Week => today - Duration::days(7),
            Period::Month => today.with_day(1).unwrap_or(today),
            Period::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        };
        start.and_hms_opt(0, 0, 0).unwrap_or(now)
    }
}

impl FromStr for Period {
    type Err = MekonError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(MekonError::InvalidInput(format!(
                "unknown period '{}' (expected week, month or year)",
                other
            ))),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        };
        f.write_str(name)
    }
}

/// Revenue grouped by source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTotal {
    pub source: String,
    pub amount: f64,
    /// Percentage of the period total
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub period: Period,
    pub total: f64,
    pub by_source: Vec<SourceTotal>,
}

impl Ledger {
    /// Read the ledger; `Ok(None)` when no ledger has been written yet
    pub fn open(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            debug!("No ledger at {}", path.display());
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<LedgerEntry> =
            serde_json::from_str(&raw).map_err(|e| MekonError::MalformedData {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Some(Self {
            path: path.to_path_buf(),
            entries,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Last `n` entries in recorded order
    pub fn latest(&self, n: usize) -> &[LedgerEntry] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }

    /// Totals for the whole ledger and for the month `YYYY-MM`
    pub fn summary(&self, month_prefix: &str, recent: usize) -> LedgerSummary {
        let total = self.entries.iter().map(|e| e.amount).sum();
        let month_total = self
            .entries
            .iter()
            .filter(|e| e.date.starts_with(month_prefix))
            .map(|e| e.amount)
            .sum();

        LedgerSummary {
            total,
            month_total,
            count: self.entries.len(),
            recent: self.latest(recent).to_vec(),
        }
    }

    /// Per-source breakdown of entries dated on or after the period cutoff
    pub fn report(&self, period: Period, now: NaiveDateTime) -> PeriodReport {
        let cutoff = period.cutoff(now).format("%Y-%m-%dT%H:%M:%S").to_string();

        let mut by_source: HashMap<&str, f64> = HashMap::new();
        let mut total = 0.0;
        for entry in self.entries.iter().filter(|e| e.date.as_str() >= cutoff.as_str()) {
            *by_source.entry(entry.source.as_str()).or_default() += entry.amount;
            total += entry.amount;
        }

        let mut rows: Vec<SourceTotal> = by_source
            .into_iter()
            .map(|(source, amount)| SourceTotal {
                source: source.to_string(),
                amount,
                share: if total > 0.0 { amount / total * 100.0 } else { 0.0 },
            })
            .collect();
        rows.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.source.cmp(&b.source))
        });

        PeriodReport {
            period,
            total,
            by_source: rows,
        }
    }
}

/// Format an amount as dollars with thousands separators, e.g. `$1,234.50`
pub fn format_money(amount: f64, decimals: usize) -> String {
    let negative = amount < 0.0;
    let formatted = format!("{:.*}", decimals, amount.abs());
    let (whole, frac) = match formatted.split_once('.') {
        Some((w, f)) => (w.to_string(), Some(f.to_string())),
        None => (formatted.clone(), None),
    };

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    match frac {
        Some(f) => format!("{}${}.{}", sign, grouped, f),
        None => format!("{}${}", sign, grouped),
    }
}
