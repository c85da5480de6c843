//! Revenue panel: ledger totals and latest transactions

use super::{Cell, Field, PanelBody, PanelId, PanelProvider, Tone};
use crate::ledger::{format_money, Ledger};
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;

const RECENT_ENTRIES: usize = 3;

pub struct FinancialProvider {
    ledger_path: PathBuf,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl FinancialProvider {
    pub fn new(ledger_path: impl Into<PathBuf>) -> Self {
        Self {
            ledger_path: ledger_path.into(),
            clock: local_now,
        }
    }

    /// Use a fixed clock for the "this month" total
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }
}

impl PanelProvider for FinancialProvider {
    fn panel(&self) -> PanelId {
        PanelId::Financial
    }

    fn probe(&self) -> anyhow::Result<PanelBody> {
        let Some(ledger) = Ledger::open(&self.ledger_path)? else {
            return Ok(PanelBody::Notice(vec![
                Cell::muted("No transactions yet"),
                Cell::muted(format!("Ledger: {}", self.ledger_path.display())),
            ]));
        };

        let month = (self.clock)().format("%Y-%m").to_string();
        let summary = ledger.summary(&month, RECENT_ENTRIES);

        let mut extra = Vec::new();
        if !summary.recent.is_empty() {
            extra.push(Cell::empty());
            extra.push(Cell::muted("Recent:"));
            extra.extend(summary.recent.iter().map(|entry| {
                Cell::plain(format!(
                    "  {} from {}",
                    format_money(entry.amount, 0),
                    entry.source
                ))
            }));
        }

        Ok(PanelBody::Fields {
            fields: vec![
                Field::new("Total", Cell::new(format_money(summary.total, 2), Tone::Good)),
                Field::new("Month", Cell::plain(format_money(summary.month_total, 2))),
                Field::new("Txns", Cell::plain(summary.count.to_string())),
            ],
            extra,
        })
    }
}
