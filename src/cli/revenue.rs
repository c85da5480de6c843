//! Revenue command group: read-only views of the ledger

use super::helpers::print_table;
use chrono::Local;
use clap::Subcommand;
use mekon_core::{
    error::Result,
    icons,
    ledger::{format_money, Ledger, Period},
    MekonConfig,
};

const DASHBOARD_RECENT: usize = 10;

#[derive(Subcommand)]
pub enum RevenueAction {
    /// Show revenue totals and recent transactions
    Dashboard,

    /// Per-source report for a period
    Report {
        /// Report period: week, month, year
        #[arg(short, long, default_value = "month")]
        period: Period,
    },
}

/// Handle revenue command
pub async fn handle(action: RevenueAction, config: &MekonConfig) -> Result<()> {
    let path = config.ledger_path();
    let ledger = Ledger::open(&path)?;

    match action {
        RevenueAction::Dashboard => {
            let now = Local::now().naive_local();
            let month = now.format("%Y-%m").to_string();

            let (total, month_total, count, recent) = match &ledger {
                Some(ledger) => {
                    let summary = ledger.summary(&month, DASHBOARD_RECENT);
                    (summary.total, summary.month_total, summary.count, summary.recent)
                }
                None => (0.0, 0.0, 0, Vec::new()),
            };

            println!("{} Revenue Dashboard", icons::data::money());
            println!("  Total Revenue: {}", format_money(total, 2));
            println!("  This Month:    {}", format_money(month_total, 2));
            println!("  Transactions:  {}", count);
            println!("  Data:          {}", path.display());

            if !recent.is_empty() {
                println!();
                let rows: Vec<Vec<String>> = recent
                    .iter()
                    .map(|entry| {
                        vec![
                            entry.date.clone(),
                            entry.source.clone(),
                            format_money(entry.amount, 2),
                            entry.note.clone(),
                        ]
                    })
                    .collect();
                print_table(
                    &format!("Recent Transactions (last {})", DASHBOARD_RECENT),
                    &["Date", "Source", "Amount", "Note"],
                    &rows,
                );
            }
            Ok(())
        }
        RevenueAction::Report { period } => {
            let Some(ledger) = ledger.filter(|l| !l.entries().is_empty()) else {
                println!("{} No transactions recorded yet.", icons::status::warning());
                return Ok(());
            };

            let report = ledger.report(period, Local::now().naive_local());
            let mut rows: Vec<Vec<String>> = report
                .by_source
                .iter()
                .map(|row| {
                    vec![
                        row.source.clone(),
                        format_money(row.amount, 2),
                        format!("{:.1}%", row.share),
                    ]
                })
                .collect();
            rows.push(vec![
                "TOTAL".to_string(),
                format_money(report.total, 2),
                "100%".to_string(),
            ]);

            print_table(
                &format!("{} Revenue Report ({})", icons::data::chart(), period),
                &["Source", "Amount", "Share"],
                &rows,
            );
            Ok(())
        }
    }
}
